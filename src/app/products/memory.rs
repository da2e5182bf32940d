//! 内存存储实现，用于测试和本地调试

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::dto::{CreateProductDto, ProductPatch};
use super::model::Product;
use super::repository::ProductRepository;
use crate::core::error::{CoreError, CoreResult};

#[derive(Default)]
struct Table {
    last_id: i32,
    rows: BTreeMap<i32, Product>,
}

/// 以 id 递增顺序保存全部记录（包括已下架的）
#[derive(Default)]
pub struct InMemoryProductRepository {
    table: Mutex<Table>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> CoreResult<MutexGuard<'_, Table>> {
        self.table
            .lock()
            .map_err(|_| CoreError::InternalServerError("product table lock poisoned".to_string()))
    }

    /// 直接读取存储中的记录，不做可用性过滤
    pub fn raw_row(&self, id: i32) -> Option<Product> {
        self.lock().ok()?.rows.get(&id).cloned()
    }

    pub fn row_count(&self) -> usize {
        self.lock().map(|table| table.rows.len()).unwrap_or(0)
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: &CreateProductDto) -> CoreResult<Product> {
        let mut table = self.lock()?;
        table.last_id += 1;

        let product = Product {
            id: table.last_id,
            name: input.name.clone(),
            price: input.price,
            available: true,
        };
        table.rows.insert(product.id, product.clone());

        Ok(product)
    }

    async fn count_available(&self) -> CoreResult<i64> {
        let table = self.lock()?;
        Ok(table.rows.values().filter(|p| p.available).count() as i64)
    }

    async fn find_available_page(&self, offset: i64, limit: i64) -> CoreResult<Vec<Product>> {
        let table = self.lock()?;
        Ok(table
            .rows
            .values()
            .filter(|p| p.available)
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn find_available(&self, id: i32) -> CoreResult<Option<Product>> {
        let table = self.lock()?;
        Ok(table.rows.get(&id).filter(|p| p.available).cloned())
    }

    async fn find_available_by_ids(&self, ids: &[i32]) -> CoreResult<Vec<Product>> {
        let table = self.lock()?;
        Ok(table
            .rows
            .values()
            .filter(|p| p.available && ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn update_available(&self, id: i32, patch: &ProductPatch) -> CoreResult<Option<Product>> {
        let mut table = self.lock()?;
        let Some(product) = table.rows.get_mut(&id).filter(|p| p.available) else {
            return Ok(None);
        };

        if let Some(name) = &patch.name {
            product.name = name.clone();
        }
        if let Some(price) = patch.price {
            product.price = price;
        }

        Ok(Some(product.clone()))
    }

    async fn soft_delete(&self, id: i32) -> CoreResult<Option<Product>> {
        let mut table = self.lock()?;
        let Some(product) = table.rows.get_mut(&id).filter(|p| p.available) else {
            return Ok(None);
        };

        product.available = false;
        Ok(Some(product.clone()))
    }
}
