//! 商品业务服务

use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, warn};

use super::dto::{CreateProductDto, ProductPatch};
use super::model::Product;
use super::repository::ProductRepository;
use crate::core::error::{CoreError, CoreResult};
use crate::core::pagination::{PageMeta, Paginated, PaginationDto};

#[derive(Clone)]
pub struct ProductsService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductsService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, input: CreateProductDto) -> CoreResult<Product> {
        let product = self.repository.create(&input).await?;
        info!("Created product: {} ({})", product.name, product.id);
        Ok(product)
    }

    /// 分页列出可用商品，页码超出末页时返回空数据
    pub async fn find_all(&self, pagination: PaginationDto) -> CoreResult<Paginated<Product>> {
        let total = self.repository.count_available().await?;
        let last_page = pagination.last_page(total);

        let data = self
            .repository
            .find_available_page(pagination.offset(), i64::from(pagination.limit))
            .await?;

        Ok(Paginated {
            data,
            meta: PageMeta {
                page: pagination.page,
                total,
                last_page,
            },
        })
    }

    pub async fn find_one(&self, id: i32) -> CoreResult<Product> {
        self.repository
            .find_available(id)
            .await?
            .ok_or_else(|| CoreError::product_not_found(id))
    }

    pub async fn update(&self, id: i32, patch: ProductPatch) -> CoreResult<Product> {
        let product = self
            .repository
            .update_available(id, &patch)
            .await?
            .ok_or_else(|| CoreError::product_not_found(id))?;

        info!("Updated product: {} ({})", product.name, product.id);
        Ok(product)
    }

    /// 软删除：只把 `available` 置为 false
    pub async fn remove(&self, id: i32) -> CoreResult<Product> {
        let product = self
            .repository
            .soft_delete(id)
            .await?
            .ok_or_else(|| CoreError::product_not_found(id))?;

        info!("Removed product: {}", product.id);
        Ok(product)
    }

    /// 确认所有 id 都对应可用商品，重复 id 只计一次
    pub async fn validate_products(&self, ids: Vec<i32>) -> CoreResult<Vec<Product>> {
        let distinct: Vec<i32> = ids.into_iter().collect::<BTreeSet<_>>().into_iter().collect();

        let products = self.repository.find_available_by_ids(&distinct).await?;

        if products.len() != distinct.len() {
            warn!(
                "Validation failed: {} of {} products found",
                products.len(),
                distinct.len()
            );
            return Err(CoreError::BadRequest(
                "Some products were not found".to_string(),
            ));
        }

        Ok(products)
    }
}
