//! 商品消息处理器

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use validator::Validate;

use super::dto::{CreateProductDto, ProductIdDto, UpdateProductDto, ValidateProductsDto};
use super::service::ProductsService;
use crate::core::error::{CoreError, CoreResult};
use crate::core::pagination::PaginationDto;

pub const CREATE_PRODUCT: &str = "create_product";
pub const FIND_ALL_PRODUCTS: &str = "find_all_products";
pub const FIND_ONE_PRODUCT: &str = "find_one_product";
pub const UPDATE_PRODUCT: &str = "update_product";
pub const DELETE_PRODUCT: &str = "delete_product";
pub const VALIDATE_PRODUCTS: &str = "validate_products";

#[derive(Clone)]
pub struct AppState {
    pub products_service: ProductsService,
}

impl AppState {
    pub fn new(products_service: ProductsService) -> Self {
        Self { products_service }
    }
}

/// 解析并校验载荷，缺省载荷按空对象处理
fn payload<T>(data: Value) -> CoreResult<T>
where
    T: DeserializeOwned + Validate,
{
    let data = if data.is_null() {
        Value::Object(Default::default())
    } else {
        data
    };
    let dto: T = serde_json::from_value(data)?;
    dto.validate()?;
    Ok(dto)
}

fn to_value<T: Serialize>(result: T) -> CoreResult<Value> {
    serde_json::to_value(result).map_err(|e| CoreError::InternalServerError(e.to_string()))
}

/// 按消息模式分发到对应的业务操作
pub async fn dispatch(state: &AppState, pattern: &str, data: Value) -> CoreResult<Value> {
    let service = &state.products_service;

    match pattern {
        CREATE_PRODUCT => {
            let dto: CreateProductDto = payload(data)?;
            to_value(service.create(dto).await?)
        }
        FIND_ALL_PRODUCTS => {
            let dto: PaginationDto = payload(data)?;
            to_value(service.find_all(dto).await?)
        }
        FIND_ONE_PRODUCT => {
            let dto: ProductIdDto = payload(data)?;
            to_value(service.find_one(dto.id).await?)
        }
        UPDATE_PRODUCT => {
            let dto: UpdateProductDto = payload(data)?;
            let (id, patch) = dto.into_parts();
            to_value(service.update(id, patch).await?)
        }
        DELETE_PRODUCT => {
            let dto: ProductIdDto = payload(data)?;
            to_value(service.remove(dto.id).await?)
        }
        VALIDATE_PRODUCTS => {
            let dto: ValidateProductsDto = payload(data)?;
            to_value(service.validate_products(dto.ids).await?)
        }
        _ => Err(CoreError::NoHandler(
            "There is no matching message handler defined in the remote service.".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::products::memory::InMemoryProductRepository;
    use serde_json::json;
    use std::sync::Arc;

    fn create_test_state() -> AppState {
        let repo = Arc::new(InMemoryProductRepository::new());
        AppState::new(ProductsService::new(repo))
    }

    #[tokio::test]
    async fn test_create_then_find_one() {
        let state = create_test_state();

        let created = dispatch(&state, CREATE_PRODUCT, json!({ "name": "Lamp", "price": 25 }))
            .await
            .unwrap();
        assert_eq!(created["id"], 1);
        assert_eq!(created["available"], true);

        let found = dispatch(&state, FIND_ONE_PRODUCT, json!({ "id": 1 }))
            .await
            .unwrap();
        assert_eq!(found["name"], "Lamp");
    }

    #[tokio::test]
    async fn test_find_all_defaults() {
        let state = create_test_state();
        let page = dispatch(&state, FIND_ALL_PRODUCTS, Value::Null).await.unwrap();
        assert_eq!(page["meta"]["page"], 1);
        assert_eq!(page["meta"]["total"], 0);
        assert_eq!(page["meta"]["lastPage"], 0);
    }

    #[tokio::test]
    async fn test_find_all_huge_page_is_empty() {
        let state = create_test_state();
        dispatch(&state, CREATE_PRODUCT, json!({ "name": "Lamp", "price": 25 }))
            .await
            .unwrap();

        let page = dispatch(
            &state,
            FIND_ALL_PRODUCTS,
            json!({ "page": u32::MAX, "limit": u32::MAX }),
        )
        .await
        .unwrap();
        assert_eq!(page["data"], json!([]));
        assert_eq!(page["meta"]["page"], u32::MAX);
        assert_eq!(page["meta"]["total"], 1);
        assert_eq!(page["meta"]["lastPage"], 1);
    }

    #[tokio::test]
    async fn test_whitelist_rejects_unknown_fields() {
        let state = create_test_state();
        let err = dispatch(
            &state,
            CREATE_PRODUCT,
            json!({ "name": "Lamp", "price": 25, "stock": 3 }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CoreError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_validation_message() {
        let state = create_test_state();
        let err = dispatch(&state, FIND_ALL_PRODUCTS, json!({ "page": 0 }))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "page must be a positive number");
    }

    #[tokio::test]
    async fn test_update_uses_payload_id_for_lookup_only() {
        let state = create_test_state();
        dispatch(&state, CREATE_PRODUCT, json!({ "name": "Lamp", "price": 25 }))
            .await
            .unwrap();

        let updated = dispatch(&state, UPDATE_PRODUCT, json!({ "id": 1, "name": "Desk Lamp" }))
            .await
            .unwrap();
        assert_eq!(updated["id"], 1);
        assert_eq!(updated["name"], "Desk Lamp");
        assert_eq!(updated["price"], 25.0);
    }

    #[tokio::test]
    async fn test_unknown_pattern() {
        let state = create_test_state();
        let err = dispatch(&state, "drop_products", json!({})).await.unwrap_err();
        assert_eq!(err.code(), "NO_HANDLER");
    }
}
