//! 商品消息载荷
//!
//! 所有载荷都拒绝未声明的字段。

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 创建商品请求
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateProductDto {
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: String,

    pub price: f64,
}

/// 按 id 操作的请求（查询、删除）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ProductIdDto {
    #[validate(range(min = 1, message = "id must be a positive number"))]
    pub id: i32,
}

/// 更新商品请求，`id` 只用于定位记录
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateProductDto {
    #[validate(range(min = 1, message = "id must be a positive number"))]
    pub id: i32,

    #[serde(default)]
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: Option<String>,

    #[serde(default)]
    pub price: Option<f64>,
}

/// 可写字段的部分更新
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
}

impl UpdateProductDto {
    pub fn into_parts(self) -> (i32, ProductPatch) {
        let UpdateProductDto { id, name, price } = self;
        (id, ProductPatch { name, price })
    }
}

/// 批量校验请求，允许重复 id
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ValidateProductsDto {
    #[validate(length(min = 1, message = "ids should not be empty"))]
    pub ids: Vec<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_name() {
        let dto: CreateProductDto = serde_json::from_str(r#"{"name":"","price":3}"#).unwrap();
        assert!(dto.validate().is_err());

        let dto: CreateProductDto =
            serde_json::from_str(r#"{"name":"Lamp","price":25}"#).unwrap();
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_rejects_extra_fields() {
        let result =
            serde_json::from_str::<CreateProductDto>(r#"{"name":"Lamp","price":25,"available":false}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_splits_lookup_id() {
        let dto: UpdateProductDto = serde_json::from_str(r#"{"id":4,"price":9.5}"#).unwrap();
        assert!(dto.validate().is_ok());

        let (id, patch) = dto.into_parts();
        assert_eq!(id, 4);
        assert_eq!(patch.name, None);
        assert_eq!(patch.price, Some(9.5));
    }

    #[test]
    fn test_id_must_be_positive() {
        let dto: ProductIdDto = serde_json::from_str(r#"{"id":0}"#).unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_validate_requires_ids() {
        let dto: ValidateProductsDto = serde_json::from_str(r#"{"ids":[]}"#).unwrap();
        assert!(dto.validate().is_err());
        assert!(serde_json::from_str::<ValidateProductsDto>("{}").is_err());
    }
}
