//! 分页参数与分页结果

use serde::{Deserialize, Serialize};
use validator::Validate;

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

/// 分页查询参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PaginationDto {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be a positive number"))]
    pub page: u32,

    #[serde(default = "default_limit")]
    #[validate(range(min = 1, message = "limit must be a positive number"))]
    pub limit: u32,
}

impl Default for PaginationDto {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PaginationDto {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// 跳过的记录数 `(page - 1) * limit`，溢出时封顶为 `i64::MAX`
    pub fn offset(&self) -> i64 {
        (i64::from(self.page.max(1)) - 1).saturating_mul(i64::from(self.limit))
    }

    /// 总页数，向上取整
    pub fn last_page(&self, total: i64) -> i64 {
        let limit = i64::from(self.limit.max(1));
        (total + limit - 1) / limit
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u32,
    pub total: i64,
    pub last_page: i64,
}

/// 分页响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_payload() {
        let dto: PaginationDto = serde_json::from_str("{}").unwrap();
        assert_eq!(dto, PaginationDto::new(1, 10));
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_zero_rejected() {
        assert!(PaginationDto::new(0, 10).validate().is_err());
        assert!(PaginationDto::new(1, 0).validate().is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = serde_json::from_str::<PaginationDto>(r#"{"page":1,"sort":"name"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_offset_and_last_page() {
        let dto = PaginationDto::new(3, 10);
        assert_eq!(dto.offset(), 20);
        assert_eq!(dto.last_page(0), 0);
        assert_eq!(dto.last_page(10), 1);
        assert_eq!(dto.last_page(21), 3);
    }

    #[test]
    fn test_offset_saturates_on_huge_page() {
        let dto = PaginationDto::new(u32::MAX, u32::MAX);
        assert!(dto.validate().is_ok());
        assert_eq!(dto.offset(), i64::MAX);
        assert_eq!(dto.last_page(5), 1);
    }

    #[test]
    fn test_meta_wire_names() {
        let meta = PageMeta {
            page: 2,
            total: 15,
            last_page: 2,
        };
        let wire = serde_json::to_value(&meta).unwrap();
        assert_eq!(wire["lastPage"], 2);
    }
}
