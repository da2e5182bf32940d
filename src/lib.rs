//! # products-ms
//!
//! 商品目录微服务：通过 TCP RPC 暴露商品的创建、分页查询、按 id 查询、
//! 更新、软删除以及批量存在性校验，数据存放在 PostgreSQL。

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;
pub mod rpc;

pub use app::products::{Product, ProductsService};
pub use config::Config;
pub use crate::core::error::{CoreError, CoreResult, RpcFault};
