pub mod dto;
pub mod handler;
pub mod memory;
pub mod model;
pub mod repository;
pub mod service;

pub use model::Product;
pub use repository::{PgProductRepository, ProductRepository};
pub use service::ProductsService;
