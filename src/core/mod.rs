pub mod error;
pub mod middleware;
pub mod pagination;
pub mod response;
