pub mod client;
pub mod protocol;
pub mod server;

pub use client::{ClientError, RpcClient};
pub use protocol::RpcRequest;
pub use server::RpcServer;
