use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{error, info};

use products_ms::app::products::handler::AppState;
use products_ms::app::products::{PgProductRepository, ProductsService};
use products_ms::config;
use products_ms::infrastructure::database::DatabaseManager;
use products_ms::infrastructure::logger::init_logging;
use products_ms::rpc::RpcServer;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load_config().context("加载配置失败")?;
    let _guard = init_logging(&config.logging).context("初始化日志失败")?;

    info!("启动商品微服务 (ProductsMS)");

    let database = DatabaseManager::connect(&config.database)
        .await
        .map_err(|e| {
            error!("Failed to initialize database: {}", e);
            e
        })?;

    let repository = Arc::new(PgProductRepository::new(database.get_pool().clone()));
    let state = AppState::new(ProductsService::new(repository));

    let addr = config.server.resolve_addr().await?;
    let server = RpcServer::bind(addr, config.server.max_frame_length).await?;
    info!("Products Microservice running on port {}", config.server.port);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("监听退出信号失败: {}", e);
        }
        info!("收到退出信号，正在关闭");
    };
    server.serve(state, shutdown).await?;

    database.close().await;
    info!("商品微服务已退出");

    Ok(())
}
