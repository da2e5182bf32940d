//! 核心中间件模块

use serde_json::Value;
use std::future::Future;
use std::time::Instant;
use tracing::{info, warn};

use super::error::CoreResult;

/// 请求日志中间件，记录消息模式、请求 id、结果与耗时
pub async fn request_logging<F>(id: &str, pattern: &str, next: F) -> CoreResult<Value>
where
    F: Future<Output = CoreResult<Value>>,
{
    let start = Instant::now();
    let result = next.await;
    let duration = start.elapsed();

    match &result {
        Ok(_) => info!("{} {} - OK - {}ms", pattern, id, duration.as_millis()),
        Err(e) => warn!(
            "{} {} - {} - {}ms - {}",
            pattern,
            id,
            e.code(),
            duration.as_millis(),
            e
        ),
    }

    result
}
