//! 核心错误处理模块

use serde::{Deserialize, Serialize};
use tracing::error;

/// 核心错误类型
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    NoHandler(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error("{0}")]
    InternalServerError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

/// 返回给调用方的结构化错误
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcFault {
    pub status: u16,
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl CoreError {
    pub fn product_not_found(id: i32) -> Self {
        CoreError::NotFound(format!("Product with id {} not found", id))
    }

    pub fn status(&self) -> u16 {
        match self {
            CoreError::BadRequest(_) => 400,
            CoreError::NotFound(_) | CoreError::NoHandler(_) => 404,
            CoreError::Database(_) | CoreError::InternalServerError(_) => 500,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            CoreError::BadRequest(_) => "BAD_REQUEST",
            CoreError::NotFound(_) => "NOT_FOUND",
            CoreError::NoHandler(_) => "NO_HANDLER",
            CoreError::Database(_) => "DATABASE_ERROR",
            CoreError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn into_fault(self) -> RpcFault {
        if let CoreError::Database(e) = &self {
            error!("Database error: {}", e);
        }

        RpcFault {
            status: self.status(),
            error: self.code().to_string(),
            message: self.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = err
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field))
                })
            })
            .collect();
        messages.sort();

        CoreError::BadRequest(messages.join(", "))
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::BadRequest(err.to_string())
    }
}
