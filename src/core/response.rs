//! 核心响应处理模块

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{CoreError, RpcFault};

/// RPC 应答信封
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcReply {
    /// 对应请求的 id
    pub id: String,
    pub response: Option<Value>,
    pub err: Option<RpcFault>,
    pub is_disposed: bool,
}

impl RpcReply {
    pub fn success(id: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            response: Some(data),
            err: None,
            is_disposed: true,
        }
    }

    pub fn failure(id: impl Into<String>, err: CoreError) -> Self {
        Self {
            id: id.into(),
            response: None,
            err: Some(err.into_fault()),
            is_disposed: true,
        }
    }

    pub fn into_result(self) -> Result<Value, RpcFault> {
        match self.err {
            Some(fault) => Err(fault),
            None => Ok(self.response.unwrap_or(Value::Null)),
        }
    }
}
