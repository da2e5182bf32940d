//! RPC 客户端，按顺序一问一答

use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio_util::codec::{Framed, LengthDelimitedCodec};
use uuid::Uuid;

use super::protocol::{frame_codec, RpcRequest};
use crate::core::error::RpcFault;
use crate::core::response::RpcReply;

const DEFAULT_MAX_FRAME_LENGTH: usize = 8 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{} ({}): {}", .0.error, .0.status, .0.message)]
    Fault(RpcFault),
    #[error("connection closed by server")]
    Closed,
    #[error("reply id mismatch: expected {expected}, got {got}")]
    UnexpectedReply { expected: String, got: String },
}

pub struct RpcClient {
    framed: Framed<TcpStream, LengthDelimitedCodec>,
}

impl RpcClient {
    pub async fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self, ClientError> {
        let socket = TcpStream::connect(addr).await?;
        Ok(Self {
            framed: Framed::new(socket, frame_codec(DEFAULT_MAX_FRAME_LENGTH)),
        })
    }

    /// 发送一条消息并把应答解码为 `R`，远端错误转为 `ClientError::Fault`
    pub async fn send<T, R>(&mut self, pattern: &str, data: &T) -> Result<R, ClientError>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let id = Uuid::new_v4().to_string();
        let request = RpcRequest::new(id.clone(), pattern, serde_json::to_value(data)?);

        self.send_frame(Bytes::from(serde_json::to_vec(&request)?))
            .await?;
        let reply = self.next_reply().await?;

        if reply.id != id {
            return Err(ClientError::UnexpectedReply {
                expected: id,
                got: reply.id,
            });
        }

        let response = reply.into_result().map_err(ClientError::Fault)?;
        Ok(serde_json::from_value(response)?)
    }

    /// 发送原始帧，不做任何编码
    pub async fn send_frame(&mut self, frame: Bytes) -> Result<(), ClientError> {
        self.framed.send(frame).await?;
        Ok(())
    }

    pub async fn next_reply(&mut self) -> Result<RpcReply, ClientError> {
        match self.framed.next().await {
            Some(frame) => Ok(serde_json::from_slice(&frame?)?),
            None => Err(ClientError::Closed),
        }
    }
}
