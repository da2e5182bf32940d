use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::codec::Framed;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::protocol::{frame_codec, RpcRequest};
use crate::app::products::handler::{dispatch, AppState};
use crate::core::error::CoreError;
use crate::core::middleware::request_logging;
use crate::core::response::RpcReply;

static CONN_ID: AtomicU64 = AtomicU64::new(1);

/// TCP RPC 服务端
pub struct RpcServer {
    listener: TcpListener,
    max_frame_length: usize,
}

impl RpcServer {
    pub async fn bind(addr: SocketAddr, max_frame_length: usize) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            max_frame_length,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// 接受连接直到 `shutdown` 完成，然后通知各连接停止读取新请求，
    /// 等已读到的请求全部应答、连接任务退出后才返回
    pub async fn serve<F>(self, state: AppState, shutdown: F) -> io::Result<()>
    where
        F: Future<Output = ()>,
    {
        info!("RPC listening on {}", self.local_addr()?);
        tokio::pin!(shutdown);

        let token = CancellationToken::new();
        let mut connections = JoinSet::new();

        loop {
            tokio::select! {
                accepted = self.listener.accept() => {
                    let (socket, peer) = match accepted {
                        Ok(conn) => conn,
                        Err(e) => {
                            error!("tcp accept err={}", e);
                            continue;
                        }
                    };
                    let conn_id = CONN_ID.fetch_add(1, Ordering::Relaxed);
                    let state = state.clone();
                    let token = token.clone();
                    let max_frame_length = self.max_frame_length;
                    connections.spawn(async move {
                        handle_connection(conn_id, socket, peer, state, max_frame_length, token).await;
                    });
                }
                Some(_) = connections.join_next(), if !connections.is_empty() => {}
                _ = &mut shutdown => {
                    info!("RPC server stopped accepting connections");
                    break;
                }
            }
        }

        drop(self.listener);
        token.cancel();
        info!("draining {} open connections", connections.len());
        while let Some(joined) = connections.join_next().await {
            if let Err(e) = joined {
                error!("connection task failed: {}", e);
            }
        }
        info!("RPC server stopped");

        Ok(())
    }
}

async fn handle_connection(
    conn_id: u64,
    socket: TcpStream,
    peer: SocketAddr,
    state: AppState,
    max_frame_length: usize,
    token: CancellationToken,
) {
    debug!("connection {} opened peer={}", conn_id, peer);

    let framed = Framed::new(socket, frame_codec(max_frame_length));
    let (mut sink, mut stream) = framed.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<RpcReply>();

    let writer = tokio::spawn(async move {
        while let Some(reply) = rx.recv().await {
            let body = match serde_json::to_vec(&reply) {
                Ok(body) => body,
                Err(e) => {
                    error!("serialize reply err={} id={}", e, reply.id);
                    continue;
                }
            };
            if let Err(e) = sink.send(Bytes::from(body)).await {
                warn!("tcp write err={} peer={}", e, peer);
                break;
            }
        }
    });

    loop {
        let frame = tokio::select! {
            frame = stream.next() => frame,
            _ = token.cancelled() => {
                debug!("connection {} stops reading for shutdown", conn_id);
                break;
            }
        };
        let Some(frame) = frame else {
            break;
        };

        match frame {
            Ok(bytes) => {
                let tx = tx.clone();
                let state = state.clone();
                tokio::spawn(async move {
                    let reply = handle_frame(&state, &bytes).await;
                    // 写端关闭说明连接已断开，应答直接丢弃
                    let _ = tx.send(reply);
                });
            }
            Err(e) => {
                error!("tcp read err={} peer={}", e, peer);
                break;
            }
        }
    }

    drop(tx);
    let _ = writer.await;
    debug!("connection {} closed peer={}", conn_id, peer);
}

async fn handle_frame(state: &AppState, bytes: &[u8]) -> RpcReply {
    let request: RpcRequest = match serde_json::from_slice(bytes) {
        Ok(request) => request,
        Err(e) => {
            warn!("invalid request frame: {}", e);
            return RpcReply::failure(
                "",
                CoreError::BadRequest(format!("invalid request frame: {}", e)),
            );
        }
    };

    let RpcRequest { id, pattern, data } = request;
    match request_logging(&id, &pattern, dispatch(state, &pattern, data)).await {
        Ok(response) => RpcReply::success(id, response),
        Err(e) => RpcReply::failure(id, e),
    }
}
