//! 传输层抽象
//!
//! 提供 Connector/Connection/Listener traits 使上层同步逻辑与具体传输实现解耦。
//! 当前实现基于 WebSocket：每个文本帧承载一个批次。

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::http::StatusCode;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, warn};

use crate::error::{ProtocolError, Result};
use crate::{CONNECT_TIMEOUT, DEFAULT_PORT, MAX_BATCH_SIZE, WS_PATH};

/// 网络配置
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub host: String,
    pub port: u16,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl NetworkConfig {
    /// 监听地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 客户端连接用的 WebSocket URL
    pub fn ws_url(&self) -> String {
        format!("ws://{}:{}{}", self.host, self.port, WS_PATH)
    }
}

/// 连接抽象 trait（核心抽象，用于业务层）
#[async_trait]
pub trait Connection: Send + Sync {
    /// 发送一个批次
    async fn send_batch(&mut self, batch: &str) -> Result<()>;

    /// 接收一个批次
    async fn recv_batch(&mut self) -> Result<String>;

    /// 关闭连接
    async fn close(&mut self) -> Result<()>;

    /// 获取远端地址
    fn peer_addr(&self) -> Option<String>;
}

/// 连接器 trait（客户端使用）
#[async_trait]
pub trait Connector: Send + Sync {
    type Conn: Connection;

    /// 建立连接
    async fn connect(&self, url: &str) -> Result<Self::Conn>;
}

/// 监听器 trait（服务端使用）
#[async_trait]
pub trait Listener: Send + Sync + Sized {
    type Conn: Connection;

    /// 绑定地址
    async fn bind(addr: &str) -> Result<Self>;

    /// 接受连接
    async fn accept(&mut self) -> Result<Self::Conn>;

    /// 获取本地地址
    fn local_addr(&self) -> Option<String>;
}

// ============================================================================
// WebSocket 实现
// ============================================================================

/// WebSocket 连接器
pub struct WsConnector;

#[async_trait]
impl Connector for WsConnector {
    type Conn = WsConnection<MaybeTlsStream<TcpStream>>;

    async fn connect(&self, url: &str) -> Result<Self::Conn> {
        let (stream, _response) = timeout(CONNECT_TIMEOUT, tokio_tungstenite::connect_async(url))
            .await
            .map_err(|_| ProtocolError::ConnectionTimeout)??;

        let peer_addr = match stream.get_ref() {
            MaybeTlsStream::Plain(tcp) => tcp.peer_addr().ok().map(|a| a.to_string()),
            _ => None,
        };

        Ok(WsConnection::new(stream, peer_addr))
    }
}

/// WebSocket 连接
pub struct WsConnection<S> {
    stream: WebSocketStream<S>,
    peer_addr: Option<String>,
}

impl<S> WsConnection<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + Sync,
{
    /// 包装已完成握手的流
    pub fn new(stream: WebSocketStream<S>, peer_addr: Option<String>) -> Self {
        Self { stream, peer_addr }
    }
}

#[async_trait]
impl<S> Connection for WsConnection<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + Sync,
{
    async fn send_batch(&mut self, batch: &str) -> Result<()> {
        if batch.len() > MAX_BATCH_SIZE {
            warn!("Refusing to send {} byte batch to {:?}", batch.len(), self.peer_addr);
            return Err(ProtocolError::BatchTooLarge {
                size: batch.len(),
                max: MAX_BATCH_SIZE,
            });
        }
        self.stream.send(Message::Text(batch.to_string())).await?;
        Ok(())
    }

    async fn recv_batch(&mut self) -> Result<String> {
        loop {
            let Some(frame) = self.stream.next().await else {
                return Err(ProtocolError::ConnectionClosed);
            };

            let text = match frame? {
                Message::Text(text) => text,
                Message::Binary(bytes) => {
                    String::from_utf8(bytes).map_err(|_| ProtocolError::NonUtf8Frame)?
                }
                Message::Close(frame) => {
                    debug!("Peer {:?} closed: {:?}", self.peer_addr, frame);
                    return Err(ProtocolError::ConnectionClosed);
                }
                // ping/pong 由 tungstenite 自动应答
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => continue,
            };

            if text.len() > MAX_BATCH_SIZE {
                warn!("Dropping {} byte batch from {:?}", text.len(), self.peer_addr);
                return Err(ProtocolError::BatchTooLarge {
                    size: text.len(),
                    max: MAX_BATCH_SIZE,
                });
            }
            return Ok(text);
        }
    }

    async fn close(&mut self) -> Result<()> {
        match self.stream.close(None).await {
            Ok(()) => Ok(()),
            Err(tokio_tungstenite::tungstenite::Error::ConnectionClosed) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn peer_addr(&self) -> Option<String> {
        self.peer_addr.clone()
    }
}

/// WebSocket 监听器，只接受 `WS_PATH` 上的握手
pub struct WsListener {
    listener: tokio::net::TcpListener,
}

impl WsListener {
    /// 只接受 TCP 连接，握手留给 [`WsHandshake::complete`]
    ///
    /// 握手应放到每个连接自己的任务中完成。
    pub async fn accept_tcp(&mut self) -> Result<WsHandshake> {
        let (stream, addr) = self.listener.accept().await.map_err(ProtocolError::Io)?;
        stream.set_nodelay(true)?;
        Ok(WsHandshake { stream, addr })
    }
}

#[async_trait]
impl Listener for WsListener {
    type Conn = WsConnection<TcpStream>;

    async fn bind(addr: &str) -> Result<Self> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(ProtocolError::Io)?;
        Ok(Self { listener })
    }

    async fn accept(&mut self) -> Result<Self::Conn> {
        self.accept_tcp().await?.complete().await
    }

    fn local_addr(&self) -> Option<String> {
        self.listener.local_addr().ok().map(|a| a.to_string())
    }
}

/// 已接受但尚未完成 WebSocket 握手的连接
pub struct WsHandshake {
    stream: TcpStream,
    addr: SocketAddr,
}

impl WsHandshake {
    /// 对端地址
    pub fn peer_addr(&self) -> SocketAddr {
        self.addr
    }

    /// 完成握手，超过 `CONNECT_TIMEOUT` 视为失败
    pub async fn complete(self) -> Result<WsConnection<TcpStream>> {
        let Self { stream, addr } = self;

        let check_path = move |request: &Request, response: Response| {
            if request.uri().path() == WS_PATH {
                Ok(response)
            } else {
                warn!("Rejecting handshake from {} for path {}", addr, request.uri().path());
                let mut rejection = ErrorResponse::new(Some(format!("unknown path {}", request.uri().path())));
                *rejection.status_mut() = StatusCode::NOT_FOUND;
                Err(rejection)
            }
        };

        let stream = timeout(CONNECT_TIMEOUT, tokio_tungstenite::accept_hdr_async(stream, check_path))
            .await
            .map_err(|_| {
                warn!("Handshake from {} timed out", addr);
                ProtocolError::ConnectionTimeout
            })??;
        debug!("Handshake completed with {}", addr);
        Ok(WsConnection::new(stream, Some(addr.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ws_connection() {
        // 启动监听
        let mut listener = WsListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // 客户端连接
        let client_handle = tokio::spawn(async move {
            let connector = WsConnector;
            let mut conn = connector.connect(&format!("ws://{}{}", addr, WS_PATH)).await.unwrap();
            assert!(conn.peer_addr().is_some());

            let batch = conn.recv_batch().await.unwrap();
            assert_eq!(batch, "{\"Player\":1,\"Single\":0}\n{\"Player\":2,\"Single\":8}");

            conn.send_batch("ack").await.unwrap();
        });

        // 服务端接受连接
        let mut conn = listener.accept().await.unwrap();
        conn.send_batch("{\"Player\":1,\"Single\":0}\n{\"Player\":2,\"Single\":8}")
            .await
            .unwrap();

        assert_eq!(conn.recv_batch().await.unwrap(), "ack");

        client_handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_wrong_path_rejected() {
        let mut listener = WsListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let client_handle = tokio::spawn(async move {
            WsConnector.connect(&format!("ws://{}/other", addr)).await
        });

        assert!(listener.accept().await.is_err());
        assert!(client_handle.await.unwrap().is_err());
    }

    #[tokio::test]
    async fn test_oversized_batch_rejected() {
        let mut listener = WsListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let client_handle = tokio::spawn(async move {
            let _conn = WsConnector.connect(&format!("ws://{}{}", addr, WS_PATH)).await.unwrap();
        });

        let mut conn = listener.accept().await.unwrap();
        let big = "x".repeat(MAX_BATCH_SIZE + 1);
        assert!(matches!(
            conn.send_batch(&big).await,
            Err(ProtocolError::BatchTooLarge { .. })
        ));

        client_handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_silent_peer_handshake_times_out() {
        let mut listener = WsListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // 只建立 TCP 连接，不发送握手请求
        let _silent = TcpStream::connect(addr.as_str()).await.unwrap();
        let pending = listener.accept_tcp().await.unwrap();
        assert!(pending.peer_addr().ip().is_loopback());

        assert!(matches!(
            pending.complete().await,
            Err(ProtocolError::ConnectionTimeout)
        ));
    }

    #[test]
    fn test_network_config_urls() {
        let config = NetworkConfig::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.ws_url(), "ws://127.0.0.1:8080/ws");
    }
}
