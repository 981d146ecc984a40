//! 服务器主逻辑
//!
//! 走子源按固定间隔产生批次，通过广播通道推送给所有已连接的客户端。
//! 客户端只接收，不回传走子。

use std::time::Duration;

use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use ttt_protocol::{Connection, Listener, ProtocolError, WsConnection, WsListener, WS_PATH};

use crate::config::ServerConfig;
use crate::feed::{encode_events, SelfPlay};

/// 广播通道容量（批次数）
const BROADCAST_CAPACITY: usize = 64;

/// 走子推送服务器
pub struct FeedServer {
    config: ServerConfig,
    listener: WsListener,
    tx: broadcast::Sender<String>,
}

impl FeedServer {
    /// 绑定监听地址
    pub async fn bind(config: ServerConfig) -> anyhow::Result<Self> {
        let listener = WsListener::bind(&config.network.bind_addr()).await?;
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Ok(Self { config, listener, tx })
    }

    /// 实际监听地址
    pub fn local_addr(&self) -> Option<String> {
        self.listener.local_addr()
    }

    /// 运行直到达到对局数上限，返回完成的对局数
    pub async fn run(self) -> anyhow::Result<u32> {
        let Self { config, listener, tx } = self;

        if let Some(addr) = listener.local_addr() {
            info!("Feed server listening on ws://{}{}", addr, WS_PATH);
        }

        let accept_handle = tokio::spawn(accept_loop(listener, tx.clone()));
        let games = run_feed(&config, tx).await?;
        accept_handle.abort();

        info!(games, "Feed finished");
        Ok(games)
    }
}

/// 接受连接，握手在各自的任务中完成，完成后订阅广播
async fn accept_loop(mut listener: WsListener, tx: broadcast::Sender<String>) {
    loop {
        match listener.accept_tcp().await {
            Ok(pending) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let peer = pending.peer_addr();
                    match pending.complete().await {
                        Ok(conn) => {
                            info!("Client connected: {}", peer);
                            serve_connection(conn, tx.subscribe()).await;
                        }
                        // 握手失败只影响这一个连接
                        Err(e) => warn!("Handshake with {} failed: {}", peer, e),
                    }
                });
            }
            Err(e) => warn!("Accept failed: {}", e),
        }
    }
}

/// 把广播批次转发给单个客户端，客户端发来的文本忽略
async fn serve_connection(
    mut conn: WsConnection<tokio::net::TcpStream>,
    mut rx: broadcast::Receiver<String>,
) {
    let peer = conn.peer_addr();
    loop {
        tokio::select! {
            received = rx.recv() => match received {
                Ok(batch) => {
                    if let Err(e) = conn.send_batch(&batch).await {
                        info!("Client {:?} dropped: {}", peer, e);
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // 不做补发
                    warn!("Client {:?} lagged, {} batches skipped", peer, skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            inbound = conn.recv_batch() => match inbound {
                Ok(_) => debug!("Ignoring inbound batch from {:?}", peer),
                Err(ProtocolError::ConnectionClosed) => {
                    info!("Client {:?} disconnected", peer);
                    break;
                }
                Err(e) => {
                    info!("Client {:?} dropped: {}", peer, e);
                    break;
                }
            },
        }
    }
    let _ = conn.close().await;
}

/// 驱动走子源
///
/// 没有订阅者时暂停，不推进对局。
async fn run_feed(config: &ServerConfig, tx: broadcast::Sender<String>) -> anyhow::Result<u32> {
    let mut feed = SelfPlay::new(config.games_per_epoch, config.seed);
    let mut ticker = tokio::time::interval(Duration::from_millis(config.move_interval_ms.max(1)));

    loop {
        if let Some(max) = config.max_games {
            if feed.games_finished() >= max {
                return Ok(feed.games_finished());
            }
        }

        ticker.tick().await;
        if tx.receiver_count() == 0 {
            continue;
        }

        let events = feed.step();
        if events.is_empty() {
            continue;
        }
        let batch = encode_events(&events)?;
        debug!("Broadcasting batch: {}", batch);
        if tx.send(batch).is_err() {
            debug!("No subscribers, batch dropped");
        }
    }
}
