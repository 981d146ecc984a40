//! 同步通道
//!
//! 在独立线程上运行 tokio runtime 接收推送批次，主循环每帧取走排队的批次。
//! 后台线程只搬运原始文本，从不触碰棋盘状态。

use std::sync::{Arc, Mutex as StdMutex};
use std::thread::JoinHandle;

use ttt_protocol::{Connection, Connector, WsConnector};

/// 连接状态
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Connecting,
    Connected,
    Disconnected,
}

/// 入站同步通道
pub struct SyncChannel {
    /// 接收队列（使用标准库 Mutex 以支持同步访问）
    inbox: Arc<StdMutex<Vec<String>>>,
    status: Arc<StdMutex<ConnectionStatus>>,
    _worker: JoinHandle<()>,
}

impl SyncChannel {
    /// 启动后台线程连接到服务器
    pub fn spawn(url: String) -> std::io::Result<Self> {
        let inbox = Arc::new(StdMutex::new(Vec::new()));
        let status = Arc::new(StdMutex::new(ConnectionStatus::Connecting));

        let worker = {
            let inbox = inbox.clone();
            let status = status.clone();
            std::thread::Builder::new()
                .name("sync-channel".to_string())
                .spawn(move || {
                    let runtime = match tokio::runtime::Builder::new_current_thread()
                        .enable_all()
                        .build()
                    {
                        Ok(rt) => rt,
                        Err(e) => {
                            tracing::error!("Failed to create tokio runtime: {}", e);
                            set_status(&status, ConnectionStatus::Disconnected);
                            return;
                        }
                    };

                    if let Err(e) = runtime.block_on(receive_loop(&url, &inbox, &status)) {
                        tracing::error!("Sync channel to {} stopped: {:#}", url, e);
                    }
                    set_status(&status, ConnectionStatus::Disconnected);
                })?
        };

        Ok(Self {
            inbox,
            status,
            _worker: worker,
        })
    }

    /// 取走所有已到达的批次（按到达顺序）
    pub fn drain_batches(&self) -> Vec<String> {
        if let Ok(mut queue) = self.inbox.lock() {
            std::mem::take(&mut *queue)
        } else {
            Vec::new()
        }
    }

    /// 当前连接状态
    pub fn status(&self) -> ConnectionStatus {
        self.status
            .lock()
            .map(|s| *s)
            .unwrap_or(ConnectionStatus::Disconnected)
    }
}

fn set_status(status: &StdMutex<ConnectionStatus>, value: ConnectionStatus) {
    if let Ok(mut s) = status.lock() {
        *s = value;
    }
}

/// 接收循环，连接断开即结束（不重连）
async fn receive_loop(
    url: &str,
    inbox: &StdMutex<Vec<String>>,
    status: &StdMutex<ConnectionStatus>,
) -> anyhow::Result<()> {
    let mut conn = WsConnector.connect(url).await?;
    set_status(status, ConnectionStatus::Connected);
    tracing::info!("Connected to sync server: {}", url);

    loop {
        let batch = conn.recv_batch().await?;
        tracing::trace!("Received batch: {}", batch);
        if let Ok(mut queue) = inbox.lock() {
            queue.push(batch);
        }
    }
}
