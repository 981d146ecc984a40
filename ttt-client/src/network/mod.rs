//! 网络通信模块
//!
//! 后台线程接收推送批次，`Update` 中按到达顺序交给走子控制器

mod connection;

pub use connection::*;

use bevy::prelude::*;

use crate::board::Canvas;
use crate::game::{handle_pointer_release, ClientGame};
use crate::settings::ClientSettings;

/// 网络插件
pub struct NetworkPlugin;

impl Plugin for NetworkPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SyncChannelHandle>()
            .add_systems(Startup, start_sync_channel)
            .add_systems(Update, apply_sync_batches.after(handle_pointer_release));
    }
}

/// 同步通道句柄（Bevy 资源）
#[derive(Resource, Default)]
pub struct SyncChannelHandle {
    pub channel: Option<SyncChannel>,
    /// 上一次观察到的连接状态
    last_status: ConnectionStatus,
}

impl SyncChannelHandle {
    /// 连接状态变化时返回新状态
    pub fn poll_status(&mut self) -> Option<ConnectionStatus> {
        let status = self.channel.as_ref()?.status();
        if status == self.last_status {
            return None;
        }
        self.last_status = status;
        Some(status)
    }
}

/// 启动同步通道
fn start_sync_channel(settings: Res<ClientSettings>, mut handle: ResMut<SyncChannelHandle>) {
    if !settings.sync_enabled {
        tracing::info!("Sync channel disabled, local play only");
        return;
    }

    tracing::info!("Connecting to {}", settings.server_url);
    match SyncChannel::spawn(settings.server_url.clone()) {
        Ok(channel) => handle.channel = Some(channel),
        Err(e) => tracing::error!("Failed to start sync channel: {}", e),
    }
}

/// 处理收到的批次
fn apply_sync_batches(
    mut handle: ResMut<SyncChannelHandle>,
    mut game: ResMut<ClientGame>,
    mut canvas: ResMut<Canvas>,
) {
    match handle.poll_status() {
        Some(ConnectionStatus::Connected) => tracing::info!("Sync channel connected"),
        Some(ConnectionStatus::Disconnected) => {
            tracing::warn!("Sync channel disconnected, remote moves will no longer arrive")
        }
        Some(ConnectionStatus::Connecting) | None => {}
    }

    let Some(channel) = handle.channel.as_ref() else {
        return;
    };

    for batch in channel.drain_batches() {
        let report = game.controller.apply_batch(&batch, &mut *canvas);
        if report.rejected() > 0 {
            tracing::warn!("Batch applied with {} rejected lines: {:?}", report.rejected(), report);
        } else {
            tracing::debug!("Batch applied: {:?}", report);
        }
    }
}
