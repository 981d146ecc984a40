//! 游戏逻辑模块
//!
//! 管理棋盘状态和走子

mod controller;
mod input;

pub use controller::*;
pub use input::*;

use bevy::prelude::*;

use crate::settings::ClientSettings;

/// 游戏插件
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, handle_pointer_release);
    }
}

/// 客户端游戏状态
#[derive(Resource, Default)]
pub struct ClientGame {
    /// 走子控制器，持有棋盘和回合
    pub controller: MoveController,
}

impl ClientGame {
    pub fn from_settings(settings: &ClientSettings) -> Self {
        Self {
            controller: MoveController::new(settings.board_pixel_size, settings.remote_policy),
        }
    }
}
