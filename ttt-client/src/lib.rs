//! 井字棋客户端
//!
//! 使用 Bevy 引擎实现的井字棋客户端，本地点击落子，同时接收推送服务器的走子

pub mod board;
pub mod game;
pub mod network;
pub mod settings;
pub mod theme;

use bevy::prelude::*;

use crate::board::BoardLayout;
use crate::game::ClientGame;
use crate::settings::ClientSettings;

/// 客户端插件
pub struct TicTacToeClientPlugin {
    pub settings: ClientSettings,
}

impl TicTacToeClientPlugin {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }
}

impl Plugin for TicTacToeClientPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.settings.clone())
            .insert_resource(BoardLayout::new(self.settings.board_pixel_size))
            .insert_resource(ClientGame::from_settings(&self.settings))
            .add_plugins((
                theme::ThemePlugin,
                board::BoardPlugin,
                game::GamePlugin,
                network::NetworkPlugin,
            ));
    }
}
