//! 输入处理

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::ClientGame;
use crate::board::{BoardLayout, Canvas};

/// 处理鼠标松开
pub fn handle_pointer_release(
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    layout: Res<BoardLayout>,
    mut game: ResMut<ClientGame>,
    mut canvas: ResMut<Canvas>,
) {
    // 只处理左键松开
    if !mouse_button.just_released(MouseButton::Left) {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor_position) = window.cursor_position() else {
        return;
    };

    // 转换为棋盘局部坐标
    let point = layout.window_to_board(Vec2::new(window.width(), window.height()), cursor_position);

    if let Some(mv) = game.controller.apply_local_move(point, &mut *canvas) {
        tracing::info!("Local move {:?} at {}, next turn {}", mv.mark, mv.cell, game.controller.turn());
    }
}
