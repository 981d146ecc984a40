//! 棋盘渲染模块
//!
//! 负责把棋盘状态画到窗口上。控制器只通过 [`RenderAdapter`] 与这里交互。

mod canvas;
mod render;

pub use canvas::*;
pub use render::*;

use bevy::prelude::*;
use ttt_protocol::{Cell, Mark, Point};

/// 渲染适配器
///
/// 控制器在状态变化后调用这些方法，渲染层不回写任何状态。
pub trait RenderAdapter {
    /// 清空一个格子的内部
    fn clear_cell(&mut self, cell: Cell);

    /// 在格子中央画 X 或 O
    fn draw_mark(&mut self, cell: Cell, mark: Mark);

    /// 重画两横两竖的分隔线（幂等）
    fn draw_grid_lines(&mut self);
}

/// 棋盘插件
pub struct BoardPlugin;

impl Plugin for BoardPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Canvas>()
            .add_systems(Startup, (setup_camera, draw_initial_grid))
            .add_systems(Update, draw_board);
    }
}

/// 棋盘布局配置
///
/// 棋盘居中显示在窗口里；棋盘局部坐标原点在左上角，y 向下。
#[derive(Resource, Clone, Debug)]
pub struct BoardLayout {
    /// 棋盘边长（像素）
    pub board_pixel_size: f32,
}

impl BoardLayout {
    pub fn new(board_pixel_size: f32) -> Self {
        Self { board_pixel_size }
    }

    /// 窗口光标坐标（左上角原点）转棋盘局部坐标
    pub fn window_to_board(&self, window_size: Vec2, cursor: Vec2) -> Point {
        let left = (window_size.x - self.board_pixel_size) / 2.0;
        let top = (window_size.y - self.board_pixel_size) / 2.0;
        Point::new(cursor.x - left, cursor.y - top)
    }

    /// 棋盘局部坐标转世界坐标（相机居中，y 向上）
    pub fn board_to_world(&self, point: Point) -> Vec2 {
        let half = self.board_pixel_size / 2.0;
        Vec2::new(point.x - half, half - point.y)
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn draw_initial_grid(mut canvas: ResMut<Canvas>) {
    canvas.draw_grid_lines();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_to_board_centered() {
        let layout = BoardLayout::new(500.0);
        let window = Vec2::new(700.0, 600.0);

        assert_eq!(layout.window_to_board(window, Vec2::new(100.0, 50.0)), Point::new(0.0, 0.0));
        assert_eq!(layout.window_to_board(window, Vec2::new(600.0, 550.0)), Point::new(500.0, 500.0));
        assert_eq!(layout.window_to_board(window, Vec2::new(50.0, 50.0)), Point::new(-50.0, 0.0));
    }

    #[test]
    fn test_board_to_world() {
        let layout = BoardLayout::new(500.0);
        assert_eq!(layout.board_to_world(Point::new(0.0, 0.0)), Vec2::new(-250.0, 250.0));
        assert_eq!(layout.board_to_world(Point::new(250.0, 250.0)), Vec2::ZERO);
        assert_eq!(layout.board_to_world(Point::new(500.0, 500.0)), Vec2::new(250.0, -250.0));
    }
}
