//! 棋盘绘制

use bevy::prelude::*;
use ttt_protocol::{cell_to_pixel_rect, section_size, Mark, Point, GRID_SIZE};

use super::{BoardLayout, Canvas};
use crate::theme::ColorTheme;

/// 分隔线两端留白
const LINE_INSET: f32 = 4.0;

/// X 的笔画距格子边缘的比例
const X_INSET_RATIO: f32 = 0.24;

/// O 的半径占格子边长的比例
const O_RADIUS_RATIO: f32 = 0.26;

/// 每帧按画布内容重画
pub fn draw_board(mut gizmos: Gizmos, canvas: Res<Canvas>, layout: Res<BoardLayout>, theme: Res<ColorTheme>) {
    if canvas.has_grid_lines() {
        draw_grid_lines(&mut gizmos, &layout, theme.grid_lines);
    }

    for (cell, mark) in canvas.drawn_marks() {
        let rect = cell_to_pixel_rect(cell, layout.board_pixel_size);
        match mark {
            Mark::X => {
                let inset = rect.width * X_INSET_RATIO;
                let (left, right) = (rect.x + inset, rect.x + rect.width - inset);
                let (top, bottom) = (rect.y + inset, rect.y + rect.height - inset);
                gizmos.line_2d(
                    layout.board_to_world(Point::new(left, top)),
                    layout.board_to_world(Point::new(right, bottom)),
                    theme.x_mark,
                );
                gizmos.line_2d(
                    layout.board_to_world(Point::new(left, bottom)),
                    layout.board_to_world(Point::new(right, top)),
                    theme.x_mark,
                );
            }
            Mark::O => {
                let center = layout.board_to_world(rect.center());
                gizmos.circle_2d(center, rect.width * O_RADIUS_RATIO, theme.o_mark);
            }
            Mark::Empty => {}
        }
    }
}

fn draw_grid_lines(gizmos: &mut Gizmos, layout: &BoardLayout, color: Color) {
    let size = layout.board_pixel_size;
    let section = section_size(size);
    let (start, end) = (LINE_INSET, size - LINE_INSET);

    for i in 1..GRID_SIZE {
        let offset = i as f32 * section;
        // 横线
        gizmos.line_2d(
            layout.board_to_world(Point::new(start, offset)),
            layout.board_to_world(Point::new(end, offset)),
            color,
        );
        // 竖线
        gizmos.line_2d(
            layout.board_to_world(Point::new(offset, start)),
            layout.board_to_world(Point::new(offset, end)),
            color,
        );
    }
}
