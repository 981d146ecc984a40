//! 画布模型
//!
//! 记录屏幕上每个格子当前画着什么。Gizmos 每帧重画，所以“清空”就是不再画。

use bevy::prelude::*;
use ttt_protocol::{to_index, Cell, Mark, CELL_COUNT};

use super::RenderAdapter;

/// 画布
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct Canvas {
    cells: [Option<Mark>; CELL_COUNT],
    grid_lines: bool,
}

impl Canvas {
    /// 格子上画着的标记
    pub fn mark_at(&self, cell: Cell) -> Option<Mark> {
        to_index(cell).ok().and_then(|index| self.cells[index])
    }

    /// 是否已经画过分隔线
    pub fn has_grid_lines(&self) -> bool {
        self.grid_lines
    }

    /// 所有画着标记的格子
    pub fn drawn_marks(&self) -> impl Iterator<Item = (Cell, Mark)> + '_ {
        Cell::all().filter_map(|cell| self.mark_at(cell).map(|mark| (cell, mark)))
    }
}

impl RenderAdapter for Canvas {
    fn clear_cell(&mut self, cell: Cell) {
        if let Ok(index) = to_index(cell) {
            self.cells[index] = None;
        }
    }

    fn draw_mark(&mut self, cell: Cell, mark: Mark) {
        if let Ok(index) = to_index(cell) {
            self.cells[index] = match mark {
                Mark::Empty => None,
                mark => Some(mark),
            };
        }
    }

    fn draw_grid_lines(&mut self) {
        self.grid_lines = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{MoveController, RemotePolicy};

    #[test]
    fn test_canvas_follows_draw_calls() {
        let mut canvas = Canvas::default();
        let center = Cell::new_unchecked(1, 1);

        canvas.draw_mark(center, Mark::X);
        assert_eq!(canvas.mark_at(center), Some(Mark::X));

        canvas.draw_mark(center, Mark::O);
        assert_eq!(canvas.mark_at(center), Some(Mark::O));

        canvas.clear_cell(center);
        assert_eq!(canvas.mark_at(center), None);
    }

    #[test]
    fn test_canvas_mirrors_unified_board() {
        let mut controller = MoveController::new(300.0, RemotePolicy::Unified);
        let mut canvas = Canvas::default();

        controller.apply_batch("{\"Player\":1,\"Single\":2}\n{\"Player\":2,\"Single\":6}", &mut canvas);

        let drawn: Vec<(Cell, Mark)> = canvas.drawn_marks().collect();
        assert_eq!(
            drawn,
            vec![(Cell::new_unchecked(0, 2), Mark::X), (Cell::new_unchecked(2, 0), Mark::O)]
        );
        for (cell, mark) in drawn {
            assert_eq!(controller.board().get(cell), mark);
        }

        controller.apply_batch("{\"Player\":0}", &mut canvas);
        assert_eq!(canvas.drawn_marks().count(), 0);
        assert!(controller.board().is_empty());
    }

    #[test]
    fn test_grid_lines_flag() {
        let mut canvas = Canvas::default();
        assert!(!canvas.has_grid_lines());
        canvas.draw_grid_lines();
        canvas.draw_grid_lines();
        assert!(canvas.has_grid_lines());
    }
}
