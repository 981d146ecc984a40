//! 棋盘状态

use serde::{Deserialize, Serialize};

use crate::cell::{to_index, Cell};
use crate::constants::{CELL_COUNT, GRID_SIZE};
use crate::mark::{Mark, Player};

/// 棋盘
///
/// 只是一个 3x3 的容器，不做任何规则校验；传入的格子由坐标映射层预先校验，
/// 越界的格子被忽略。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// 索引为 row * 3 + column
    cells: [Mark; CELL_COUNT],
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            cells: [Mark::Empty; CELL_COUNT],
        }
    }

    /// 获取指定格子的标记
    pub fn get(&self, cell: Cell) -> Mark {
        match to_index(cell) {
            Ok(index) => self.cells[index],
            Err(_) => Mark::Empty,
        }
    }

    /// 设置指定格子的标记
    pub fn set(&mut self, cell: Cell, mark: Mark) {
        if let Ok(index) = to_index(cell) {
            self.cells[index] = mark;
        }
    }

    /// 清空全部格子
    pub fn reset_all(&mut self) {
        self.cells = [Mark::Empty; CELL_COUNT];
    }

    /// 是否全部为空
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Mark::is_empty)
    }

    /// 已落子的格子数
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|m| !m.is_empty()).count()
    }

    /// 所有空格子（行优先）
    pub fn empty_cells(&self) -> Vec<Cell> {
        Cell::all().filter(|cell| self.get(*cell).is_empty()).collect()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.cells.chunks(GRID_SIZE).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = row.iter().map(|m| m.display_char().to_string()).collect();
            write!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// 完整的棋盘状态（棋盘 + 当前回合）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    /// 棋盘
    pub board: Board,
    /// 当前回合
    pub turn: Player,
}

impl BoardState {
    /// 创建初始状态：空棋盘，玩家一先手
    pub fn initial() -> Self {
        Self {
            board: Board::empty(),
            turn: Player::One,
        }
    }

    /// 切换回合
    pub fn switch_turn(&mut self) {
        self.turn = self.turn.opponent();
    }
}
