//! 格子坐标映射
//!
//! 线性索引 (0-8) 与 (行, 列) 之间的互相转换，以及格子与像素矩形之间的几何换算。
//! 所有换算都集中在这里，其他模块不自行计算 `row * 3 + column`。
//!
//! 像素约定：行号对应水平方向 (x)，列号对应竖直方向 (y)，原点在棋盘左上角。

use serde::{Deserialize, Serialize};

use crate::constants::{CELL_COUNT, GRID_SIZE};
use crate::error::RangeError;

/// 棋盘格子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// 行 (0-2)
    pub row: u8,
    /// 列 (0-2)
    pub column: u8,
}

impl Cell {
    /// 创建新格子
    pub fn new(row: u8, column: u8) -> Result<Self, RangeError> {
        let cell = Self { row, column };
        if cell.is_valid() {
            Ok(cell)
        } else {
            Err(RangeError::Coordinate { row, column })
        }
    }

    /// 创建新格子（不检查边界，内部使用）
    pub const fn new_unchecked(row: u8, column: u8) -> Self {
        Self { row, column }
    }

    /// 检查格子是否在棋盘内
    pub fn is_valid(&self) -> bool {
        (self.row as usize) < GRID_SIZE && (self.column as usize) < GRID_SIZE
    }

    /// 按行优先顺序遍历全部 9 个格子
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..GRID_SIZE as u8)
            .flat_map(|row| (0..GRID_SIZE as u8).map(move |column| Cell::new_unchecked(row, column)))
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// 棋盘局部像素坐标
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 像素矩形（左上角 + 宽高）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// 矩形中心
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// 点是否落在矩形内（上下边界都包含）
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// 线性索引转格子
pub fn to_cell(index: i64) -> Result<Cell, RangeError> {
    if !(0..CELL_COUNT as i64).contains(&index) {
        return Err(RangeError::Index { index });
    }
    let size = GRID_SIZE as i64;
    Ok(Cell::new_unchecked((index / size) as u8, (index % size) as u8))
}

/// 格子转线性索引
pub fn to_index(cell: Cell) -> Result<usize, RangeError> {
    if !cell.is_valid() {
        return Err(RangeError::Coordinate {
            row: cell.row,
            column: cell.column,
        });
    }
    Ok(cell.row as usize * GRID_SIZE + cell.column as usize)
}

/// 每个格子的像素边长
pub fn section_size(board_pixel_size: f32) -> f32 {
    board_pixel_size / GRID_SIZE as f32
}

/// 像素坐标转格子
///
/// 按行优先顺序扫描，第一个包含该点的格子胜出。
/// 格子的上下边界都是闭区间，所以恰好落在分隔线上的点同时属于两个格子，
/// 此时返回索引较小的那个。棋盘外（或 NaN）返回 `None`。
pub fn pixel_to_cell(point: Point, board_pixel_size: f32) -> Option<Cell> {
    Cell::all().find(|cell| cell_to_pixel_rect(*cell, board_pixel_size).contains(point))
}

/// 格子转像素矩形
pub fn cell_to_pixel_rect(cell: Cell, board_pixel_size: f32) -> Rect {
    let section = section_size(board_pixel_size);
    Rect {
        x: cell.row as f32 * section,
        y: cell.column as f32 * section,
        width: section,
        height: section,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for i in 0..9 {
            let cell = to_cell(i).unwrap();
            let back = to_index(cell).unwrap();
            assert_eq!(back as i64, i);
            assert_eq!(to_cell(back as i64).unwrap(), cell);
        }
    }

    #[test]
    fn test_index_mapping() {
        assert_eq!(to_cell(0).unwrap(), Cell::new_unchecked(0, 0));
        assert_eq!(to_cell(4).unwrap(), Cell::new_unchecked(1, 1));
        assert_eq!(to_cell(5).unwrap(), Cell::new_unchecked(1, 2));
        assert_eq!(to_cell(8).unwrap(), Cell::new_unchecked(2, 2));
    }

    #[test]
    fn test_index_out_of_range() {
        for i in [-100, -1, 9, 10, i64::MAX, i64::MIN] {
            assert_eq!(to_cell(i), Err(RangeError::Index { index: i }));
        }
    }

    #[test]
    fn test_cell_out_of_range() {
        assert!(Cell::new(3, 0).is_err());
        assert!(Cell::new(0, 3).is_err());
        assert_eq!(
            to_index(Cell::new_unchecked(1, 3)),
            Err(RangeError::Coordinate { row: 1, column: 3 })
        );
    }

    #[test]
    fn test_all_cells_row_major() {
        let indices: Vec<usize> = Cell::all().map(|c| to_index(c).unwrap()).collect();
        assert_eq!(indices, (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn test_pixel_to_cell() {
        // 行号沿 x 方向
        assert_eq!(pixel_to_cell(Point::new(10.0, 10.0), 300.0), Some(Cell::new_unchecked(0, 0)));
        assert_eq!(pixel_to_cell(Point::new(250.0, 10.0), 300.0), Some(Cell::new_unchecked(2, 0)));
        assert_eq!(pixel_to_cell(Point::new(10.0, 250.0), 300.0), Some(Cell::new_unchecked(0, 2)));
        assert_eq!(pixel_to_cell(Point::new(150.0, 150.0), 300.0), Some(Cell::new_unchecked(1, 1)));
    }

    #[test]
    fn test_pixel_boundary_prefers_lower_section() {
        assert_eq!(pixel_to_cell(Point::new(100.0, 50.0), 300.0), Some(Cell::new_unchecked(0, 0)));
        assert_eq!(pixel_to_cell(Point::new(200.0, 200.0), 300.0), Some(Cell::new_unchecked(1, 1)));
        assert_eq!(pixel_to_cell(Point::new(300.0, 300.0), 300.0), Some(Cell::new_unchecked(2, 2)));
        assert_eq!(pixel_to_cell(Point::new(0.0, 0.0), 300.0), Some(Cell::new_unchecked(0, 0)));
    }

    #[test]
    fn test_pixel_outside_board() {
        assert_eq!(pixel_to_cell(Point::new(-1.0, 10.0), 300.0), None);
        assert_eq!(pixel_to_cell(Point::new(10.0, 300.5), 300.0), None);
        assert_eq!(pixel_to_cell(Point::new(f32::NAN, 10.0), 300.0), None);
    }

    #[test]
    fn test_cell_to_pixel_rect() {
        let rect = cell_to_pixel_rect(Cell::new_unchecked(2, 1), 300.0);
        assert_eq!(
            rect,
            Rect {
                x: 200.0,
                y: 100.0,
                width: 100.0,
                height: 100.0
            }
        );
        assert_eq!(rect.center(), Point::new(250.0, 150.0));

        // 矩形中心反推回同一个格子
        for cell in Cell::all() {
            let center = cell_to_pixel_rect(cell, 500.0).center();
            assert_eq!(pixel_to_cell(center, 500.0), Some(cell));
        }
    }
}
