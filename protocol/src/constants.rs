//! 协议常量定义

use std::time::Duration;

/// 棋盘边长（行数 = 列数）
pub const GRID_SIZE: usize = 3;

/// 格子总数
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// 默认棋盘像素尺寸
pub const DEFAULT_BOARD_PIXELS: f32 = 500.0;

/// 默认服务端端口
pub const DEFAULT_PORT: u16 = 8080;

/// WebSocket 路径
pub const WS_PATH: &str = "/ws";

/// 单个批次最大字节数
pub const MAX_BATCH_SIZE: usize = 65536;

/// 批次内消息分隔符
pub const BATCH_DELIMITER: char = '\n';

/// 连接超时（秒）
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// 连接超时 Duration
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(CONNECT_TIMEOUT_SECS);
