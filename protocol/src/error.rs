//! 错误类型定义

use thiserror::Error;

/// 坐标越界错误
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    /// 线性索引不在 0..9 内
    #[error("Cell index out of range: {index} (expected 0..9)")]
    Index { index: i64 },

    /// 行列坐标不在 0..3 内
    #[error("Cell coordinate out of range: ({row}, {column})")]
    Coordinate { row: u8, column: u8 },
}

/// 单行消息解码错误
#[derive(Error, Debug)]
pub enum DecodeError {
    /// JSON 语法错误
    #[error("Malformed message: {0}")]
    Json(#[from] serde_json::Error),

    /// 顶层不是 JSON 对象
    #[error("Message is not a JSON object")]
    NotAnObject,

    /// 落子消息缺少整数 `Single`
    #[error("Player {player} message has no integer `Single` field")]
    MissingSingle { player: i64 },
}

/// 协议错误类型
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// WebSocket 错误
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// JSON 序列化错误
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// 消息解码错误
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// 坐标越界
    #[error("Range error: {0}")]
    Range(#[from] RangeError),

    /// 批次大小超限
    #[error("Batch too large: {size} bytes (max: {max})")]
    BatchTooLarge { size: usize, max: usize },

    /// 二进制帧不是 UTF-8 文本
    #[error("Binary frame is not valid UTF-8")]
    NonUtf8Frame,

    /// 连接超时
    #[error("Connection timeout")]
    ConnectionTimeout,

    /// 连接已关闭
    #[error("Connection closed")]
    ConnectionClosed,
}

/// 协议操作结果类型
pub type Result<T> = std::result::Result<T, ProtocolError>;
