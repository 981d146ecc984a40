//! 井字棋共享协议库
//!
//! 包含:
//! - 格子坐标映射（线性索引、行列、像素）
//! - 标记、玩家、棋盘状态
//! - 入站/出站消息定义与批次编解码
//! - 传输层抽象 (Connector, Connection, Listener traits)

mod board;
mod cell;
mod codec;
mod constants;
mod error;
mod mark;
mod message;
mod transport;

pub use board::{Board, BoardState};
pub use cell::{cell_to_pixel_rect, pixel_to_cell, section_size, to_cell, to_index, Cell, Point, Rect};
pub use codec::{decode_batch, decode_line, encode_line, join_batch, split_batch};
pub use constants::*;
pub use error::{DecodeError, ProtocolError, RangeError, Result};
pub use mark::{Mark, Player};
pub use message::{GameInfo, PlayerMove, RemoteCommand, WireMessage};
pub use transport::{
    Connection, Connector, Listener,
    WsConnection, WsConnector, WsHandshake, WsListener,
    NetworkConfig,
};
