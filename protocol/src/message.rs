//! 消息类型定义
//!
//! 线路格式是每行一个 JSON 对象，字段名沿用服务端的大写风格：
//! `{"Player": 1, "Single": 4}`。

use serde::{Deserialize, Serialize};

use crate::mark::Player;

/// 入站消息的原始形态
///
/// 字段都可能缺失或类型不对，是否构成落子由解码层判断。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WireMessage {
    #[serde(rename = "Player", default)]
    pub player: Option<serde_json::Value>,
    #[serde(rename = "Single", default)]
    pub single: Option<serde_json::Value>,
}

/// 解码后的远端指令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteCommand {
    /// 在线性索引处落子（索引尚未做范围校验）
    Place { player_tag: i64, index: i64 },
    /// 清空棋盘
    Clear,
}

/// 出站落子消息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMove {
    #[serde(rename = "Player")]
    pub player: i64,
    #[serde(rename = "Single")]
    pub single: i64,
}

impl PlayerMove {
    pub fn new(player: Player, index: usize) -> Self {
        Self {
            player: player.tag(),
            single: index as i64,
        }
    }
}

/// 对局结束通知
///
/// 没有 `Player` 字段，客户端收到后会清空棋盘。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfo {
    #[serde(rename = "Epoch")]
    pub epoch: u32,
    #[serde(rename = "Game")]
    pub game: u32,
}
