//! 标记与玩家

use serde::{Deserialize, Serialize};

/// 格子上的标记
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// 空
    #[default]
    Empty,
    /// 叉
    X,
    /// 圈
    O,
}

impl Mark {
    pub fn is_empty(&self) -> bool {
        matches!(self, Mark::Empty)
    }

    /// 文本显示字符
    pub fn display_char(&self) -> char {
        match self {
            Mark::Empty => '·',
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

/// 玩家（即当前回合）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// 先手，画 X
    #[default]
    One,
    /// 后手，画 O
    Two,
}

impl Player {
    /// 获取对方
    pub fn opponent(&self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// 该玩家落下的标记
    pub fn mark(&self) -> Mark {
        match self {
            Player::One => Mark::X,
            Player::Two => Mark::O,
        }
    }

    /// 线路上的玩家编号
    pub fn tag(&self) -> i64 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// 从线路上的玩家编号解析，1/2 之外返回 `None`
    pub fn from_tag(tag: i64) -> Option<Player> {
        match tag {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player{}", self.tag())
    }
}
