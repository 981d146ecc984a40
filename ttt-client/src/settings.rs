//! 客户端设置模块
//!
//! 提供设置数据结构与加载；设置文件只读，客户端不会写回。

use bevy::log::Level;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use ttt_protocol::{NetworkConfig, DEFAULT_BOARD_PIXELS};

use crate::game::RemotePolicy;

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level(self) -> Level {
        match self {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

/// 客户端设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct ClientSettings {
    // === 网络设置 ===
    /// 走子推送服务器地址
    pub server_url: String,
    /// 是否连接推送服务器
    pub sync_enabled: bool,

    // === 棋盘设置 ===
    /// 棋盘边长（像素）
    pub board_pixel_size: f32,
    /// 远端落子是否写入棋盘状态
    pub remote_policy: RemotePolicy,

    // === 高级设置 ===
    /// 日志级别
    pub log_level: LogLevel,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: NetworkConfig::default().ws_url(),
            sync_enabled: true,
            board_pixel_size: DEFAULT_BOARD_PIXELS,
            remote_policy: RemotePolicy::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl ClientSettings {
    /// 获取设置文件路径
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("tic-tac-toe");
            path.push("settings.json");
            path
        })
    }

    /// 从默认位置加载设置
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            tracing::warn!("无法获取配置目录，使用默认设置");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// 从指定文件加载设置，缺失或无效时使用默认设置
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::info!("设置文件不存在，使用默认设置");
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                tracing::warn!("设置文件格式无效: {}，使用默认设置", e);
                Self::default()
            }),
            Err(e) => {
                tracing::warn!("无法读取设置文件: {}，使用默认设置", e);
                Self::default()
            }
        }
    }

    /// 解析设置内容
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(content)?;
        if !(settings.board_pixel_size.is_finite() && settings.board_pixel_size > 0.0) {
            tracing::warn!("棋盘尺寸无效: {}，使用默认值", settings.board_pixel_size);
            settings.board_pixel_size = DEFAULT_BOARD_PIXELS;
        }
        Ok(settings)
    }
}
