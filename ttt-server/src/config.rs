//! 服务端配置
//!
//! 从 `TTT_SERVER_CONFIG` 指向的 JSON 文件加载，缺失字段使用默认值。

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use ttt_protocol::NetworkConfig;

/// 配置文件路径环境变量
pub const CONFIG_ENV: &str = "TTT_SERVER_CONFIG";

/// 服务端配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 监听地址
    pub network: NetworkConfig,
    /// 两步之间的间隔（毫秒）
    pub move_interval_ms: u64,
    /// 每个 epoch 的对局数
    pub games_per_epoch: u32,
    /// 对局数上限，`None` 表示一直运行
    pub max_games: Option<u32>,
    /// 随机种子，`None` 表示使用系统熵
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            move_interval_ms: 500,
            games_per_epoch: 10,
            max_games: None,
            seed: None,
        }
    }
}

impl ServerConfig {
    /// 从指定文件加载
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {:?}", path))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("解析配置文件失败: {:?}", path))?;
        Ok(config)
    }

    /// 按环境变量加载，失败时退回默认配置
    pub fn load() -> Self {
        let Ok(path) = std::env::var(CONFIG_ENV) else {
            tracing::info!("{} not set, using default config", CONFIG_ENV);
            return Self::default();
        };

        match Self::load_from(Path::new(&path)) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path);
                config
            }
            Err(e) => {
                tracing::warn!("{:#}, using default config", e);
                Self::default()
            }
        }
    }
}
