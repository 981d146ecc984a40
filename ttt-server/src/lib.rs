//! 井字棋走子推送服务端
//!
//! 包含:
//! - 服务端配置
//! - 自对弈走子源
//! - WebSocket 广播服务器

pub mod config;
pub mod feed;
pub mod server;

pub use config::ServerConfig;
pub use feed::{encode_events, FeedEvent, SelfPlay};
pub use server::FeedServer;
