use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ttt_server::{FeedServer, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("ttt_server=debug".parse()?))
        .init();

    info!("井字棋走子服务端启动中...");

    let config = ServerConfig::load();
    let server = FeedServer::bind(config).await?;
    let games = server.run().await?;

    info!("共完成 {} 局", games);
    Ok(())
}
