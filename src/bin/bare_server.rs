//! 裸服务器
//! 只绑定端口并启动服务，没有注册任何路由

use http_exercises::infrastructure::{config::load_config, logger::Logger, server};
use std::path::PathBuf;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let (config, _) = load_config(config_path.as_deref())?;

    Logger::init(&config.logging);
    info!("启动裸服务器...");

    server::serve(http_exercises::bare_app(&config), &config.http).await
}
