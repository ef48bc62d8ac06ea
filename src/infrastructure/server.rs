//! 服务器启动

use anyhow::Context;
use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info};

use super::config::HttpConfig;

/// 绑定监听地址并运行服务器，直到收到 Ctrl+C
pub async fn serve(app: Router, config: &HttpConfig) -> anyhow::Result<()> {
    let addr = config.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("无法绑定到 {}", addr))?;

    info!("🚀 服务器监听在 http://localhost:{}", config.port);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .inspect_err(|e| error!("启动服务器失败: {}", e))
    .context("服务器运行失败")?;

    info!("服务器已停止");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("监听关闭信号失败: {}", e);
        std::future::pending::<()>().await;
    }
}
