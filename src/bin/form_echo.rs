//! 表单回显服务器
//! 演示表单处理、请求信息回显与 gzip 压缩中间件

use http_exercises::infrastructure::{config::load_config, logger::Logger, server};
use std::path::PathBuf;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let (config, source) = load_config(config_path.as_deref())?;

    // 初始化日志
    Logger::init(&config.logging);

    match source {
        Some(path) => info!("从配置文件加载: {}", path.display()),
        None => info!("未找到配置文件，使用默认配置"),
    }

    info!("启动表单回显服务器...");
    info!("📖 可用端点:");
    info!("   GET  /            - 首页 ({})", config.static_files.index_file.display());
    info!("   GET  /validacion  - 表单校验 (nombre, email, mensaje)");
    info!("   ANY  /info        - 请求信息回显");
    info!("   GET  /*           - 静态文件 ({})", config.static_files.dir.display());
    if config.compression.enabled {
        info!("💡 gzip 压缩已启用 (级别: {:?})", config.compression.level);
    }

    let app = http_exercises::form_echo_app(&config);
    server::serve(app, &config.http).await
}
