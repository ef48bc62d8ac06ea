//! 商品 REST API
//! 演示内存中的 CRUD 操作与 JSON 编解码

use http_exercises::{
    app::products::service::ProductService,
    infrastructure::{config::load_config, logger::Logger, server},
};
use std::path::PathBuf;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let (config, source) = load_config(config_path.as_deref())?;

    // 初始化日志
    Logger::init(&config.logging);

    if let Some(path) = source {
        info!("从配置文件加载: {}", path.display());
    }

    info!("启动商品 REST API 服务器...");

    let product_service = ProductService::new();
    info!(
        "✅ 已初始化 {} 个示例商品",
        product_service.list_products()?.len()
    );

    info!("📖 API 端点:");
    info!("   GET    /products      - 获取所有商品");
    info!("   POST   /products      - 创建新商品");
    info!("   GET    /products/:id  - 获取特定商品");
    info!("   PUT    /products/:id  - 更新商品");
    info!("   DELETE /products/:id  - 删除商品");

    let app = http_exercises::products_app(&config, product_service);
    server::serve(app, &config.http).await
}
