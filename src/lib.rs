//! # HTTP 练习
//!
//! 三个互相独立的 Axum 小练习：
//! - 表单回显：表单校验、请求信息回显，可选 gzip 压缩
//! - 裸服务器：只负责绑定端口并启动服务
//! - 商品 CRUD：内存中的商品资源，JSON 编解码
//!
//! 代码按分层组织：`app` 为应用层，`core` 提供错误处理与中间件，
//! `infrastructure` 负责配置、日志和服务器启动。

pub mod app;
pub mod core;
pub mod infrastructure;

use axum::{middleware, Router};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::app::products::service::ProductService;
use crate::core::{error::not_found, middleware::request_logging_middleware};
use crate::infrastructure::config::Config;

/// 表单回显应用
pub fn form_echo_app(config: &Config) -> Router {
    with_common_layers(
        app::forms::router(&config.static_files, &config.compression),
        config,
    )
}

/// 裸服务器应用：没有任何路由，所有请求都返回 404
pub fn bare_app(config: &Config) -> Router {
    with_common_layers(Router::new().fallback(not_found), config)
}

/// 商品 CRUD 应用
pub fn products_app(config: &Config, product_service: ProductService) -> Router {
    let router = app::products::router(product_service)
        .fallback(not_found)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    with_common_layers(router, config)
}

fn with_common_layers(router: Router, config: &Config) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(request_logging_middleware))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.http.timeout_seconds,
            ))),
    )
}
