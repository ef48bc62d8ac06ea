//! 表单回显模块：表单校验、请求信息回显与静态文件

pub mod handler;
pub mod model;
pub mod service;

use axum::{handler::HandlerWithoutStateExt, middleware, routing::any, Router};
use tower_http::services::{ServeDir, ServeFile};

use crate::core::{error::not_found, middleware::gzip_middleware};
use crate::infrastructure::config::{CompressionConfig, StaticFilesConfig};

/// 表单回显路由
///
/// `/` 返回首页文件，其余未匹配的路径从静态目录读取，
/// 找不到文件时与其他 404 一样返回 JSON 错误。
/// 启用压缩时所有路由都经过 gzip 中间件。
pub fn router(static_files: &StaticFilesConfig, compression: &CompressionConfig) -> Router {
    let router = Router::new()
        .route_service("/", ServeFile::new(&static_files.index_file))
        .route("/validacion", any(handler::validacion))
        .route("/info", any(handler::info))
        .fallback_service(
            ServeDir::new(&static_files.dir).not_found_service(not_found.into_service()),
        );

    if compression.enabled {
        router.layer(middleware::from_fn_with_state(compression.clone(), gzip_middleware))
    } else {
        router
    }
}
