//! 表单回显处理器

use axum::{
    extract::{ConnectInfo, Request},
    http::{header::CONTENT_TYPE, Method},
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use tracing::debug;

use super::{model::ContactForm, service};
use crate::core::error::CoreError;

const HTML_UTF8: &str = "text/html; charset=utf-8";
const TEXT_UTF8: &str = "text/plain; charset=utf-8";

/// 表单校验：`GET /validacion?nombre=&email=&mensaje=`
///
/// 返回校验结果页面，后面紧跟请求信息。其他方法一律 404。
pub async fn validacion(
    peer: Option<ConnectInfo<SocketAddr>>,
    req: Request,
) -> Result<Response, CoreError> {
    if req.method() != Method::GET {
        return Err(CoreError::NotFound(format!(
            "{} {} 不存在",
            req.method(),
            req.uri().path()
        )));
    }

    let info = service::extract_request_info(req, peer).await?;
    let form = ContactForm::from_params(&info.params);
    debug!("表单校验: {:?}", form);

    let mut body = service::render_validation_page(&form);
    body.push_str(&service::render_request_info(&info));

    Ok(([(CONTENT_TYPE, HTML_UTF8)], body).into_response())
}

/// 请求信息：方法、请求头、GET/POST 参数和客户端 IP
pub async fn info(
    peer: Option<ConnectInfo<SocketAddr>>,
    req: Request,
) -> Result<Response, CoreError> {
    let info = service::extract_request_info(req, peer).await?;
    Ok(([(CONTENT_TYPE, TEXT_UTF8)], service::render_request_info(&info)).into_response())
}
