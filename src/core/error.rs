//! 核心错误处理模块

use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;
use uuid::Uuid;

/// 核心错误类型
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("请求无效: {0}")]
    BadRequest(String),
    #[error("资源不存在: {0}")]
    NotFound(String),
    #[error("服务器内部错误: {0}")]
    InternalServerError(String),
}

/// 错误响应结构
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
    pub timestamp: String,
    pub request_id: String,
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let (status, error_message, user_message) = match self {
            CoreError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            CoreError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            CoreError::InternalServerError(msg) => {
                error!("内部错误: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_SERVER_ERROR",
                    msg,
                )
            }
        };

        let error_response = ErrorResponse {
            error: error_message.to_string(),
            message: user_message,
            code: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            request_id: Uuid::new_v4().to_string(),
        };

        (status, Json(error_response)).into_response()
    }
}

/// 字段声明顺序，决定多个字段同时出错时报告哪一个
const FIELD_ORDER: [&str; 2] = ["name", "price"];

impl From<validator::ValidationErrors> for CoreError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut fields: Vec<(usize, String)> = err
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                let field: &str = field.as_ref();
                let rank = FIELD_ORDER
                    .iter()
                    .position(|f| *f == field)
                    .unwrap_or(FIELD_ORDER.len());
                errors.iter().map(move |error| {
                    let message = error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| "数据校验失败".to_string());
                    (rank, message)
                })
            })
            .collect();
        fields.sort_by_key(|(rank, _)| *rank);

        let message = fields
            .into_iter()
            .next()
            .map(|(_, message)| message)
            .unwrap_or_else(|| "数据校验失败".to_string());
        CoreError::BadRequest(message)
    }
}

/// 未匹配路由的兜底处理器
pub async fn not_found(uri: Uri) -> CoreError {
    CoreError::NotFound(format!("路径 {} 不存在", uri.path()))
}
