//! 核心中间件模块

use axum::{
    body::{Body, HttpBody},
    extract::{Request, State},
    http::{
        header::{ACCEPT_ENCODING, CONTENT_ENCODING, CONTENT_LENGTH, VARY},
        HeaderValue, Method, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use flate2::{write::GzEncoder, Compression};
use std::{io::Write, time::Instant};
use tracing::{debug, info};

use crate::core::error::CoreError;
use crate::infrastructure::config::CompressionConfig;

/// 请求日志中间件
///
/// 除方法、路径、状态和耗时外，还记录响应的内容编码和响应体大小。
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());

    let response = next.run(req).await;
    let duration = start.elapsed();

    let encoding = response
        .headers()
        .get(CONTENT_ENCODING)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("identity");
    let size = body_len(&response)
        .map(|len| format!("{}B", len))
        .unwrap_or_else(|| "-".to_string());

    info!(
        "{} {} - {} - {}ms - {} {} - User-Agent: {:?}",
        method,
        uri,
        response.status(),
        duration.as_millis(),
        encoding,
        size,
        user_agent
    );

    response
}

/// gzip 压缩中间件
///
/// 客户端在 `Accept-Encoding` 中声明支持 gzip 时压缩响应体，否则原样返回。
/// 无论是否压缩都会追加 `Vary: Accept-Encoding`，供缓存区分两种响应。
/// 只缓冲长度已知且不超过 `max_body_bytes` 的响应体，其余原样透传。
pub async fn gzip_middleware(
    State(config): State<CompressionConfig>,
    req: Request,
    next: Next,
) -> Response {
    let accepts_gzip = accepts_gzip(&req);
    let is_head = req.method() == Method::HEAD;

    let mut response = next.run(req).await;
    response
        .headers_mut()
        .append(VARY, HeaderValue::from_static("Accept-Encoding"));

    if !accepts_gzip || is_head || !has_compressible_body(&response) {
        return response;
    }

    let limit = match body_len(&response) {
        Some(len) if len <= config.max_body_bytes => len,
        len => {
            debug!("响应体过大或长度未知，跳过 gzip: {:?}", len);
            return response;
        }
    };

    let (mut parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, limit as usize).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return CoreError::InternalServerError(format!("读取响应体失败: {}", e))
                .into_response()
        }
    };

    let compressed = match gzip_encode(&bytes, config.level.to_flate2()) {
        Ok(compressed) => compressed,
        Err(e) => {
            return CoreError::InternalServerError(format!("gzip 压缩失败: {}", e))
                .into_response()
        }
    };

    debug!("gzip 压缩: {} -> {} 字节", bytes.len(), compressed.len());

    parts
        .headers
        .insert(CONTENT_ENCODING, HeaderValue::from_static("gzip"));
    parts.headers.remove(CONTENT_LENGTH);

    Response::from_parts(parts, Body::from(compressed))
}

/// 响应体长度：优先取响应体自身报告的精确长度，其次取 `Content-Length`
fn body_len(response: &Response) -> Option<u64> {
    response.body().size_hint().exact().or_else(|| {
        response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|h| h.to_str().ok())
            .and_then(|v| v.parse().ok())
    })
}

fn accepts_gzip(req: &Request) -> bool {
    req.headers()
        .get_all(ACCEPT_ENCODING)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .any(|v| v.contains("gzip"))
}

fn has_compressible_body(response: &Response) -> bool {
    let status = response.status();
    if status == StatusCode::NO_CONTENT
        || status == StatusCode::NOT_MODIFIED
        || status == StatusCode::PARTIAL_CONTENT
    {
        return false;
    }
    // 已经编码过的响应不再重复压缩
    !response.headers().contains_key(CONTENT_ENCODING)
}

/// 将数据压缩为 gzip 格式
pub fn gzip_encode(data: &[u8], level: Compression) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), level);
    encoder.write_all(data)?;
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    #[test]
    fn test_gzip_encode_decodes_back() {
        let data = "方法: GET\n".repeat(50);
        let compressed = gzip_encode(data.as_bytes(), Compression::default()).unwrap();
        assert!(compressed.len() < data.len());

        let mut decoded = String::new();
        GzDecoder::new(&compressed[..])
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_body_len_prefers_exact_size() {
        let response = Response::new(Body::from("hola"));
        assert_eq!(body_len(&response), Some(4));

        let response = Response::builder()
            .header(CONTENT_LENGTH, "12")
            .body(Body::empty())
            .unwrap();
        // 空响应体同样报告精确长度 0
        assert_eq!(body_len(&response), Some(0));
    }

    #[test]
    fn test_gzip_encode_empty_input() {
        let compressed = gzip_encode(b"", Compression::fast()).unwrap();
        // gzip 头和尾至少 18 字节
        assert!(compressed.len() >= 18);
    }
}
