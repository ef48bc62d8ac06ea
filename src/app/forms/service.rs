//! 表单回显服务：解析请求并渲染响应内容

use axum::{
    extract::{ConnectInfo, Request},
    http::{header::CONTENT_TYPE, Method},
};
use std::borrow::Cow;
use std::fmt::Write;
use std::net::SocketAddr;

use super::model::{ContactForm, FormParams, RequestInfo};
use crate::core::error::CoreError;

type Pairs = Vec<(String, String)>;

/// 表单请求体的最大字节数
const MAX_FORM_BYTES: usize = 10 << 20;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// 从请求中提取方法、请求头、参数和客户端 IP
///
/// 参数合并规则：表单请求体中的取值排在查询字符串中的取值之前。
/// 只有 POST/PUT/PATCH 且 `Content-Type` 为 urlencoded 的请求才会读取请求体。
pub async fn extract_request_info(
    req: Request,
    peer: Option<ConnectInfo<SocketAddr>>,
) -> Result<RequestInfo, CoreError> {
    let method = req.method().clone();

    let mut headers: Vec<(String, Vec<String>)> = Vec::new();
    for name in req.headers().keys() {
        let values = req
            .headers()
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect();
        headers.push((name.to_string(), values));
    }

    let client_ip = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
        .or_else(|| peer.map(|ConnectInfo(addr)| addr.to_string()))
        .unwrap_or_else(|| "unknown".to_string());

    let query = match req.uri().query() {
        Some(raw) => parse_urlencoded(raw)?,
        None => Vec::new(),
    };

    let body = if has_form_body(&req) {
        let bytes = axum::body::to_bytes(req.into_body(), MAX_FORM_BYTES)
            .await
            .map_err(|e| CoreError::BadRequest(format!("读取表单失败: {}", e)))?;
        let raw = std::str::from_utf8(&bytes)
            .map_err(|_| CoreError::BadRequest("表单数据不是有效的 UTF-8".to_string()))?;
        parse_urlencoded(raw)?
    } else {
        Vec::new()
    };

    let mut params = FormParams::default();
    params.extend(body);
    params.extend(query);

    Ok(RequestInfo {
        method: method.to_string(),
        headers,
        params,
        client_ip,
    })
}

fn has_form_body(req: &Request) -> bool {
    let method = req.method();
    if method != Method::POST && method != Method::PUT && method != Method::PATCH {
        return false;
    }

    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_URLENCODED))
}

/// 严格解析 urlencoded 数据
///
/// `;` 分隔符、不完整的 `%XX` 转义和解码后非 UTF-8 的内容都返回 400。
/// 空片段被忽略，没有 `=` 的片段取空值。
pub fn parse_urlencoded(raw: &str) -> Result<Pairs, CoreError> {
    let mut pairs = Vec::new();
    for segment in raw.split('&') {
        if segment.contains(';') {
            return Err(CoreError::BadRequest(format!(
                "表单数据包含非法分隔符 ';': {}",
                segment
            )));
        }
        if segment.is_empty() {
            continue;
        }

        let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
        pairs.push((decode_component(key)?, decode_component(value)?));
    }
    Ok(pairs)
}

fn decode_component(raw: &str) -> Result<String, CoreError> {
    let bytes = raw.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b != b'%' {
            continue;
        }
        let escaped = bytes
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !escaped {
            return Err(CoreError::BadRequest(format!("无效的转义序列: {}", raw)));
        }
    }

    urlencoding::decode(&raw.replace('+', " "))
        .map(Cow::into_owned)
        .map_err(|_| CoreError::BadRequest(format!("解码后不是有效的 UTF-8: {}", raw)))
}

/// 渲染请求信息文本
pub fn render_request_info(info: &RequestInfo) -> String {
    let mut out = String::new();

    // 写入 String 不会失败
    let _ = writeln!(out, "方法: {}", info.method);

    let _ = writeln!(out, "\n请求头:");
    for (name, values) in &info.headers {
        let _ = writeln!(out, "{}: {}", name, values.join(", "));
    }

    let _ = writeln!(out, "\nGET/POST 参数:");
    for (key, values) in info.params.iter() {
        let _ = writeln!(out, "{}: {}", key, values.join(", "));
    }

    let _ = writeln!(out, "\n客户端 IP 地址: {}", info.client_ip);
    out
}

/// 渲染表单校验结果页面
pub fn render_validation_page(form: &ContactForm) -> String {
    let heading = if form.has_empty_field() {
        "数据为空"
    } else {
        "数据不为空"
    };

    format!(
        r#"<!DOCTYPE html><html><head><meta charset="UTF-8"><title>欢迎</title></head> <body><h1>{}</h1>
            <a href="/">返回</a><br></body></html>"#,
        heading
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_info() -> RequestInfo {
        let mut params = FormParams::default();
        params.extend(vec![
            ("email".to_string(), "ana@example.com".to_string()),
            ("tag".to_string(), "a".to_string()),
            ("tag".to_string(), "b".to_string()),
        ]);
        RequestInfo {
            method: "POST".to_string(),
            headers: vec![(
                "accept".to_string(),
                vec!["text/html".to_string(), "*/*".to_string()],
            )],
            params,
            client_ip: "10.0.0.1".to_string(),
        }
    }

    #[test]
    fn test_render_request_info() {
        let text = render_request_info(&sample_info());
        assert!(text.starts_with("方法: POST\n"));
        assert!(text.contains("accept: text/html, */*\n"));
        assert!(text.contains("tag: a, b\n"));
        assert!(text.ends_with("客户端 IP 地址: 10.0.0.1\n"));
    }

    #[test]
    fn test_parse_urlencoded() {
        let pairs = parse_urlencoded("nombre=Ana+Mar%C3%ADa&&flag&email=a%40b.com").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("nombre".to_string(), "Ana María".to_string()),
                ("flag".to_string(), String::new()),
                ("email".to_string(), "a@b.com".to_string()),
            ]
        );

        // 编码后的加号保持原样
        let pairs = parse_urlencoded("q=1%2B1").unwrap();
        assert_eq!(pairs[0].1, "1+1");
    }

    #[test]
    fn test_parse_urlencoded_rejects_malformed_input() {
        for raw in ["nombre=%zz", "nombre=%4", "nombre=abc%", "%g1=x", "a=1;b=2", "nombre=%FF"] {
            assert!(
                matches!(parse_urlencoded(raw), Err(CoreError::BadRequest(_))),
                "应当拒绝: {}",
                raw
            );
        }
    }

    #[test]
    fn test_render_validation_page() {
        let empty = ContactForm {
            nombre: String::new(),
            email: "ana@example.com".to_string(),
            mensaje: "Hola".to_string(),
        };
        assert!(render_validation_page(&empty).contains("<h1>数据为空</h1>"));

        let full = ContactForm {
            nombre: "Ana".to_string(),
            ..empty
        };
        assert!(render_validation_page(&full).contains("<h1>数据不为空</h1>"));
    }
}
