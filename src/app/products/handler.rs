//! 商品处理器

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use super::{model::Product, service::ProductService};
use crate::core::error::CoreError;

#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
}

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, CoreError> {
    let products = state.product_service.list_products()?;
    Ok(Json(products))
}

pub async fn create_product(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Product>), CoreError> {
    let payload = parse_product(&body)?;
    let product = state.product_service.create_product(payload)?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, CoreError> {
    let id = parse_id(&id)?;
    let product = state.product_service.get_product(id)?;
    Ok(Json(product))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Product>, CoreError> {
    let id = parse_id(&id)?;
    let payload = parse_product(&body)?;
    let product = state.product_service.update_product(id, payload)?;
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, CoreError> {
    let id = parse_id(&id)?;
    state.product_service.delete_product(id)?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_id(raw: &str) -> Result<i64, CoreError> {
    raw.parse()
        .map_err(|_| CoreError::BadRequest(format!("无效的商品 ID: {}", raw)))
}

// 不要求 Content-Type，任何无法解析的请求体都按 400 处理
fn parse_product(body: &[u8]) -> Result<Product, CoreError> {
    Product::from_json(body).map_err(|e| CoreError::BadRequest(format!("无效的 JSON: {}", e)))
}
