//! 商品模块：内存中的商品 CRUD 接口

pub mod handler;
pub mod model;
pub mod service;

use axum::{routing::get, Router};

use self::{handler::AppState, service::ProductService};

/// 商品路由
///
/// - `GET    /products`      获取全部商品
/// - `POST   /products`      创建商品
/// - `GET    /products/:id`  获取商品
/// - `PUT    /products/:id`  替换商品
/// - `DELETE /products/:id`  删除商品
pub fn router(product_service: ProductService) -> Router {
    Router::new()
        .route(
            "/products",
            get(handler::list_products).post(handler::create_product),
        )
        .route(
            "/products/:id",
            get(handler::get_product)
                .put(handler::update_product)
                .delete(handler::delete_product),
        )
        .with_state(AppState { product_service })
}
