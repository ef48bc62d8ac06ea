//! 商品业务服务
//!
//! 商品按插入顺序保存在内存中，查找采用线性扫描。

use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};
use validator::Validate;

use super::model::{seed_products, Product};
use crate::core::error::CoreError;

struct ProductStore {
    products: Vec<Product>,
    /// 下一个分配的 ID，删除后的 ID 不会被复用
    next_id: i64,
}

#[derive(Clone)]
pub struct ProductService {
    store: Arc<Mutex<ProductStore>>,
}

impl ProductService {
    /// 使用初始商品创建服务
    pub fn new() -> Self {
        Self::with_products(seed_products())
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        let next_id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self {
            store: Arc::new(Mutex::new(ProductStore { products, next_id })),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, ProductStore>, CoreError> {
        self.store
            .lock()
            .map_err(|e| CoreError::InternalServerError(format!("商品存储不可用: {}", e)))
    }

    pub fn list_products(&self) -> Result<Vec<Product>, CoreError> {
        Ok(self.lock()?.products.clone())
    }

    pub fn get_product(&self, id: i64) -> Result<Product, CoreError> {
        let store = self.lock()?;
        store
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// 校验并追加商品，请求中携带的 ID 会被忽略
    pub fn create_product(&self, mut product: Product) -> Result<Product, CoreError> {
        product.validate()?;

        let mut store = self.lock()?;
        product.id = store.next_id;
        store.next_id += 1;
        store.products.push(product.clone());

        info!("创建商品 {}: {}", product.id, product.name);
        Ok(product)
    }

    /// 整体替换商品，ID 保持不变；先校验再查找
    pub fn update_product(&self, id: i64, mut product: Product) -> Result<Product, CoreError> {
        product.validate()?;

        let mut store = self.lock()?;
        let slot = store
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| not_found(id))?;
        product.id = id;
        *slot = product.clone();

        info!("更新商品 {}", id);
        Ok(product)
    }

    pub fn delete_product(&self, id: i64) -> Result<(), CoreError> {
        let mut store = self.lock()?;
        let index = store
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| not_found(id))?;
        let removed = store.products.remove(index);

        debug!("删除商品 {}: {}", removed.id, removed.name);
        Ok(())
    }
}

impl Default for ProductService {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(id: i64) -> CoreError {
    CoreError::NotFound(format!("商品 {} 不存在", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tablet() -> Product {
        Product::new(99, "Tablet", "Tablet 10 pulgadas", 300.0, 50)
    }

    #[test]
    fn test_seeded_on_creation() {
        let service = ProductService::new();
        let products = service.list_products().unwrap();
        assert_eq!(products.len(), 5);
        assert_eq!(products[0].name, "Laptop");
        assert_eq!(products[4].name, "Impresora");
    }

    #[test]
    fn test_create_assigns_next_id() {
        let service = ProductService::new();
        let created = service.create_product(tablet()).unwrap();
        assert_eq!(created.id, 6);
        assert_eq!(service.get_product(6).unwrap(), created);
        assert_eq!(service.list_products().unwrap().last(), Some(&created));
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let service = ProductService::new();
        service.delete_product(5).unwrap();
        let created = service.create_product(tablet()).unwrap();
        assert_eq!(created.id, 6);

        service.delete_product(6).unwrap();
        let created = service.create_product(tablet()).unwrap();
        assert_eq!(created.id, 7);
    }

    #[test]
    fn test_create_rejects_invalid_product() {
        let service = ProductService::new();
        let mut product = tablet();
        product.price = -1.0;
        assert!(matches!(
            service.create_product(product),
            Err(CoreError::BadRequest(_))
        ));
        assert_eq!(service.list_products().unwrap().len(), 5);
    }

    #[test]
    fn test_update_keeps_id_and_position() {
        let service = ProductService::new();
        let updated = service.update_product(2, tablet()).unwrap();
        assert_eq!(updated.id, 2);

        let products = service.list_products().unwrap();
        assert_eq!(products[1].name, "Tablet");
        assert_eq!(products[1].id, 2);
    }

    #[test]
    fn test_update_validates_before_lookup() {
        let service = ProductService::new();
        let mut product = tablet();
        product.name.clear();
        assert!(matches!(
            service.update_product(42, product),
            Err(CoreError::BadRequest(_))
        ));
        assert!(matches!(
            service.update_product(42, tablet()),
            Err(CoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_preserves_order() {
        let service = ProductService::new();
        service.delete_product(3).unwrap();
        let ids: Vec<i64> = service
            .list_products()
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 4, 5]);
        assert!(matches!(
            service.delete_product(3),
            Err(CoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_empty_store_starts_at_one() {
        let service = ProductService::with_products(Vec::new());
        assert_eq!(service.create_product(tablet()).unwrap().id, 1);
    }
}
