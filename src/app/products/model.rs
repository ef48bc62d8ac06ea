//! 商品数据模型

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;
use validator::Validate;

/// 商品
///
/// JSON 字段名为首字母大写形式（`Id`、`Name` ...）；缺失的字段取零值。
/// 请求体应通过 [`Product::from_json`] 解析，字段名不区分大小写。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "PascalCase", default)]
pub struct Product {
    pub id: i64,
    #[validate(length(min = 1, message = "商品名称不能为空"))]
    pub name: String,
    pub description: String,
    #[validate(range(min = 0.0, message = "商品价格不能为负数"))]
    pub price: f64,
    pub quantity: i64,
}

const FIELD_NAMES: [&str; 5] = ["Id", "Name", "Description", "Price", "Quantity"];

impl Product {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        quantity: i64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            price,
            quantity,
        }
    }

    /// 从请求体解析商品
    ///
    /// 字段名不区分大小写，同一字段出现多次时以最后一次为准；
    /// 未知字段被忽略，`null` 视为未提供。请求体必须是 JSON 对象。
    pub fn from_json(body: &[u8]) -> serde_json::Result<Product> {
        let object: Map<String, Value> = serde_json::from_slice(body)?;

        let mut fields = Map::new();
        for (key, value) in object {
            if value.is_null() {
                continue;
            }
            if let Some(name) = FIELD_NAMES.iter().find(|name| name.eq_ignore_ascii_case(&key)) {
                fields.insert(name.to_string(), value);
            }
        }

        serde_json::from_value(Value::Object(fields))
    }

    /// 按百分比打折，返回新的商品；百分比为负数时不打折
    pub fn apply_discount(&self, percentage: f64) -> Product {
        let mut discounted = self.clone();
        if percentage < 0.0 {
            warn!("无效的折扣百分比: {}", percentage);
            return discounted;
        }
        discounted.price -= discounted.price * (percentage / 100.0);
        discounted
    }
}

/// 进程启动时的初始商品
pub fn seed_products() -> Vec<Product> {
    vec![
        Product::new(1, "Laptop", "Laptop gamer 16GB RAM", 3500.00, 10),
        Product::new(2, "Mouse", "Mouse inalámbrico", 50.00, 100),
        Product::new(3, "Teclado", "Teclado mecánico retroiluminado", 120.00, 75),
        Product::new(4, "Monitor", "Monitor 27 pulgadas 144Hz", 900.00, 20),
        Product::new(5, "Impresora", "Impresora multifuncional", 650.00, 15),
    ]
}
