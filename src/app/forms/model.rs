//! 表单回显数据模型

use std::collections::BTreeMap;

/// GET/POST 参数，同名参数保留全部取值
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormParams {
    values: BTreeMap<String, Vec<String>>,
}

impl FormParams {
    pub fn extend<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in pairs {
            self.values.entry(key).or_default().push(value);
        }
    }

    /// 参数的第一个取值，不存在时返回空字符串
    pub fn first(&self, key: &str) -> &str {
        self.values
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.values.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// 联系表单
#[derive(Debug, Clone, PartialEq)]
pub struct ContactForm {
    pub nombre: String,
    pub email: String,
    pub mensaje: String,
}

impl ContactForm {
    pub fn from_params(params: &FormParams) -> Self {
        Self {
            nombre: params.first("nombre").to_string(),
            email: params.first("email").to_string(),
            mensaje: params.first("mensaje").to_string(),
        }
    }

    /// 任意一个字段为空即视为不完整
    pub fn has_empty_field(&self) -> bool {
        self.nombre.is_empty() || self.email.is_empty() || self.mensaje.is_empty()
    }
}

/// 请求信息
#[derive(Debug, Clone)]
pub struct RequestInfo {
    pub method: String,
    /// 按请求中的顺序排列，同名请求头合并为一项
    pub headers: Vec<(String, Vec<String>)>,
    pub params: FormParams,
    pub client_ip: String,
}
