//! 配置基础设施
//!
//! 配置以 TOML 文件保存，缺失的段落和字段使用默认值。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 默认的配置文件搜索路径
const CONFIG_PATHS: [&str; 2] = ["config.toml", "./config/config.toml"];

/// 应用配置结构
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP 服务配置
    pub http: HttpConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 静态文件配置
    pub static_files: StaticFilesConfig,
    /// 压缩配置
    pub compression: CompressionConfig,
}

/// HTTP 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// 绑定地址
    pub bind_address: String,
    /// HTTP 服务端口
    pub port: u16,
    /// 请求超时时间（秒）
    pub timeout_seconds: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
}

/// 静态文件配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// 静态资源目录
    pub dir: PathBuf,
    /// 根路径返回的首页文件
    pub index_file: PathBuf,
}

/// 压缩配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    /// 是否启用 gzip
    pub enabled: bool,
    /// 压缩级别
    pub level: CompressionLevel,
    /// 参与压缩的响应体上限（字节），更大或长度未知的响应体不压缩
    pub max_body_bytes: u64,
}

/// 压缩级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionLevel {
    Fast,
    #[default]
    Default,
    Best,
}

impl CompressionLevel {
    pub fn to_flate2(self) -> flate2::Compression {
        match self {
            CompressionLevel::Fast => flate2::Compression::fast(),
            CompressionLevel::Default => flate2::Compression::default(),
            CompressionLevel::Best => flate2::Compression::best(),
        }
    }
}

impl HttpConfig {
    /// 监听地址，形如 `0.0.0.0:8080`
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            timeout_seconds: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./static"),
            index_file: PathBuf::from("index.html"),
        }
    }
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: CompressionLevel::Default,
            max_body_bytes: 8 * 1024 * 1024,
        }
    }
}

impl Config {
    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::FileRead(e.to_string()))?;

        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::FileWrite(e.to_string()))?;
        }

        fs::write(path.as_ref(), content).map_err(|e| ConfigError::FileWrite(e.to_string()))?;

        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.bind_address.is_empty() {
            return Err(ConfigError::Validation("绑定地址不能为空".to_string()));
        }
        if self.http.port == 0 {
            return Err(ConfigError::Validation("HTTP端口必须大于0".to_string()));
        }
        if self.http.timeout_seconds == 0 {
            return Err(ConfigError::Validation("超时时间必须大于0".to_string()));
        }

        if self.compression.max_body_bytes == 0 {
            return Err(ConfigError::Validation("压缩响应体上限必须大于0".to_string()));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "无效的日志级别: {}，有效值: {:?}",
                self.logging.level, valid_levels
            )));
        }

        Ok(())
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("文件读取错误: {0}")]
    FileRead(String),
    #[error("文件写入错误: {0}")]
    FileWrite(String),
    #[error("配置解析错误: {0}")]
    Parse(String),
    #[error("配置序列化错误: {0}")]
    Serialize(String),
    #[error("配置验证错误: {0}")]
    Validation(String),
}

/// 加载并校验配置
///
/// 优先使用显式给出的路径；否则依次尝试默认搜索路径，都不存在时使用默认配置。
/// 返回值中附带实际使用的配置文件路径。
pub fn load_config(explicit: Option<&Path>) -> Result<(Config, Option<PathBuf>), ConfigError> {
    let source = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => CONFIG_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists()),
    };

    let config = match &source {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };
    config.validate()?;

    Ok((config, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.http.bind_address, "0.0.0.0");
        assert_eq!(config.logging.level, "info");
        assert!(config.compression.enabled);
        assert_eq!(config.http.listen_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.http.port = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.compression.max_body_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_save_load() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.http.port = 3003;
        config.compression.level = CompressionLevel::Best;
        config.save_to_file(&config_path).unwrap();

        let loaded = Config::load_from_file(&config_path).unwrap();
        assert_eq!(loaded.http.port, 3003);
        assert_eq!(loaded.compression.level, CompressionLevel::Best);
        assert_eq!(loaded.static_files.index_file, config.static_files.index_file);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "[http]\nport = 9090\n\n[compression]\nenabled = false\n").unwrap();

        let (config, source) = load_config(Some(config_path.as_path())).unwrap();
        assert_eq!(source.as_deref(), Some(config_path.as_path()));
        assert_eq!(config.http.port, 9090);
        assert_eq!(config.http.bind_address, "0.0.0.0");
        assert!(!config.compression.enabled);
        assert_eq!(config.compression.max_body_bytes, 8 * 1024 * 1024);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = tempdir().unwrap();
        let result = load_config(Some(dir.path().join("absent.toml").as_path()));
        assert!(matches!(result, Err(ConfigError::FileRead(_))));
    }
}
