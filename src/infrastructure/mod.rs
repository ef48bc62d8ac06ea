//! 基础设施层：配置、日志与服务器启动

pub mod config;
pub mod logger;
pub mod server;
