//! 应用层

pub mod forms;
pub mod products;
