// ==========================================
// 滞销库存分析系统 - 配置层
// ==========================================
// 职责: 系统配置管理 + 商品目录配置
// 存储: JSON 文件（可选）,缺省走内置默认值
// ==========================================

pub mod catalog;
pub mod config_manager;
pub mod error;

// 重导出核心配置类型
pub use catalog::{spaza_catalog, CatalogConfig, CategoryConfig, MovementWeight, ProductSpec};
pub use config_manager::{config_keys, ConfigManager};
pub use error::{ConfigError, ConfigResult};
