// ==========================================
// 滞销库存分析系统 - 核心库
// ==========================================
// 职责: 库存状态分级 / 模拟库存生成 / 上传表校验与回填 / 驾驶舱聚合
// 系统定位: 决策支持（展示层负责渲染,本库只交付库存表与聚合结果）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 分级与模拟
pub mod engine;

// 导入层 - 上传数据
pub mod importer;

// 配置层 - 系统配置与商品目录
pub mod config;

// API 层 - 驾驶舱聚合
pub mod api;

// 应用层 - 驾驶舱会话
pub mod app;

// 导出 - CSV / JSON
pub mod export;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{MovementClass, PriorityBand, RecommendedAction, StockStatus};

// 领域实体
pub use domain::{InventoryRecord, InventoryTable, RawInventoryRecord};

// 引擎
pub use engine::{InventorySimulator, StatusThresholds, StockClassifier, UrgencyInput};

// 导入
pub use importer::{ImportError, ImportOutcome, InventoryImporter};

// 配置
pub use config::{CatalogConfig, ConfigManager};

// API
pub use api::{ApiError, DashboardApi};

// 会话
pub use app::DashboardSession;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "滞销库存分析系统";
