// ==========================================
// 滞销库存分析系统 - 引擎层
// ==========================================
// 职责: 实现库存分级规则与模拟数据生成
// 红线: 引擎为纯计算,不做文件读写
// ==========================================

pub mod classifier;
pub mod metrics;
pub mod simulator;

// 重导出核心引擎
pub use classifier::{StatusThresholds, StockClassifier, UrgencyInput};
pub use simulator::{InventorySimulator, MovementProfile, SaleHistory, SimulationParams};
