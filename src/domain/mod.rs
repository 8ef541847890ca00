// ==========================================
// 滞销库存分析系统 - 领域模型层
// ==========================================
// 职责: 定义库存实体、分级类型、表结构
// 红线: 不含文件读写逻辑,不含引擎逻辑
// ==========================================

pub mod inventory;
pub mod schema;
pub mod types;

// 重导出核心类型
pub use inventory::{InventoryRecord, InventoryTable, RawInventoryRecord};
pub use schema::{columns, ColumnKind, BACKFILL_COLUMNS, REQUIRED_COLUMNS, SIMULATED_COLUMNS};
pub use types::{MovementClass, PriorityBand, RecommendedAction, StockStatus};
