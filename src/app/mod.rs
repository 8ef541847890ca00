// ==========================================
// 滞销库存分析系统 - 应用层
// ==========================================
// 职责: 驾驶舱会话,连接加载入口与聚合查询
// ==========================================

pub mod session;

// 重导出
pub use session::{DashboardSession, LoadSource, LoadedTable};
