// ==========================================
// 滞销库存分析系统 - API 层
// ==========================================
// 职责: 提供驾驶舱聚合接口,供会话层与命令行调用
// ==========================================

pub mod dashboard_api;
pub mod dto;
pub mod error;

// 重导出核心类型
pub use dashboard_api::{DashboardApi, DEFAULT_PRIORITY_LIMIT};
pub use dto::{
    ActionInsights, CategoryProblemValue, KpiSummary, PriorityItem, StatusBreakdown,
    SummaryBanner, ValueCount,
};
pub use error::{ApiError, ApiResult};
