// ==========================================
// 滞销库存分析系统 - 驾驶舱 DTO 定义
// ==========================================
// 职责: 定义驾驶舱聚合查询的响应结构
// 金额单位: 目录货币（默认 BWP）
// ==========================================

use crate::domain::types::{PriorityBand, StockStatus};
use serde::{Deserialize, Serialize};

// ==========================================
// KPI 卡片
// ==========================================

/// KPI 汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    /// 滞销库存金额 / 数量
    pub dead_stock_value: f64,
    pub dead_stock_count: usize,

    /// 慢销库存金额 / 数量
    pub slow_moving_value: f64,
    pub slow_moving_count: usize,

    /// 累计持有成本
    pub total_holding_cost: f64,

    /// 问题率 (%) = (滞销 + 慢销) / 总数 × 100,空表为 0
    pub problem_rate_pct: f64,

    /// 健康（活跃）库存金额 / 数量
    pub healthy_value: f64,
    pub healthy_count: usize,

    /// 库存总金额 / 总件数
    pub total_value: f64,
    pub total_units: i64,

    /// 总行数
    pub item_count: usize,
}

// ==========================================
// 图表数据
// ==========================================

/// 单个状态的金额与数量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    pub status: StockStatus,
    pub stock_value: f64,
    pub item_count: usize,
}

/// 单个品类的问题库存金额（滞销 + 慢销）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryProblemValue {
    pub category: String,
    pub problem_value: f64,
}

// ==========================================
// 优先处理清单
// ==========================================

/// 优先处理条目（按紧急度降序）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityItem {
    pub sku: String,
    pub product_name: String,
    pub category: String,
    pub current_stock: Option<i64>,
    pub stock_value: f64,
    pub days_since_last_sale: Option<i64>,
    pub urgency_score: f64,
    pub priority_band: PriorityBand,
    pub action_required: String,
}

// ==========================================
// 行动建议卡片
// ==========================================

/// 金额 + 条目数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: f64,
    pub count: usize,
}

/// 行动建议
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionInsights {
    /// 立即清理滞销库存
    pub clear_dead_stock: ValueCount,

    /// 滞销金额最高的品类（无滞销时为 "N/A"）
    pub focus_category: String,
    pub focus_category_value: f64,

    /// 即将滞销: 60 < days_since_last_sale ≤ 90
    pub at_risk: ValueCount,

    /// 快速见效: 按成本清掉一半滞销库存可回笼的资金
    pub quick_win_value: f64,
}

// ==========================================
// 顶部横幅
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryBanner {
    pub dead_stock_value: f64,
    pub total_value: f64,
    /// 滞销金额占比 (%),总金额为 0 时为 0
    pub dead_stock_share_pct: f64,
    pub item_count: usize,
}
