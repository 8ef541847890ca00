// ==========================================
// 滞销库存分析系统 - 库存分级引擎
// ==========================================
// 红线: 状态是"分级制",阈值严格大于;紧急度是"评分制",封顶 100
// ==========================================
// 职责: 库存状态判定 + 紧急度评分 + 建议动作
// 输入: days_since_last_sale / stock_value / holding_cost
// 输出: 更新 InventoryRecord (stock_status, urgency_score, action_required)
// ==========================================

use crate::domain::inventory::InventoryRecord;
use crate::domain::types::{RecommendedAction, StockStatus};
use crate::engine::metrics::round_to;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// 缺少滞销天数时的紧急度默认值
pub const DEFAULT_URGENCY_SCORE: f64 = 50.0;

/// 缺少持有成本时的默认值
pub const DEFAULT_HOLDING_COST: f64 = 0.0;

/// 缺少滞销天数时的默认天数
pub const DEFAULT_DAYS_SINCE_LAST_SALE: i64 = 0;

// 紧急度分项上限
const RECENCY_MAX_POINTS: f64 = 40.0;
const RECENCY_DAYS_PER_POINT: f64 = 5.0;
const URGENCY_CAP: f64 = 100.0;

// 库存金额分档 (阈值, 分值)，自高向低匹配
const VALUE_TIERS: [(f64, f64); 3] = [(500.0, 30.0), (200.0, 20.0), (50.0, 10.0)];

// 持有成本分档 (阈值, 分值)
const HOLDING_TIERS: [(f64, f64); 3] = [(50.0, 30.0), (20.0, 20.0), (10.0, 10.0)];

// ==========================================
// StatusThresholds - 状态分级阈值
// ==========================================
// 判定: days > dead → 滞销; > slow → 慢销; > moderate → 一般; 否则活跃
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusThresholds {
    pub moderate_days: i64,
    pub slow_moving_days: i64,
    pub dead_stock_days: i64,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            moderate_days: 30,
            slow_moving_days: 90,
            dead_stock_days: 180,
        }
    }
}

// ==========================================
// UrgencyInput - 紧急度评分输入
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UrgencyInput {
    /// 滞销天数（None 时走默认分支,整体返回 50）
    pub days_since_last_sale: Option<i64>,
    pub stock_value: f64,
    pub holding_cost: f64,
}

impl UrgencyInput {
    pub fn new(days_since_last_sale: Option<i64>, stock_value: f64, holding_cost: f64) -> Self {
        Self {
            days_since_last_sale,
            stock_value,
            holding_cost,
        }
    }
}

// ==========================================
// StockClassifier - 库存分级引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct StockClassifier {
    thresholds: StatusThresholds,
}

impl StockClassifier {
    /// 创建使用默认阈值 (30/90/180) 的分级引擎
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用指定阈值创建
    pub fn with_thresholds(thresholds: StatusThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> StatusThresholds {
        self.thresholds
    }

    // ==========================================
    // 状态判定
    // ==========================================

    /// 判定库存状态
    ///
    /// 规则（顺序执行,命中即返回）:
    /// 1) days > 180 → DeadStock
    /// 2) days > 90 → SlowMoving
    /// 3) days > 30 → Moderate
    /// 4) 其他 → Active
    ///
    /// 边界: 恰好 180 天为 SlowMoving,不是 DeadStock
    pub fn classify_status(&self, days_since_last_sale: i64) -> StockStatus {
        let t = &self.thresholds;
        if days_since_last_sale > t.dead_stock_days {
            StockStatus::DeadStock
        } else if days_since_last_sale > t.slow_moving_days {
            StockStatus::SlowMoving
        } else if days_since_last_sale > t.moderate_days {
            StockStatus::Moderate
        } else {
            StockStatus::Active
        }
    }

    // ==========================================
    // 紧急度评分
    // ==========================================

    /// 计算紧急度 (0-100)
    ///
    /// - 有滞销天数: recency(≤40) + value(≤30) + holding(≤30),保留 1 位小数后封顶
    /// - 无滞销天数: 默认 50
    pub fn compute_urgency(&self, input: &UrgencyInput) -> f64 {
        let days = match input.days_since_last_sale {
            Some(days) => days,
            None => return DEFAULT_URGENCY_SCORE,
        };

        let score = Self::recency_points(days)
            + Self::value_points(input.stock_value)
            + Self::holding_points(input.holding_cost);

        round_to(score, 1).clamp(0.0, URGENCY_CAP)
    }

    /// 滞销天数得分: min(days / 5, 40)
    pub fn recency_points(days_since_last_sale: i64) -> f64 {
        (days_since_last_sale as f64 / RECENCY_DAYS_PER_POINT).min(RECENCY_MAX_POINTS)
    }

    /// 库存金额得分: >500→30, >200→20, >50→10
    pub fn value_points(stock_value: f64) -> f64 {
        Self::tier_points(stock_value, &VALUE_TIERS)
    }

    /// 持有成本得分: >50→30, >20→20, >10→10
    pub fn holding_points(holding_cost: f64) -> f64 {
        Self::tier_points(holding_cost, &HOLDING_TIERS)
    }

    fn tier_points(value: f64, tiers: &[(f64, f64)]) -> f64 {
        tiers
            .iter()
            .find(|(threshold, _)| value > *threshold)
            .map(|(_, points)| *points)
            .unwrap_or(0.0)
    }

    // ==========================================
    // 建议动作
    // ==========================================

    /// 状态 → 建议动作（固定查表）
    pub fn recommend_action(&self, status: StockStatus) -> RecommendedAction {
        match status {
            StockStatus::DeadStock => RecommendedAction::ClearanceSale,
            StockStatus::SlowMoving => RecommendedAction::DiscountPromote,
            StockStatus::Moderate => RecommendedAction::MonitorWeekly,
            StockStatus::Active => RecommendedAction::RestockWhenLow,
        }
    }

    // ==========================================
    // 记录级别
    // ==========================================

    /// 补全单条记录的分级字段
    pub fn classify_record(&self, record: &mut InventoryRecord) {
        let status = self.classify_status(record.days_since_last_sale);
        let input = UrgencyInput::new(
            Some(record.days_since_last_sale),
            record.stock_value,
            record.holding_cost,
        );

        record.stock_status = status;
        record.urgency_score = self.compute_urgency(&input);
        record.action_required = self.recommend_action(status).to_string();
    }

    /// 批量分级（推荐使用）
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub fn classify_batch(&self, records: Vec<InventoryRecord>) -> Vec<InventoryRecord> {
        records
            .into_iter()
            .map(|mut record| {
                self.classify_record(&mut record);
                record
            })
            .collect()
    }
}
