// ==========================================
// 滞销库存分析系统 - 领域类型定义
// ==========================================
// 职责: 库存状态分级 / 建议动作 / 模拟动销类别
// 红线: 状态是"分级制",四档有序,阈值严格大于
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 库存状态 (Stock Status)
// ==========================================
// 排序: 按严重程度递增 (Active < Moderate < SlowMoving < DeadStock)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StockStatus {
    #[serde(rename = "Active (< 1 month)")]
    Active, // 活跃
    #[serde(rename = "Moderate (1-3 months)")]
    Moderate, // 一般
    #[serde(rename = "Slow Moving (3-6 months)")]
    SlowMoving, // 慢销
    #[serde(rename = "Dead Stock (6+ months)")]
    DeadStock, // 滞销
}

impl StockStatus {
    /// 全部状态（严重程度递增）
    pub const ALL: [StockStatus; 4] = [
        StockStatus::Active,
        StockStatus::Moderate,
        StockStatus::SlowMoving,
        StockStatus::DeadStock,
    ];

    /// 展示标签（与导出 CSV 一致）
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::Active => "Active (< 1 month)",
            StockStatus::Moderate => "Moderate (1-3 months)",
            StockStatus::SlowMoving => "Slow Moving (3-6 months)",
            StockStatus::DeadStock => "Dead Stock (6+ months)",
        }
    }

    /// 是否属于问题库存（慢销 + 滞销）
    pub fn is_problem(&self) -> bool {
        matches!(self, StockStatus::SlowMoving | StockStatus::DeadStock)
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for StockStatus {
    type Err = String;

    /// 解析展示标签；同时接受不带括号说明的简写（如 "Dead Stock"）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let head = trimmed.split('(').next().unwrap_or("").trim();
        match head.to_ascii_lowercase().as_str() {
            "active" => Ok(StockStatus::Active),
            "moderate" => Ok(StockStatus::Moderate),
            "slow moving" => Ok(StockStatus::SlowMoving),
            "dead stock" => Ok(StockStatus::DeadStock),
            _ => Err(format!("未知库存状态: {}", trimmed)),
        }
    }
}

// ==========================================
// 建议动作 (Recommended Action)
// ==========================================
// Review 为兜底动作: 状态不可信时使用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecommendedAction {
    #[serde(rename = "Clearance Sale / Bundle")]
    ClearanceSale,
    #[serde(rename = "Discount / Promote")]
    DiscountPromote,
    #[serde(rename = "Monitor Weekly")]
    MonitorWeekly,
    #[serde(rename = "Restock When Low")]
    RestockWhenLow,
    #[serde(rename = "Review")]
    Review,
}

impl RecommendedAction {
    pub fn label(&self) -> &'static str {
        match self {
            RecommendedAction::ClearanceSale => "Clearance Sale / Bundle",
            RecommendedAction::DiscountPromote => "Discount / Promote",
            RecommendedAction::MonitorWeekly => "Monitor Weekly",
            RecommendedAction::RestockWhenLow => "Restock When Low",
            RecommendedAction::Review => "Review",
        }
    }
}

impl fmt::Display for RecommendedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 动销类别 (Movement Class)
// ==========================================
// 仅用于模拟: 控制销售频率与单次销量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementClass {
    Fast,   // 快销
    Medium, // 中速
    Slow,   // 慢速
    Dead,   // 停滞
}

impl MovementClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementClass::Fast => "fast",
            MovementClass::Medium => "medium",
            MovementClass::Slow => "slow",
            MovementClass::Dead => "dead",
        }
    }
}

impl fmt::Display for MovementClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MovementClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fast" => Ok(MovementClass::Fast),
            "medium" => Ok(MovementClass::Medium),
            "slow" => Ok(MovementClass::Slow),
            "dead" => Ok(MovementClass::Dead),
            other => Err(format!("未知动销类别: {}", other)),
        }
    }
}

// ==========================================
// 优先级分档 (Priority Band)
// ==========================================
// 驾驶舱优先表着色: >=75 高, [50,75) 中, 其他低
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriorityBand {
    Low,
    Medium,
    High,
}

impl PriorityBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 75.0 {
            PriorityBand::High
        } else if score >= 50.0 {
            PriorityBand::Medium
        } else {
            PriorityBand::Low
        }
    }
}

impl fmt::Display for PriorityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityBand::Low => write!(f, "LOW"),
            PriorityBand::Medium => write!(f, "MEDIUM"),
            PriorityBand::High => write!(f, "HIGH"),
        }
    }
}
