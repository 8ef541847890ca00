// ==========================================
// 滞销库存分析系统 - 库存表列定义
// ==========================================
// 职责: 列名常量 / 必需列 / 回填列 / 列类型
// 红线: 列名精确匹配,不做大小写归一
// ==========================================

use serde::{Deserialize, Serialize};

/// 列名常量
pub mod columns {
    pub const SKU: &str = "sku";
    pub const PRODUCT_NAME: &str = "product_name";
    pub const CATEGORY: &str = "category";
    pub const VARIANT: &str = "variant";
    pub const UNIT_COST: &str = "unit_cost";
    pub const UNIT_PRICE: &str = "unit_price";
    pub const PROFIT_MARGIN_PCT: &str = "profit_margin_pct";
    pub const INITIAL_QUANTITY: &str = "initial_quantity";
    pub const CURRENT_STOCK: &str = "current_stock";
    pub const TOTAL_SOLD: &str = "total_sold";
    pub const STOCK_RECEIVED_DATE: &str = "stock_received_date";
    pub const LAST_SALE_DATE: &str = "last_sale_date";
    pub const DAYS_SINCE_LAST_SALE: &str = "days_since_last_sale";
    pub const DAYS_IN_STOCK: &str = "days_in_stock";
    pub const MONTHLY_VELOCITY: &str = "monthly_velocity";
    pub const STOCK_VALUE: &str = "stock_value";
    pub const POTENTIAL_REVENUE: &str = "potential_revenue";
    pub const HOLDING_COST: &str = "holding_cost";
    pub const MOVEMENT_CATEGORY: &str = "movement_category";
    pub const STOCK_STATUS: &str = "stock_status";
    pub const URGENCY_SCORE: &str = "urgency_score";
    pub const ACTION_REQUIRED: &str = "action_required";
}

use columns::*;

/// 上传表必需列（顺序即缺失列报告顺序）
pub const REQUIRED_COLUMNS: &[&str] = &[SKU, PRODUCT_NAME, CATEGORY, UNIT_COST, CURRENT_STOCK];

/// 可回填列（顺序即回填执行顺序与追加顺序）
pub const BACKFILL_COLUMNS: &[&str] = &[
    STOCK_VALUE,
    DAYS_SINCE_LAST_SALE,
    STOCK_STATUS,
    URGENCY_SCORE,
    HOLDING_COST,
    ACTION_REQUIRED,
    MONTHLY_VELOCITY,
];

/// 模拟数据表的完整列顺序
pub const SIMULATED_COLUMNS: &[&str] = &[
    SKU,
    PRODUCT_NAME,
    CATEGORY,
    VARIANT,
    UNIT_COST,
    UNIT_PRICE,
    PROFIT_MARGIN_PCT,
    INITIAL_QUANTITY,
    CURRENT_STOCK,
    TOTAL_SOLD,
    STOCK_RECEIVED_DATE,
    LAST_SALE_DATE,
    DAYS_SINCE_LAST_SALE,
    DAYS_IN_STOCK,
    MONTHLY_VELOCITY,
    STOCK_VALUE,
    POTENTIAL_REVENUE,
    HOLDING_COST,
    MOVEMENT_CATEGORY,
    STOCK_STATUS,
    URGENCY_SCORE,
    ACTION_REQUIRED,
];

/// 列值类型（JSON 导出时决定数值/文本）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnKind {
    Text,
    Integer,
    Decimal,
    Date,
}

/// 已知列的值类型；未知列一律按文本处理
pub fn column_kind(name: &str) -> ColumnKind {
    match name {
        UNIT_COST | UNIT_PRICE | PROFIT_MARGIN_PCT | MONTHLY_VELOCITY | STOCK_VALUE
        | POTENTIAL_REVENUE | HOLDING_COST | URGENCY_SCORE => ColumnKind::Decimal,
        INITIAL_QUANTITY | CURRENT_STOCK | TOTAL_SOLD | DAYS_SINCE_LAST_SALE | DAYS_IN_STOCK => {
            ColumnKind::Integer
        }
        STOCK_RECEIVED_DATE | LAST_SALE_DATE => ColumnKind::Date,
        _ => ColumnKind::Text,
    }
}

/// 返回 headers 中缺失的必需列（保持必需列顺序）
pub fn missing_required<S: AsRef<str>>(headers: &[S]) -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|h| h.as_ref() == **required))
        .map(|c| c.to_string())
        .collect()
}
