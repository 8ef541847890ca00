// ==========================================
// 滞销库存分析系统 - 派生指标计算
// ==========================================
// 职责: 库存金额 / 持有成本 / 月动销速度 / 毛利率 / 天数差
// 说明: 纯函数,模拟器与导入回填共用同一口径
// ==========================================

use chrono::NaiveDate;

/// 持有成本按月计费的天数基数
pub const DAYS_PER_MONTH: f64 = 30.0;

/// 四舍五入到指定小数位
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

/// 库存金额 = current_stock × unit_cost
pub fn stock_value(current_stock: f64, unit_cost: f64) -> f64 {
    round_to(current_stock * unit_cost, 2)
}

/// 潜在销售额 = current_stock × unit_price
pub fn potential_revenue(current_stock: f64, unit_price: f64) -> f64 {
    round_to(current_stock * unit_price, 2)
}

/// 持有成本 = current_stock × unit_cost × 月费率 × (days_in_stock / 30)
pub fn holding_cost(current_stock: f64, unit_cost: f64, holding_rate: f64, days_in_stock: i64) -> f64 {
    let months_held = days_in_stock as f64 / DAYS_PER_MONTH;
    round_to(current_stock * unit_cost * holding_rate * months_held, 2)
}

/// 月动销速度 = total_sold / max(days_in_stock, 1) × 30
pub fn monthly_velocity(total_sold: f64, days_in_stock: i64) -> f64 {
    let days = days_in_stock.max(1) as f64;
    round_to(total_sold / days * DAYS_PER_MONTH, 2)
}

/// 毛利率（%）= (unit_price - unit_cost) / unit_price × 100
///
/// unit_price 为 0 时返回 0
pub fn profit_margin_pct(unit_cost: f64, unit_price: f64) -> f64 {
    if unit_price == 0.0 {
        return 0.0;
    }
    round_to((unit_price - unit_cost) / unit_price * 100.0, 1)
}

/// 两个日期间隔天数（reference - date）
pub fn days_between(date: NaiveDate, reference: NaiveDate) -> i64 {
    (reference - date).num_days()
}
