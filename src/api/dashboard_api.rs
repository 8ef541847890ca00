// ==========================================
// 滞销库存分析系统 - 驾驶舱 API
// ==========================================
// 职责: 对已分级的库存表做驾驶舱聚合（KPI / 图表 / 优先清单 / 行动建议）
// 输入: InventoryTable（模拟生成或上传回填后）
// 说明: 只读聚合,不修改表;缺失的金额按 0 计,缺失状态的行不计入任何状态
// ==========================================

use crate::api::dto::{
    ActionInsights, CategoryProblemValue, KpiSummary, PriorityItem, StatusBreakdown,
    SummaryBanner, ValueCount,
};
use crate::api::error::ApiResult;
use crate::domain::inventory::{InventoryTable, RawInventoryRecord};
use crate::domain::types::{PriorityBand, StockStatus};
use crate::engine::metrics::round_to;
use crate::importer::{FieldMapper, FieldMapperImpl};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// 优先清单默认条数
pub const DEFAULT_PRIORITY_LIMIT: usize = 10;

/// 即将滞销区间 (60, 90]
pub const AT_RISK_MIN_DAYS: i64 = 60;
pub const AT_RISK_MAX_DAYS: i64 = 90;

/// 快速见效: 清掉的滞销库存比例
pub const QUICK_WIN_RATIO: f64 = 0.5;

/// 无滞销品类时的占位
pub const NO_FOCUS_CATEGORY: &str = "N/A";

// ==========================================
// DashboardApi - 驾驶舱 API
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct DashboardApi {
    records: Vec<RawInventoryRecord>,
}

impl DashboardApi {
    /// 由库存表构建
    ///
    /// # 返回
    /// - Err(ApiError::Import): 金额/数量/日期单元格无法解析
    #[instrument(skip(table), fields(rows = table.len()))]
    pub fn from_table(table: &InventoryTable) -> ApiResult<Self> {
        let mapper = FieldMapperImpl;
        let records = (0..table.len())
            .map(|idx| mapper.map_row(&table.row_map(idx), idx + 1))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = records.len(), "驾驶舱数据就绪");
        Ok(Self { records })
    }

    pub fn item_count(&self) -> usize {
        self.records.len()
    }

    // ==========================================
    // KPI
    // ==========================================

    /// KPI 汇总
    pub fn kpi_summary(&self) -> KpiSummary {
        let dead = self.value_count(|r| r.stock_status == Some(StockStatus::DeadStock));
        let slow = self.value_count(|r| r.stock_status == Some(StockStatus::SlowMoving));
        let healthy = self.value_count(|r| r.stock_status == Some(StockStatus::Active));

        let n = self.records.len();
        let problem_rate_pct = if n > 0 {
            round_to((dead.count + slow.count) as f64 / n as f64 * 100.0, 1)
        } else {
            0.0
        };

        KpiSummary {
            dead_stock_value: dead.value,
            dead_stock_count: dead.count,
            slow_moving_value: slow.value,
            slow_moving_count: slow.count,
            total_holding_cost: round_to(
                self.records.iter().filter_map(|r| r.holding_cost).sum(),
                2,
            ),
            problem_rate_pct,
            healthy_value: healthy.value,
            healthy_count: healthy.count,
            total_value: self.total_value(),
            total_units: self.records.iter().filter_map(|r| r.current_stock).sum(),
            item_count: n,
        }
    }

    // ==========================================
    // 图表
    // ==========================================

    /// 各状态金额与数量（严重程度降序,四档齐全）
    pub fn status_breakdown(&self) -> Vec<StatusBreakdown> {
        StockStatus::ALL
            .iter()
            .rev()
            .map(|status| {
                let vc = self.value_count(|r| r.stock_status == Some(*status));
                StatusBreakdown {
                    status: *status,
                    stock_value: vc.value,
                    item_count: vc.count,
                }
            })
            .collect()
    }

    /// 各品类问题库存金额（滞销 + 慢销,降序）
    pub fn category_problem_breakdown(&self) -> Vec<CategoryProblemValue> {
        let by_category = self.value_by_category(|s| s.is_problem());

        let mut items: Vec<CategoryProblemValue> = by_category
            .into_iter()
            .map(|(category, value)| CategoryProblemValue {
                category,
                problem_value: round_to(value, 2),
            })
            .collect();
        // 金额相同按品类名升序
        items.sort_by(|a, b| {
            b.problem_value
                .total_cmp(&a.problem_value)
                .then_with(|| a.category.cmp(&b.category))
        });
        items
    }

    // ==========================================
    // 优先清单
    // ==========================================

    /// 紧急度最高的 limit 条（同分保持表内顺序）
    pub fn priority_items(&self, limit: usize) -> Vec<PriorityItem> {
        let mut scored: Vec<(&RawInventoryRecord, f64)> = self
            .records
            .iter()
            .filter_map(|r| r.urgency_score.map(|score| (r, score)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        scored
            .into_iter()
            .take(limit)
            .map(|(r, score)| PriorityItem {
                sku: r.sku.clone().unwrap_or_default(),
                product_name: r.product_name.clone().unwrap_or_default(),
                category: r.category.clone().unwrap_or_default(),
                current_stock: r.current_stock,
                stock_value: r.stock_value.unwrap_or(0.0),
                days_since_last_sale: r.days_since_last_sale,
                urgency_score: score,
                priority_band: PriorityBand::from_score(score),
                action_required: r.action_required.clone().unwrap_or_default(),
            })
            .collect()
    }

    // ==========================================
    // 行动建议
    // ==========================================

    /// 行动建议卡片
    pub fn action_insights(&self) -> ActionInsights {
        let dead = self.value_count(|r| r.stock_status == Some(StockStatus::DeadStock));

        // 同金额取品类名靠前者
        let (focus_category, focus_category_value) = self
            .value_by_category(|s| s == StockStatus::DeadStock)
            .into_iter()
            .fold(None::<(String, f64)>, |best, (category, value)| match best {
                Some((_, best_value)) if best_value >= value => best,
                _ => Some((category, value)),
            })
            .map(|(category, value)| (category, round_to(value, 2)))
            .unwrap_or_else(|| (NO_FOCUS_CATEGORY.to_string(), 0.0));

        let at_risk = self.value_count(|r| {
            r.days_since_last_sale
                .map(|d| d > AT_RISK_MIN_DAYS && d <= AT_RISK_MAX_DAYS)
                .unwrap_or(false)
        });

        ActionInsights {
            quick_win_value: round_to(dead.value * QUICK_WIN_RATIO, 2),
            clear_dead_stock: dead,
            focus_category,
            focus_category_value,
            at_risk,
        }
    }

    /// 顶部横幅
    pub fn summary_banner(&self) -> SummaryBanner {
        let dead = self.value_count(|r| r.stock_status == Some(StockStatus::DeadStock));
        let total_value = self.total_value();
        let dead_stock_share_pct = if total_value > 0.0 {
            round_to(dead.value / total_value * 100.0, 1)
        } else {
            0.0
        };

        SummaryBanner {
            dead_stock_value: dead.value,
            total_value,
            dead_stock_share_pct,
            item_count: self.records.len(),
        }
    }

    // ==========================================
    // 内部聚合
    // ==========================================

    fn total_value(&self) -> f64 {
        round_to(self.records.iter().filter_map(|r| r.stock_value).sum(), 2)
    }

    fn value_count<F>(&self, predicate: F) -> ValueCount
    where
        F: Fn(&RawInventoryRecord) -> bool,
    {
        let (value, count) = self
            .records
            .iter()
            .filter(|r| predicate(r))
            .fold((0.0, 0), |(value, count), r| {
                (value + r.stock_value.unwrap_or(0.0), count + 1)
            });
        ValueCount {
            value: round_to(value, 2),
            count,
        }
    }

    fn value_by_category<F>(&self, status_filter: F) -> BTreeMap<String, f64>
    where
        F: Fn(StockStatus) -> bool,
    {
        let mut by_category = BTreeMap::new();
        for r in &self.records {
            let (Some(status), Some(category)) = (r.stock_status, r.category.as_ref()) else {
                continue;
            };
            if status_filter(status) {
                *by_category.entry(category.clone()).or_insert(0.0) +=
                    r.stock_value.unwrap_or(0.0);
            }
        }
        by_category
    }
}
