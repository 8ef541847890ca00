// ==========================================
// 滞销库存分析系统 - 缺失列回填服务
// ==========================================
// 职责: 上传表缺少派生列时逐行计算或给出默认值
// 红线: 只追加缺失列,已存在的列一个字节都不改
// 顺序: stock_value → days_since_last_sale → stock_status → urgency_score
//       → holding_cost → action_required → monthly_velocity
// ==========================================

use crate::config::catalog::CatalogConfig;
use crate::domain::inventory::{format_decimal, InventoryTable, RawInventoryRecord};
use crate::domain::schema::{columns, BACKFILL_COLUMNS};
use crate::domain::types::{RecommendedAction, StockStatus};
use crate::engine::classifier::{
    StockClassifier, UrgencyInput, DEFAULT_DAYS_SINCE_LAST_SALE, DEFAULT_HOLDING_COST,
    DEFAULT_URGENCY_SCORE,
};
use crate::engine::metrics;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// BackfillValue - 单元格取值来源
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum BackfillValue<T> {
    /// 上传表已提供
    Supplied(T),
    /// 由其他列按公式计算
    Derived(T),
    /// 输入不足,使用默认值
    Defaulted(T),
}

impl<T> BackfillValue<T> {
    pub fn value(&self) -> &T {
        match self {
            BackfillValue::Supplied(v) | BackfillValue::Derived(v) | BackfillValue::Defaulted(v) => v,
        }
    }

    /// 非默认值（可作为后续公式的可信输入）
    pub fn is_known(&self) -> bool {
        !matches!(self, BackfillValue::Defaulted(_))
    }
}

// ==========================================
// ResolvedRow - 单行回填结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRow {
    pub stock_value: BackfillValue<f64>,
    pub days_since_last_sale: BackfillValue<i64>,
    pub stock_status: BackfillValue<StockStatus>,
    pub urgency_score: BackfillValue<f64>,
    pub holding_cost: BackfillValue<f64>,
    pub action_required: BackfillValue<String>,
    pub monthly_velocity: BackfillValue<f64>,
}

impl ResolvedRow {
    /// 指定回填列的单元格文本与来源
    fn cell(&self, column: &str) -> Option<(String, bool)> {
        let cell = match column {
            columns::STOCK_VALUE => (
                format_decimal(*self.stock_value.value()),
                self.stock_value.is_known(),
            ),
            columns::DAYS_SINCE_LAST_SALE => (
                self.days_since_last_sale.value().to_string(),
                self.days_since_last_sale.is_known(),
            ),
            columns::STOCK_STATUS => (
                self.stock_status.value().to_string(),
                self.stock_status.is_known(),
            ),
            columns::URGENCY_SCORE => (
                format_decimal(*self.urgency_score.value()),
                self.urgency_score.is_known(),
            ),
            columns::HOLDING_COST => (
                format_decimal(*self.holding_cost.value()),
                self.holding_cost.is_known(),
            ),
            columns::ACTION_REQUIRED => (
                self.action_required.value().clone(),
                self.action_required.is_known(),
            ),
            columns::MONTHLY_VELOCITY => (
                format_decimal(*self.monthly_velocity.value()),
                self.monthly_velocity.is_known(),
            ),
            _ => return None,
        };
        Some(cell)
    }
}

// ==========================================
// BackfillReport - 回填统计
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackfillColumnStats {
    pub column: String,
    pub derived: usize,
    pub defaulted: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackfillReport {
    /// 按追加顺序列出被回填的列
    pub columns: Vec<BackfillColumnStats>,
}

impl BackfillReport {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&BackfillColumnStats> {
        self.columns.iter().find(|c| c.column == name)
    }

    pub fn backfilled_columns(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.column.as_str()).collect()
    }
}

// ==========================================
// BackfillService - 回填服务
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct BackfillService {
    catalog: CatalogConfig,
    classifier: StockClassifier,
}

impl BackfillService {
    pub fn new(catalog: CatalogConfig, classifier: StockClassifier) -> Self {
        Self {
            catalog,
            classifier,
        }
    }

    /// 逐行解析各回填字段的取值
    ///
    /// # 参数
    /// - raw: 字段映射后的单行
    /// - reference: 计算天数差的基准日
    pub fn resolve_row(&self, raw: &RawInventoryRecord, reference: NaiveDate) -> ResolvedRow {
        let stock_value = self.resolve_stock_value(raw);
        let days_since_last_sale = self.resolve_days_since_last_sale(raw, reference);
        let stock_status = self.resolve_stock_status(raw, &days_since_last_sale);
        // 紧急度读取持有成本,先于其计算
        let holding_cost = self.resolve_holding_cost(raw, reference);
        let urgency_score =
            self.resolve_urgency(raw, &days_since_last_sale, &stock_value, &holding_cost);
        let action_required = self.resolve_action(raw, &stock_status);
        let monthly_velocity = self.resolve_monthly_velocity(raw, reference);

        ResolvedRow {
            stock_value,
            days_since_last_sale,
            stock_status,
            urgency_score,
            holding_cost,
            action_required,
            monthly_velocity,
        }
    }

    /// stock_value = current_stock × unit_cost
    pub fn resolve_stock_value(&self, raw: &RawInventoryRecord) -> BackfillValue<f64> {
        if let Some(v) = raw.stock_value {
            return BackfillValue::Supplied(v);
        }
        match (raw.current_stock, raw.unit_cost) {
            (Some(stock), Some(cost)) => {
                BackfillValue::Derived(metrics::stock_value(stock as f64, cost))
            }
            _ => BackfillValue::Defaulted(0.0),
        }
    }

    /// days_since_last_sale = reference - last_sale_date,否则默认 0
    pub fn resolve_days_since_last_sale(
        &self,
        raw: &RawInventoryRecord,
        reference: NaiveDate,
    ) -> BackfillValue<i64> {
        if let Some(days) = raw.days_since_last_sale {
            return BackfillValue::Supplied(days);
        }
        match raw.last_sale_date {
            Some(date) => BackfillValue::Derived(metrics::days_between(date, reference)),
            None => BackfillValue::Defaulted(DEFAULT_DAYS_SINCE_LAST_SALE),
        }
    }

    /// stock_status 由天数分级；天数为默认值时结果也视为默认
    pub fn resolve_stock_status(
        &self,
        raw: &RawInventoryRecord,
        days: &BackfillValue<i64>,
    ) -> BackfillValue<StockStatus> {
        if let Some(status) = raw.stock_status {
            return BackfillValue::Supplied(status);
        }
        let status = self.classifier.classify_status(*days.value());
        if days.is_known() {
            BackfillValue::Derived(status)
        } else {
            BackfillValue::Defaulted(status)
        }
    }

    /// urgency_score: 天数已知时按完整公式,否则默认 50
    pub fn resolve_urgency(
        &self,
        raw: &RawInventoryRecord,
        days: &BackfillValue<i64>,
        stock_value: &BackfillValue<f64>,
        holding_cost: &BackfillValue<f64>,
    ) -> BackfillValue<f64> {
        if let Some(score) = raw.urgency_score {
            return BackfillValue::Supplied(score);
        }
        if !days.is_known() {
            return BackfillValue::Defaulted(DEFAULT_URGENCY_SCORE);
        }
        let input = UrgencyInput::new(
            Some(*days.value()),
            *stock_value.value(),
            *holding_cost.value(),
        );
        BackfillValue::Derived(self.classifier.compute_urgency(&input))
    }

    /// holding_cost: 需要在库天数（或入库日期）且品类在目录中,否则默认 0
    pub fn resolve_holding_cost(
        &self,
        raw: &RawInventoryRecord,
        reference: NaiveDate,
    ) -> BackfillValue<f64> {
        if let Some(cost) = raw.holding_cost {
            return BackfillValue::Supplied(cost);
        }

        let rate = raw
            .category
            .as_deref()
            .and_then(|c| self.catalog.holding_rate(c));
        let days_in_stock = Self::days_in_stock(raw, reference);

        match (raw.current_stock, raw.unit_cost, rate, days_in_stock) {
            (Some(stock), Some(cost), Some(rate), Some(days)) => BackfillValue::Derived(
                metrics::holding_cost(stock as f64, cost, rate, days),
            ),
            _ => BackfillValue::Defaulted(DEFAULT_HOLDING_COST),
        }
    }

    /// action_required: 状态可信时查表,否则 "Review"
    pub fn resolve_action(
        &self,
        raw: &RawInventoryRecord,
        status: &BackfillValue<StockStatus>,
    ) -> BackfillValue<String> {
        if let Some(action) = &raw.action_required {
            return BackfillValue::Supplied(action.clone());
        }
        if status.is_known() {
            BackfillValue::Derived(self.classifier.recommend_action(*status.value()).to_string())
        } else {
            BackfillValue::Defaulted(RecommendedAction::Review.to_string())
        }
    }

    /// monthly_velocity: 需要 initial_quantity 与在库天数（或入库日期）,否则默认 0
    pub fn resolve_monthly_velocity(
        &self,
        raw: &RawInventoryRecord,
        reference: NaiveDate,
    ) -> BackfillValue<f64> {
        if let Some(v) = raw.monthly_velocity {
            return BackfillValue::Supplied(v);
        }
        match (
            raw.initial_quantity,
            raw.current_stock,
            Self::days_in_stock(raw, reference),
        ) {
            (Some(initial), Some(current), Some(days)) => {
                let sold = (initial - current).max(0) as f64;
                BackfillValue::Derived(metrics::monthly_velocity(sold, days))
            }
            _ => BackfillValue::Defaulted(0.0),
        }
    }

    /// 在库天数: 优先取上传的 days_in_stock,否则 reference - stock_received_date
    fn days_in_stock(raw: &RawInventoryRecord, reference: NaiveDate) -> Option<i64> {
        raw.days_in_stock.or_else(|| {
            raw.stock_received_date
                .map(|date| metrics::days_between(date, reference))
        })
    }

    /// 为表追加全部缺失的回填列
    ///
    /// # 参数
    /// - table: 已通过结构校验的上传表
    /// - rows: 与 table 行一一对应的回填结果
    ///
    /// # 返回
    /// - 回填统计（不缺列时为空）
    pub fn apply(&self, table: &mut InventoryTable, rows: &[ResolvedRow]) -> BackfillReport {
        let mut report = BackfillReport::default();

        for column in BACKFILL_COLUMNS {
            if table.has_column(column) {
                continue;
            }

            let mut values = Vec::with_capacity(rows.len());
            let mut stats = BackfillColumnStats {
                column: column.to_string(),
                derived: 0,
                defaulted: 0,
            };
            for row in rows {
                if let Some((text, known)) = row.cell(column) {
                    if known {
                        stats.derived += 1;
                    } else {
                        stats.defaulted += 1;
                    }
                    values.push(text);
                }
            }

            if table.append_column(column, values) {
                report.columns.push(stats);
            }
        }

        report
    }
}
