// ==========================================
// 滞销库存分析系统 - 库存模拟引擎
// ==========================================
// 职责: 按商品目录生成一年的模拟销售历史,派生指标后交分级引擎
// 红线: 不超卖（单次销量裁剪到剩余库存）
// 红线: 随机数生成器按调用创建,不共享进程级随机状态
// ==========================================
// 流程（每个商品）:
// 1. 进价/售价抽样
// 2. 动销类别加权抽样
// 3. 进货日期抽样（停滞类偏早）
// 4. 初始进货量抽样
// 5. 逐次模拟销售事件（旺季放大）
// 6. 记录最后一次销售日期
// 7. 派生指标 + 分级
// ==========================================

use crate::config::catalog::{CatalogConfig, CategoryConfig, ProductSpec};
use crate::domain::inventory::{InventoryRecord, InventoryTable};
use crate::domain::types::{MovementClass, StockStatus};
use crate::engine::classifier::StockClassifier;
use crate::engine::metrics::{self, round_to};
use chrono::{Datelike, Duration, Local, NaiveDate};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

// ==========================================
// MovementProfile - 动销类别参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementProfile {
    /// 初始进货量区间（含端点）
    pub initial_quantity: (u32, u32),
    /// 两次销售间隔天数区间（含端点）
    pub day_gap: (i64, i64),
    /// 单次销量区间（含端点）
    pub sale_quantity: (u32, u32),
    /// 每轮继续产生销售的概率（1.0 = 不放弃）
    pub continue_probability: f64,
}

// ==========================================
// SimulationParams - 模拟参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    pub fast: MovementProfile,
    pub medium: MovementProfile,
    pub slow: MovementProfile,
    pub dead: MovementProfile,
    /// 加价倍数区间
    pub markup_range: (f64, f64),
    /// 旺季销量放大倍数区间
    pub seasonal_boost: (f64, f64),
    /// 历史窗口天数
    pub history_days: i64,
    /// 停滞类进货日期窗口（窗口起点起算）
    pub dead_receipt_window_days: i64,
    /// 其他类进货日期窗口
    pub receipt_window_days: i64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            fast: MovementProfile {
                initial_quantity: (30, 100),
                day_gap: (1, 4),
                sale_quantity: (3, 15),
                continue_probability: 1.0,
            },
            medium: MovementProfile {
                initial_quantity: (20, 60),
                day_gap: (3, 14),
                sale_quantity: (2, 8),
                continue_probability: 1.0,
            },
            slow: MovementProfile {
                initial_quantity: (10, 40),
                day_gap: (10, 35),
                sale_quantity: (1, 4),
                continue_probability: 1.0,
            },
            dead: MovementProfile {
                initial_quantity: (10, 50),
                day_gap: (45, 100),
                sale_quantity: (1, 2),
                continue_probability: 0.15,
            },
            markup_range: (1.15, 1.45),
            seasonal_boost: (1.3, 2.0),
            history_days: 365,
            dead_receipt_window_days: 180,
            receipt_window_days: 300,
        }
    }
}

impl SimulationParams {
    pub fn profile(&self, class: MovementClass) -> &MovementProfile {
        match class {
            MovementClass::Fast => &self.fast,
            MovementClass::Medium => &self.medium,
            MovementClass::Slow => &self.slow,
            MovementClass::Dead => &self.dead,
        }
    }
}

// ==========================================
// SaleHistory - 单品销售模拟结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleHistory {
    pub initial_quantity: u32,
    pub remaining_quantity: u32,
    pub last_sale_date: NaiveDate,
    pub sale_events: u32,
}

// ==========================================
// InventorySimulator - 库存模拟引擎
// ==========================================
pub struct InventorySimulator {
    catalog: CatalogConfig,
    params: SimulationParams,
    classifier: StockClassifier,
}

impl InventorySimulator {
    /// 创建模拟引擎（默认参数 + 默认分级阈值）
    ///
    /// 目录不做拒绝: 非法区间在抽样时按 ordered_* 规整
    pub fn new(catalog: CatalogConfig) -> Self {
        if let Err(e) = catalog.validate() {
            warn!(error = %e, "商品目录未通过校验，非法区间按规整后的值抽样");
        }
        Self {
            catalog,
            params: SimulationParams::default(),
            classifier: StockClassifier::new(),
        }
    }

    pub fn with_params(mut self, params: SimulationParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_classifier(mut self, classifier: StockClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn catalog(&self) -> &CatalogConfig {
        &self.catalog
    }

    // ==========================================
    // 入口
    // ==========================================

    /// 以今天为参照日期生成模拟库存表
    ///
    /// # 参数
    /// - product_count_hint: 商品数量提示（仅供参考,实际数量 = 目录商品数）
    /// - seed: 随机种子
    ///
    /// # 说明
    /// 相同种子下商品结构与价格可复现;
    /// 与日期相关的字段随参照日期变化,需要固定时使用 generate_at
    pub fn generate(&self, product_count_hint: usize, seed: u64) -> InventoryTable {
        let today = Local::now().date_naive();
        InventoryTable::from_records(&self.generate_at(product_count_hint, seed, today))
    }

    /// 以指定参照日期生成模拟库存记录（已分级）
    #[instrument(skip(self), fields(catalog_size = self.catalog.product_count()))]
    pub fn generate_at(
        &self,
        product_count_hint: usize,
        seed: u64,
        reference_date: NaiveDate,
    ) -> Vec<InventoryRecord> {
        let catalog_size = self.catalog.product_count();
        if product_count_hint != catalog_size {
            debug!(
                hint = product_count_hint,
                actual = catalog_size,
                "商品数量提示与目录不一致，以目录为准"
            );
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let window_start = reference_date - Duration::days(self.params.history_days);

        let mut records = Vec::with_capacity(catalog_size);
        let mut sku_counter = 1usize;

        for category in &self.catalog.categories {
            for product in &category.products {
                let sku = Self::make_sku(&category.name, sku_counter);
                sku_counter += 1;

                let mut record = self.simulate_product(
                    &mut rng,
                    category,
                    product,
                    sku,
                    window_start,
                    reference_date,
                );
                self.classifier.classify_record(&mut record);
                records.push(record);
            }
        }

        let dead_count = records
            .iter()
            .filter(|r| r.stock_status == StockStatus::DeadStock)
            .count();
        info!(
            products = records.len(),
            dead_stock = dead_count,
            seed = seed,
            reference_date = %reference_date,
            "模拟库存生成完成"
        );

        records
    }

    // ==========================================
    // 单品模拟
    // ==========================================

    /// SKU 格式: SPZ-{品类前三字母大写}-{序号4位}
    pub fn make_sku(category_name: &str, counter: usize) -> String {
        let prefix: String = category_name.chars().take(3).collect::<String>().to_uppercase();
        format!("SPZ-{}-{:04}", prefix, counter)
    }

    fn simulate_product(
        &self,
        rng: &mut StdRng,
        category: &CategoryConfig,
        product: &ProductSpec,
        sku: String,
        window_start: NaiveDate,
        reference_date: NaiveDate,
    ) -> InventoryRecord {
        // 1. 价格
        let (cost_min, cost_max) = ordered_f64(category.price_range, 0.0);
        let unit_cost = round_to(rng.gen_range(cost_min..=cost_max), 2);
        let (markup_min, markup_max) = ordered_f64(self.params.markup_range, 1.0);
        let markup = rng.gen_range(markup_min..=markup_max);
        let unit_price = round_to(unit_cost * markup, 2);

        // 2. 动销类别
        let movement = self.draw_movement(rng, category);

        // 3. 进货日期
        let receipt_window = if movement == MovementClass::Dead {
            self.params.dead_receipt_window_days
        } else {
            self.params.receipt_window_days
        };
        let stock_received_date =
            window_start + Duration::days(rng.gen_range(0..=receipt_window.max(0)));

        // 4. 初始进货量
        let profile = self.params.profile(movement);
        let (qty_min, qty_max) = ordered(match (movement, category.fast_stock_range) {
            (MovementClass::Fast, Some(range)) => range,
            _ => profile.initial_quantity,
        });
        let initial_quantity = rng.gen_range(qty_min..=qty_max);

        // 5-6. 销售模拟
        let history = self.simulate_sales(
            rng,
            category,
            profile,
            stock_received_date,
            reference_date,
            initial_quantity,
        );

        // 7. 派生指标
        let current_stock = history.remaining_quantity;
        let total_sold = initial_quantity - current_stock;
        let days_since_last_sale = metrics::days_between(history.last_sale_date, reference_date);
        let days_in_stock = metrics::days_between(stock_received_date, reference_date);
        let stock = current_stock as f64;

        InventoryRecord {
            sku,
            product_name: format!("{} ({})", product.name, product.variant),
            category: category.name.clone(),
            variant: product.variant.clone(),
            unit_cost,
            unit_price,
            profit_margin_pct: metrics::profit_margin_pct(unit_cost, unit_price),
            initial_quantity,
            current_stock,
            total_sold,
            stock_received_date,
            last_sale_date: history.last_sale_date,
            days_since_last_sale,
            days_in_stock,
            monthly_velocity: metrics::monthly_velocity(total_sold as f64, days_in_stock),
            stock_value: metrics::stock_value(stock, unit_cost),
            potential_revenue: metrics::potential_revenue(stock, unit_price),
            holding_cost: metrics::holding_cost(
                stock,
                unit_cost,
                category.holding_cost_rate,
                days_in_stock,
            ),
            movement_category: movement,
            // 分级字段由分级引擎写入
            stock_status: StockStatus::Active,
            urgency_score: 0.0,
            action_required: String::new(),
        }
    }

    /// 按品类权重抽取动销类别
    fn draw_movement(&self, rng: &mut StdRng, category: &CategoryConfig) -> MovementClass {
        let weights = category.effective_weights();
        match WeightedIndex::new(weights.iter().map(|w| w.weight)) {
            Ok(dist) => weights[dist.sample(rng)].class,
            Err(e) => {
                // 目录载入时已校验,此处仅兜底
                warn!(category = %category.name, error = %e, "动销权重非法，按中速处理");
                MovementClass::Medium
            }
        }
    }

    /// 模拟销售事件序列
    ///
    /// # 规则
    /// - 循环条件: 当前日期 < 参照日期 且 剩余库存 > 0
    /// - 停滞类每轮以 continue_probability 继续,否则放弃
    /// - 销售日期落在旺季月份时销量按 [1.3, 2.0] 倍放大（向下取整）
    /// - 销量裁剪到剩余库存
    /// - 仅当销售日期仍早于参照日期且销量 > 0 时记账
    pub fn simulate_sales(
        &self,
        rng: &mut StdRng,
        category: &CategoryConfig,
        profile: &MovementProfile,
        stock_received_date: NaiveDate,
        reference_date: NaiveDate,
        initial_quantity: u32,
    ) -> SaleHistory {
        let mut remaining = initial_quantity;
        let mut current_date = stock_received_date;
        let mut last_sale_date = stock_received_date;
        let mut sale_events = 0u32;

        // 间隔至少 1 天,保证日期推进
        let (gap_min, gap_max) = ordered((profile.day_gap.0.max(1), profile.day_gap.1.max(1)));
        let (qty_min, qty_max) = ordered(profile.sale_quantity);
        let (boost_min, boost_max) = ordered_f64(self.params.seasonal_boost, 1.0);

        while current_date < reference_date && remaining > 0 {
            if profile.continue_probability < 1.0 && rng.gen::<f64>() >= profile.continue_probability {
                break;
            }

            let days_gap = rng.gen_range(gap_min..=gap_max);
            let mut sale_qty = rng.gen_range(qty_min..=qty_max);

            current_date = current_date + Duration::days(days_gap);

            // 旺季放大
            if category.is_peak_month(current_date.month()) {
                let boost = rng.gen_range(boost_min..=boost_max);
                sale_qty = (sale_qty as f64 * boost).floor() as u32;
            }

            // 不超卖
            sale_qty = sale_qty.min(remaining);

            if current_date < reference_date && sale_qty > 0 {
                last_sale_date = current_date;
                remaining -= sale_qty;
                sale_events += 1;
            }
        }

        SaleHistory {
            initial_quantity,
            remaining_quantity: remaining,
            last_sale_date,
            sale_events,
        }
    }
}

/// 区间端点按升序返回
fn ordered<T: PartialOrd + Copy>((a, b): (T, T)) -> (T, T) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// 浮点区间: 非有限值替换为 fallback,下限不低于 0,端点按升序
fn ordered_f64((a, b): (f64, f64), fallback: f64) -> (f64, f64) {
    let clean = |v: f64| if v.is_finite() { v.max(0.0) } else { fallback };
    ordered((clean(a), clean(b)))
}

impl Default for InventorySimulator {
    fn default() -> Self {
        Self::new(CatalogConfig::default())
    }
}
