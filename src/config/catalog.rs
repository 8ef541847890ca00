// ==========================================
// 滞销库存分析系统 - 商品目录配置
// ==========================================
// 职责: 品类 → 进价区间 / 持有费率 / 旺季月份 / 动销权重 / 商品清单
// 说明: 目录可从 JSON 载入,替换地区目录无需改动模拟逻辑
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::types::MovementClass;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ==========================================
// 数据结构
// ==========================================

/// 动销类别权重
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementWeight {
    pub class: MovementClass,
    pub weight: f64,
}

/// 单个商品 (名称, 品牌/规格)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSpec {
    pub name: String,
    pub variant: String,
}

/// 品类配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    /// 进价区间 (min, max)
    pub price_range: (f64, f64),
    /// 月持有费率
    pub holding_cost_rate: f64,
    /// 旺季月份 (1-12)
    pub seasonality_months: Vec<u32>,
    /// 动销类别权重；为空时使用默认权重
    #[serde(default)]
    pub movement_weights: Vec<MovementWeight>,
    /// 快销品初始进货量覆写 (min, max)
    #[serde(default)]
    pub fast_stock_range: Option<(u32, u32)>,
    pub products: Vec<ProductSpec>,
}

impl CategoryConfig {
    /// 实际生效的动销权重
    pub fn effective_weights(&self) -> Vec<MovementWeight> {
        if self.movement_weights.is_empty() {
            default_movement_weights()
        } else {
            self.movement_weights.clone()
        }
    }

    pub fn is_peak_month(&self, month: u32) -> bool {
        self.seasonality_months.contains(&month)
    }
}

/// 商品目录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// 货币代码（展示用）
    pub currency: String,
    pub categories: Vec<CategoryConfig>,
}

impl CatalogConfig {
    /// 从 JSON 文件载入并校验
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&raw)
    }

    /// 从 JSON 字符串载入并校验
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let catalog: CatalogConfig = serde_json::from_str(raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// 商品总数
    pub fn product_count(&self) -> usize {
        self.categories.iter().map(|c| c.products.len()).sum()
    }

    /// 按名称查品类（精确匹配）
    pub fn category(&self, name: &str) -> Option<&CategoryConfig> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// 品类月持有费率
    pub fn holding_rate(&self, category: &str) -> Option<f64> {
        self.category(category).map(|c| c.holding_cost_rate)
    }

    /// 校验目录
    ///
    /// # 规则
    /// - 品类名非空且不重复
    /// - 0 ≤ min ≤ max
    /// - 持有费率 ≥ 0
    /// - 旺季月份 ∈ [1, 12]
    /// - 权重非负且总和 > 0
    /// - 快销进货量覆写 min ≤ max
    pub fn validate(&self) -> ConfigResult<()> {
        let mut seen = std::collections::HashSet::new();
        for category in &self.categories {
            let invalid = |message: String| ConfigError::InvalidCatalog {
                category: category.name.clone(),
                message,
            };

            if category.name.trim().is_empty() {
                return Err(invalid("品类名为空".to_string()));
            }
            if !seen.insert(category.name.as_str()) {
                return Err(invalid("品类名重复".to_string()));
            }

            let (min, max) = category.price_range;
            if !(min >= 0.0 && min <= max) {
                return Err(invalid(format!("进价区间非法: ({}, {})", min, max)));
            }
            if category.holding_cost_rate < 0.0 {
                return Err(invalid(format!(
                    "持有费率为负: {}",
                    category.holding_cost_rate
                )));
            }
            if let Some(month) = category
                .seasonality_months
                .iter()
                .find(|m| !(1..=12).contains(*m))
            {
                return Err(invalid(format!("旺季月份非法: {}", month)));
            }

            let weights = category.effective_weights();
            if weights.iter().any(|w| w.weight < 0.0) {
                return Err(invalid("动销权重为负".to_string()));
            }
            if weights.iter().map(|w| w.weight).sum::<f64>() <= 0.0 {
                return Err(invalid("动销权重总和为 0".to_string()));
            }

            if let Some((lo, hi)) = category.fast_stock_range {
                if lo > hi {
                    return Err(invalid(format!("快销进货量区间非法: ({}, {})", lo, hi)));
                }
            }
        }
        Ok(())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        spaza_catalog()
    }
}

// ==========================================
// 默认权重
// ==========================================

fn weights(entries: &[(MovementClass, f64)]) -> Vec<MovementWeight> {
    entries
        .iter()
        .map(|&(class, weight)| MovementWeight { class, weight })
        .collect()
}

/// 一般品类默认权重: fast .30 / medium .35 / slow .20 / dead .15
pub fn default_movement_weights() -> Vec<MovementWeight> {
    weights(&[
        (MovementClass::Fast, 0.30),
        (MovementClass::Medium, 0.35),
        (MovementClass::Slow, 0.20),
        (MovementClass::Dead, 0.15),
    ])
}

// ==========================================
// 内置目录: 博茨瓦纳社区小店 (BWP)
// ==========================================

fn category(
    name: &str,
    price_range: (f64, f64),
    holding_cost_rate: f64,
    seasonality_months: &[u32],
    movement_weights: Vec<MovementWeight>,
    fast_stock_range: Option<(u32, u32)>,
    products: &[(&str, &str)],
) -> CategoryConfig {
    CategoryConfig {
        name: name.to_string(),
        price_range,
        holding_cost_rate,
        seasonality_months: seasonality_months.to_vec(),
        movement_weights,
        fast_stock_range,
        products: products
            .iter()
            .map(|(name, variant)| ProductSpec {
                name: name.to_string(),
                variant: variant.to_string(),
            })
            .collect(),
    }
}

/// 内置社区小店目录（8 个品类,113 个商品）
pub fn spaza_catalog() -> CatalogConfig {
    use MovementClass::*;

    let all_year: Vec<u32> = (1..=12).collect();
    let staple_weights = || weights(&[(Fast, 0.7), (Medium, 0.3)]);

    CatalogConfig {
        currency: "BWP".to_string(),
        categories: vec![
            category(
                "Groceries",
                (8.0, 120.0),
                0.02,
                &[12, 1, 4],
                Vec::new(),
                None,
                &[
                    ("Maize Meal 2.5kg", "White Star"),
                    ("Maize Meal 5kg", "White Star"),
                    ("Maize Meal 1kg", "Iwisa"),
                    ("Cooking Oil 750ml", "Sunfoil"),
                    ("Cooking Oil 2L", "Golden Fry"),
                    ("Sugar 2kg", "White"),
                    ("Sugar 1kg", "Brown"),
                    ("Rice 2kg", "Tastic"),
                    ("Rice 1kg", "Spekko"),
                    ("Flour 2.5kg", "Snowflake"),
                    ("Salt 500g", "Cerebos"),
                    ("Tea 100 bags", "Five Roses"),
                    ("Tea 50 bags", "Joko"),
                    ("Coffee 200g", "Ricoffy"),
                    ("Beans 410g", "KOO"),
                    ("Pilchards 400g", "Lucky Star"),
                    ("Chakalaka 410g", "KOO"),
                    ("Tomato Sauce 700ml", "All Gold"),
                    ("Peanut Butter 400g", "Black Cat"),
                    ("Jam 450g", "Fynbos"),
                    ("Milk Powder 400g", "Nespray"),
                    ("Custard 500g", "Ultramel"),
                ],
            ),
            category(
                "Beverages",
                (5.0, 35.0),
                0.015,
                &[10, 11, 12, 1, 2],
                Vec::new(),
                None,
                &[
                    ("Coca Cola 2L", "Coke"),
                    ("Coca Cola 500ml", "Coke"),
                    ("Fanta Orange 2L", "Fanta"),
                    ("Sprite 500ml", "Sprite"),
                    ("Oros 2L", "Orange"),
                    ("Oros 2L", "Tropical"),
                    ("Mazoe 2L", "Orange"),
                    ("Juice 1L", "Ceres Apple"),
                    ("Juice 1L", "Liqui Fruit"),
                    ("Water 500ml", "Bonaqua"),
                    ("Water 5L", "Aquartz"),
                    ("Energy Drink", "Score"),
                    ("Energy Drink", "Red Bull"),
                    ("Milk 1L", "Clover Fresh"),
                    ("Milk 1L", "Steri Stumpie"),
                    ("Yoghurt 1kg", "Danone"),
                ],
            ),
            category(
                "Snacks",
                (3.0, 25.0),
                0.01,
                &[3, 4, 6, 7, 12],
                Vec::new(),
                None,
                &[
                    ("Chips 125g", "Simba Chutney"),
                    ("Chips 125g", "Lays Salt"),
                    ("Chips 36g", "Nik Naks"),
                    ("Chips 125g", "Doritos"),
                    ("Biscuits", "Marie"),
                    ("Biscuits", "Tennis"),
                    ("Biscuits", "Romany Creams"),
                    ("Biscuits", "Oreos"),
                    ("Chocolate", "Cadbury Dairy Milk"),
                    ("Chocolate", "Bar One"),
                    ("Chocolate", "KitKat"),
                    ("Sweets", "Jelly Babies"),
                    ("Sweets", "Wine Gums"),
                    ("Sweets", "Chappies"),
                    ("Popcorn", "Act II"),
                    ("Nuts 100g", "Peanuts Salted"),
                    ("Dried Fruit", "Safari Mix"),
                ],
            ),
            category(
                "Personal Care",
                (12.0, 85.0),
                0.012,
                &[1, 2, 9],
                Vec::new(),
                None,
                &[
                    ("Soap", "Sunlight Bar"),
                    ("Soap", "Lux"),
                    ("Soap", "Dettol"),
                    ("Toothpaste 100ml", "Colgate"),
                    ("Toothpaste 50ml", "Aquafresh"),
                    ("Lotion 400ml", "Vaseline"),
                    ("Lotion 200ml", "Dawn"),
                    ("Petroleum Jelly 250ml", "Vaseline"),
                    ("Deodorant", "Shield"),
                    ("Deodorant", "Axe"),
                    ("Shampoo 400ml", "Sunsilk"),
                    ("Body Wash 400ml", "Dettol"),
                    ("Roll-on", "Nivea"),
                    ("Face Cream", "Pond's"),
                    ("Hair Food", "Sta Sof Fro"),
                    ("Sanitary Pads", "Always"),
                ],
            ),
            category(
                "Household",
                (8.0, 65.0),
                0.008,
                &[1, 4, 12],
                Vec::new(),
                None,
                &[
                    ("Candles 6 pack", "White"),
                    ("Matches Box", "Lion"),
                    ("Washing Powder 1kg", "Omo"),
                    ("Washing Powder 2kg", "Sunlight"),
                    ("Dish Soap 750ml", "Sunlight"),
                    ("Bleach 750ml", "Jik"),
                    ("Floor Polish 750ml", "Cobra"),
                    ("Air Freshener", "Airoma"),
                    ("Toilet Paper 2pk", "Twinsaver"),
                    ("Paper Towels", "Checkers"),
                    ("Refuse Bags 20s", "Black"),
                    ("Sponge Scourers", "Scrub"),
                    ("Steel Wool", "Brillo"),
                    ("Insect Spray", "Doom"),
                    ("Batteries AA 4pk", "Eveready"),
                ],
            ),
            category(
                "Airtime & Essentials",
                (5.0, 100.0),
                0.005,
                &all_year,
                staple_weights(),
                Some((50, 200)),
                &[
                    ("Airtime P5", "Mascom"),
                    ("Airtime P10", "Mascom"),
                    ("Airtime P25", "Mascom"),
                    ("Airtime P50", "Mascom"),
                    ("Airtime P5", "Orange"),
                    ("Airtime P10", "Orange"),
                    ("Airtime P25", "Orange"),
                    ("Airtime P10", "BTC"),
                    ("Data Bundle P20", "Mascom"),
                    ("Data Bundle P50", "Mascom"),
                    ("Electricity Voucher", "BPC"),
                    ("Prepaid Water", "WUC"),
                ],
            ),
            category(
                "Bread & Bakery",
                (8.0, 35.0),
                0.04,
                &all_year,
                staple_weights(),
                None,
                &[
                    ("Bread White", "Albany"),
                    ("Bread Brown", "Albany"),
                    ("Bread White", "Blue Ribbon"),
                    ("Bread Whole Wheat", "Sasko"),
                    ("Rolls 6 pack", "Hot Dog"),
                    ("Scones 6 pack", "Fresh"),
                    ("Vetkoek 4 pack", "Fresh"),
                    ("Fat Cakes 6 pack", "Homemade"),
                ],
            ),
            category(
                "Tobacco & Extras",
                (25.0, 80.0),
                0.008,
                &[12, 1, 6],
                weights(&[(Fast, 0.4), (Medium, 0.4), (Slow, 0.2)]),
                None,
                &[
                    ("Cigarettes", "Peter Stuyvesant"),
                    ("Cigarettes", "Dunhill"),
                    ("Cigarettes", "Rothmans"),
                    ("Cigarettes", "Pacific"),
                    ("Loose Tobacco", "Boxer"),
                    ("Rolling Paper", "Rizla"),
                    ("Lighters 3pk", "Bic"),
                ],
            ),
        ],
    }
}
