// ==========================================
// 滞销库存分析系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、默认值管理
// 存储: 扁平 key-value（JSON 文件载入,命令行可覆写）
// ==========================================

use crate::config::catalog::CatalogConfig;
use crate::config::error::{ConfigError, ConfigResult};
use crate::engine::classifier::StatusThresholds;
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: HashMap<String, String>,
}

impl ConfigManager {
    /// 创建空配置（全部取默认值）
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 文件载入配置
    ///
    /// # 格式
    /// 扁平对象: { "simulation.seed": 7, "catalog.path": "catalog.json" }
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&raw)
    }

    /// 从 JSON 字符串载入配置
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let parsed: BTreeMap<String, Value> = serde_json::from_str(raw)?;

        let values = parsed
            .into_iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| {
                let text = match v {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (k, text)
            })
            .collect::<HashMap<_, _>>();

        debug!(keys = values.len(), "配置载入完成");
        Ok(Self { values })
    }

    /// 覆写单个配置项
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// 读取配置值
    pub fn get_config_value(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// 读取并解析配置值
    fn parse_value<T: FromStr>(&self, key: &str, default: T) -> ConfigResult<T>
    where
        T::Err: std::fmt::Display,
    {
        match self.get_config_value(key) {
            None => Ok(default),
            Some(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::ConfigValueError {
                key: key.to_string(),
                value: raw.to_string(),
                message: e.to_string(),
            }),
        }
    }

    // ==========================================
    // 模拟配置
    // ==========================================

    /// 模拟随机种子（默认 42）
    pub fn get_seed(&self) -> ConfigResult<u64> {
        self.parse_value(config_keys::SIMULATION_SEED, defaults::SEED)
    }

    /// 商品数量提示（默认 120，仅供参考）
    pub fn get_product_count_hint(&self) -> ConfigResult<usize> {
        self.parse_value(
            config_keys::SIMULATION_PRODUCT_COUNT_HINT,
            defaults::PRODUCT_COUNT_HINT,
        )
    }

    /// 参照日期（未配置时返回 None,由调用方取当天）
    pub fn get_reference_date(&self) -> ConfigResult<Option<NaiveDate>> {
        match self.get_config_value(config_keys::SIMULATION_REFERENCE_DATE) {
            None => Ok(None),
            Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .map(Some)
                .map_err(|e| ConfigError::ConfigValueError {
                    key: config_keys::SIMULATION_REFERENCE_DATE.to_string(),
                    value: raw.to_string(),
                    message: e.to_string(),
                }),
        }
    }

    // ==========================================
    // 分级配置
    // ==========================================

    /// 状态分级阈值（默认 30/90/180）
    pub fn get_status_thresholds(&self) -> ConfigResult<StatusThresholds> {
        let defaults = StatusThresholds::default();
        let thresholds = StatusThresholds {
            moderate_days: self.parse_value(config_keys::MODERATE_DAYS, defaults.moderate_days)?,
            slow_moving_days: self
                .parse_value(config_keys::SLOW_MOVING_DAYS, defaults.slow_moving_days)?,
            dead_stock_days: self.parse_value(config_keys::DEAD_STOCK_DAYS, defaults.dead_stock_days)?,
        };

        if !(thresholds.moderate_days < thresholds.slow_moving_days
            && thresholds.slow_moving_days < thresholds.dead_stock_days)
        {
            return Err(ConfigError::ConfigValueError {
                key: "classifier.*_days".to_string(),
                value: format!(
                    "{}/{}/{}",
                    thresholds.moderate_days, thresholds.slow_moving_days, thresholds.dead_stock_days
                ),
                message: "阈值必须严格递增".to_string(),
            });
        }

        Ok(thresholds)
    }

    // ==========================================
    // 商品目录
    // ==========================================

    /// 商品目录：配置了 catalog.path 则从文件载入,否则使用内置目录
    pub fn get_catalog(&self) -> ConfigResult<CatalogConfig> {
        match self.get_config_value(config_keys::CATALOG_PATH) {
            Some(path) => CatalogConfig::from_file(path),
            None => Ok(CatalogConfig::default()),
        }
    }

    /// 获取所有配置的快照（JSON格式，按 key 排序）
    pub fn get_config_snapshot(&self) -> String {
        let ordered: BTreeMap<&String, &String> = self.values.iter().collect();
        serde_json::to_string(&ordered).unwrap_or_else(|_| "{}".to_string())
    }
}

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    // 模拟
    pub const SIMULATION_SEED: &str = "simulation.seed";
    pub const SIMULATION_PRODUCT_COUNT_HINT: &str = "simulation.product_count_hint";
    pub const SIMULATION_REFERENCE_DATE: &str = "simulation.reference_date";

    // 商品目录
    pub const CATALOG_PATH: &str = "catalog.path";

    // 状态分级
    pub const MODERATE_DAYS: &str = "classifier.moderate_days";
    pub const SLOW_MOVING_DAYS: &str = "classifier.slow_moving_days";
    pub const DEAD_STOCK_DAYS: &str = "classifier.dead_stock_days";
}

pub mod defaults {
    pub const SEED: u64 = 42;
    pub const PRODUCT_COUNT_HINT: usize = 120;
}
