// ==========================================
// 滞销库存分析系统 - 驾驶舱会话
// ==========================================
// 职责: 持有当前库存表,演示数据/上传数据两种加载入口
// 红线: 每次加载整表替换;加载失败则清空,不保留旧表
// ==========================================

use crate::api::dashboard_api::DashboardApi;
use crate::api::error::{ApiError, ApiResult};
use crate::config::config_manager::{defaults, ConfigManager};
use crate::domain::inventory::InventoryTable;
use crate::engine::classifier::StockClassifier;
use crate::engine::simulator::InventorySimulator;
use crate::importer::backfill::BackfillReport;
use crate::importer::InventoryImporter;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

/// 数据来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadSource {
    Demo,
    Upload,
}

/// 当前已加载的表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadedTable {
    pub load_id: String,
    pub source: LoadSource,
    pub table: InventoryTable,
    /// 仅上传数据有回填统计
    pub report: Option<BackfillReport>,
}

// ==========================================
// DashboardSession - 驾驶舱会话
// ==========================================
pub struct DashboardSession {
    simulator: InventorySimulator,
    importer: InventoryImporter,
    product_count_hint: usize,
    reference_date: Option<NaiveDate>,
    current: Option<LoadedTable>,
}

impl DashboardSession {
    pub fn new(simulator: InventorySimulator, importer: InventoryImporter) -> Self {
        Self {
            simulator,
            importer,
            product_count_hint: defaults::PRODUCT_COUNT_HINT,
            reference_date: None,
            current: None,
        }
    }

    /// 按配置组装（目录 / 分级阈值 / 基准日 / 商品数提示）
    pub fn from_config(config: &ConfigManager) -> ApiResult<Self> {
        let catalog = config.get_catalog()?;
        let classifier = StockClassifier::with_thresholds(config.get_status_thresholds()?);

        let simulator =
            InventorySimulator::new(catalog.clone()).with_classifier(classifier.clone());
        let importer = InventoryImporter::with_catalog(catalog, classifier);

        let mut session = Self::new(simulator, importer);
        session.product_count_hint = config.get_product_count_hint()?;
        session.reference_date = config.get_reference_date()?;
        Ok(session)
    }

    /// 固定基准日（默认取本地当天）
    pub fn with_reference_date(mut self, reference: NaiveDate) -> Self {
        self.reference_date = Some(reference);
        self
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// 加载演示数据（替换当前表）
    pub fn load_demo(&mut self, seed: u64) -> ApiResult<&LoadedTable> {
        let reference = self.reference_date();
        let records = self
            .simulator
            .generate_at(self.product_count_hint, seed, reference);
        let table = InventoryTable::from_records(&records);

        info!(seed, rows = table.len(), "演示数据已加载");
        Ok(self.replace(LoadedTable {
            load_id: Uuid::new_v4().to_string(),
            source: LoadSource::Demo,
            table,
            report: None,
        }))
    }

    /// 加载上传数据（替换当前表;失败时清空）
    pub fn load_upload(&mut self, content: &[u8]) -> ApiResult<&LoadedTable> {
        let reference = self.reference_date();
        match self.importer.import_bytes(content, reference) {
            Ok(outcome) => {
                info!(load_id = %outcome.load_id, rows = outcome.table.len(), "上传数据已加载");
                Ok(self.replace(LoadedTable {
                    load_id: outcome.load_id,
                    source: LoadSource::Upload,
                    table: outcome.table,
                    report: Some(outcome.report),
                }))
            }
            Err(e) => {
                warn!(error = %e, "上传数据加载失败,清空当前表");
                self.current = None;
                Err(ApiError::Import(e))
            }
        }
    }

    /// 当前表
    pub fn table(&self) -> ApiResult<&InventoryTable> {
        self.loaded().map(|l| &l.table)
    }

    pub fn loaded(&self) -> ApiResult<&LoadedTable> {
        self.current.as_ref().ok_or(ApiError::NoData)
    }

    /// 当前表的驾驶舱聚合
    pub fn dashboard(&self) -> ApiResult<DashboardApi> {
        DashboardApi::from_table(self.table()?)
    }

    fn replace(&mut self, loaded: LoadedTable) -> &LoadedTable {
        self.current.insert(loaded)
    }
}

impl Default for DashboardSession {
    fn default() -> Self {
        Self::new(InventorySimulator::default(), InventoryImporter::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UPLOAD: &str = "sku,product_name,category,unit_cost,current_stock\nA1,Soap,Household,10,5\n";

    fn session() -> DashboardSession {
        DashboardSession::default().with_reference_date(NaiveDate::from_ymd_opt(2026, 6, 30).unwrap())
    }

    #[test]
    fn test_no_data_before_load() {
        let s = session();
        assert!(matches!(s.table(), Err(ApiError::NoData)));
        assert!(matches!(s.dashboard(), Err(ApiError::NoData)));
    }

    #[test]
    fn test_upload_replaces_demo() {
        let mut s = session();
        s.load_demo(42).unwrap();
        assert_eq!(s.loaded().unwrap().source, LoadSource::Demo);

        s.load_upload(UPLOAD.as_bytes()).unwrap();
        let loaded = s.loaded().unwrap();
        assert_eq!(loaded.source, LoadSource::Upload);
        assert_eq!(loaded.table.len(), 1);
        assert!(loaded.report.is_some());
    }

    #[test]
    fn test_failed_upload_clears_table() {
        let mut s = session();
        s.load_demo(42).unwrap();

        let err = s.load_upload(b"sku,product_name\nA1,Soap\n").unwrap_err();
        assert!(err.is_user_correctable());
        assert!(matches!(s.table(), Err(ApiError::NoData)));
    }

    #[test]
    fn test_demo_dashboard_has_items() {
        let mut s = session();
        s.load_demo(7).unwrap();
        let dashboard = s.dashboard().unwrap();
        assert_eq!(dashboard.kpi_summary().item_count, 113);
    }
}
