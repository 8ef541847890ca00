// ==========================================
// 滞销库存分析系统 - 库存导入器
// ==========================================
// 职责: 整合导入流程,从上传内容到可展示的库存表
// 流程: 解析 → 结构校验 → 字段映射 → 回填 → 交付
// 红线: 任一阶段失败即整表失败,不做部分补全
// ==========================================

use crate::config::catalog::CatalogConfig;
use crate::domain::inventory::{InventoryTable, RawInventoryRecord};
use crate::engine::classifier::StockClassifier;
use crate::importer::backfill::{BackfillReport, BackfillService};
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper as DefaultFieldMapper;
use crate::importer::file_parser::{read_csv_file, CsvParser};
use crate::importer::inventory_importer_trait::{FieldMapper, FileParser, SchemaValidator};
use crate::importer::schema_validator::RequiredColumnsValidator;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};
use uuid::Uuid;

// ==========================================
// ImportOutcome - 导入结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportOutcome {
    /// 本次加载标识（uuid v4）
    pub load_id: String,
    /// 原列 + 追加的回填列
    pub table: InventoryTable,
    /// 各回填列的计算/默认行数
    pub report: BackfillReport,
}

// ==========================================
// InventoryImporter - 库存导入器
// ==========================================
pub struct InventoryImporter {
    file_parser: Box<dyn FileParser>,
    schema_validator: Box<dyn SchemaValidator>,
    field_mapper: Box<dyn FieldMapper>,
    backfill: BackfillService,
}

impl InventoryImporter {
    /// 创建导入器
    ///
    /// # 参数
    /// - file_parser: 文件解析器
    /// - schema_validator: 结构校验器
    /// - field_mapper: 字段映射器
    /// - backfill: 回填服务
    pub fn new(
        file_parser: Box<dyn FileParser>,
        schema_validator: Box<dyn SchemaValidator>,
        field_mapper: Box<dyn FieldMapper>,
        backfill: BackfillService,
    ) -> Self {
        Self {
            file_parser,
            schema_validator,
            field_mapper,
            backfill,
        }
    }

    /// 默认组件 + 指定目录与分级阈值
    pub fn with_catalog(catalog: CatalogConfig, classifier: StockClassifier) -> Self {
        Self::new(
            Box::new(CsvParser::new()),
            Box::new(RequiredColumnsValidator),
            Box::new(DefaultFieldMapper),
            BackfillService::new(catalog, classifier),
        )
    }

    /// 导入上传内容
    ///
    /// # 参数
    /// - content: CSV 字节
    /// - reference: 天数计算基准日
    #[instrument(skip(self, content), fields(bytes = content.len(), load_id))]
    pub fn import_bytes(&self, content: &[u8], reference: NaiveDate) -> ImportResult<ImportOutcome> {
        debug!("步骤 1: 解析文件");
        let table = self.file_parser.parse_bytes(content)?;
        info!(
            rows = table.len(),
            columns = table.columns().len(),
            "文件解析完成"
        );

        self.import_table(table, reference)
    }

    /// 导入磁盘文件（仅 .csv）
    pub fn import_from_path<P: AsRef<Path>>(
        &self,
        file_path: P,
        reference: NaiveDate,
    ) -> ImportResult<ImportOutcome> {
        let path = file_path.as_ref();
        info!(file_path = %path.display(), "开始导入库存文件");
        let content = read_csv_file(path)?;
        self.import_bytes(&content, reference)
    }

    /// 对已解析的表执行校验与回填
    pub fn import_table(
        &self,
        mut table: InventoryTable,
        reference: NaiveDate,
    ) -> ImportResult<ImportOutcome> {
        let load_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("load_id", load_id.as_str());

        debug!("步骤 2: 结构校验");
        self.schema_validator.validate_columns(table.columns())?;

        debug!("步骤 3: 字段映射");
        let raw_records = self.map_rows(&table)?;

        debug!("步骤 4: 回填缺失列");
        let resolved: Vec<_> = raw_records
            .iter()
            .map(|raw| self.backfill.resolve_row(raw, reference))
            .collect();
        let report = self.backfill.apply(&mut table, &resolved);

        info!(
            load_id = %load_id,
            rows = table.len(),
            backfilled = ?report.backfilled_columns(),
            "库存导入完成"
        );

        Ok(ImportOutcome {
            load_id,
            table,
            report,
        })
    }

    /// 全表字段映射（行号 1 起始）
    pub fn map_rows(&self, table: &InventoryTable) -> ImportResult<Vec<RawInventoryRecord>> {
        (0..table.len())
            .map(|idx| self.field_mapper.map_row(&table.row_map(idx), idx + 1))
            .collect()
    }
}

impl Default for InventoryImporter {
    fn default() -> Self {
        Self::with_catalog(CatalogConfig::default(), StockClassifier::default())
    }
}
