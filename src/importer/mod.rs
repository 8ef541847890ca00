// ==========================================
// 滞销库存分析系统 - 导入层
// ==========================================
// 职责: 上传库存表 → 结构校验 → 缺失列回填
// 支持: CSV
// ==========================================

// 模块声明
pub mod backfill;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod inventory_importer;
pub mod inventory_importer_trait;
pub mod schema_validator;

// 重导出核心类型
pub use backfill::{
    BackfillColumnStats, BackfillReport, BackfillService, BackfillValue, ResolvedRow,
};
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{read_csv_file, CsvParser};
pub use inventory_importer::{ImportOutcome, InventoryImporter};
pub use schema_validator::RequiredColumnsValidator;

// 重导出 Trait 接口
pub use inventory_importer_trait::{FieldMapper, FileParser, SchemaValidator};
