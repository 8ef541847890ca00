// ==========================================
// 滞销库存分析系统 - 结构校验器实现
// ==========================================
// 职责: 必需列存在性校验（列名精确匹配）
// 必需列: sku / product_name / category / unit_cost / current_stock
// ==========================================

use crate::domain::schema::missing_required;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::inventory_importer_trait::SchemaValidator;
use tracing::warn;

#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredColumnsValidator;

impl SchemaValidator for RequiredColumnsValidator {
    fn validate_columns(&self, columns: &[String]) -> ImportResult<()> {
        let missing = missing_required(columns);
        if missing.is_empty() {
            return Ok(());
        }

        warn!(missing = ?missing, "上传表缺少必需列");
        Err(ImportError::SchemaError { missing })
    }
}
