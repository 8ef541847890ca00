// ==========================================
// 滞销库存分析系统 - 库存导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 管道: 解析 → 结构校验 → 字段映射 → 回填
// ==========================================

use crate::domain::inventory::{InventoryTable, RawInventoryRecord};
use crate::importer::error::ImportResult;
use std::collections::HashMap;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 分隔文本 → 库存表（单元格文本原样保留）
// 实现者: CsvParser
pub trait FileParser: Send + Sync {
    /// 解析上传内容
    ///
    /// # 返回
    /// - Ok(InventoryTable): 表头 + 数据行（跳过全空行）
    /// - Err(ParseError): 编码错误、字段数超出表头等
    fn parse_bytes(&self, content: &[u8]) -> ImportResult<InventoryTable>;
}

// ==========================================
// SchemaValidator Trait
// ==========================================
// 用途: 必需列存在性校验
// 实现者: RequiredColumnsValidator
pub trait SchemaValidator: Send + Sync {
    /// 校验列名
    ///
    /// # 返回
    /// - Ok(()): 必需列齐全
    /// - Err(SchemaError): 列出全部缺失列
    fn validate_columns(&self, columns: &[String]) -> ImportResult<()>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 单行文本 → 类型化视图
// 实现者: FieldMapper
pub trait FieldMapper: Send + Sync {
    /// 映射单行
    ///
    /// # 参数
    /// - row: 列名 → 单元格文本
    /// - row_number: 行号（1 起始,不含表头）
    ///
    /// # 返回
    /// - Err(ParseError): 回填依赖的数值/日期单元格无法转换
    fn map_row(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<RawInventoryRecord>;
}
