// ==========================================
// 滞销库存分析系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 导入失败即整表失败,不做部分补全
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 结构错误 =====
    /// 缺少必需列（按必需列顺序列出）
    #[error("缺少必需列: {}", .missing.join(", "))]
    SchemaError { missing: Vec<String> },

    // ===== 解析错误 =====
    /// 无法按分隔文本解析,或回填公式依赖的单元格无法转换
    #[error("解析失败: {0}")]
    ParseError(String),

    // ===== 文件相关错误（仅路径入口）=====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),
}

impl ImportError {
    /// 单元格类型转换失败
    pub fn cell(row: usize, field: &str, message: impl std::fmt::Display) -> Self {
        ImportError::ParseError(format!("行 {}, 字段 {}: {}", row, field, message))
    }

    /// 是否为用户可修正的数据问题（可提示重新上传）
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            ImportError::SchemaError { .. } | ImportError::ParseError(_)
        )
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::ParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_message_names_columns() {
        let err = ImportError::SchemaError {
            missing: vec!["unit_cost".to_string(), "current_stock".to_string()],
        };
        assert_eq!(err.to_string(), "缺少必需列: unit_cost, current_stock");
        assert!(err.is_user_correctable());
    }

    #[test]
    fn test_cell_error_message() {
        let err = ImportError::cell(3, "unit_cost", "无法解析为数值: abc");
        assert_eq!(err.to_string(), "解析失败: 行 3, 字段 unit_cost: 无法解析为数值: abc");
    }
}
