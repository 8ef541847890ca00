// ==========================================
// 滞销库存分析系统 - API层错误类型
// ==========================================
// 职责: 驾驶舱/会话边界的错误类型,包装导入与配置错误
// ==========================================

use crate::config::error::ConfigError;
use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 下层错误
    // ==========================================
    #[error("库存导入失败: {0}")]
    Import(#[from] ImportError),

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    // ==========================================
    // 会话错误
    // ==========================================
    /// 尚未加载任何库存表
    #[error("尚未加载库存数据")]
    NoData,

    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("序列化失败: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("导出失败: {0}")]
    Export(String),
}

// 实现 From<csv::Error>
impl From<csv::Error> for ApiError {
    fn from(err: csv::Error) -> Self {
        ApiError::Export(err.to_string())
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Export(err.to_string())
    }
}

impl ApiError {
    /// 是否可通过重新上传修正
    pub fn is_user_correctable(&self) -> bool {
        match self {
            ApiError::Import(e) => e.is_user_correctable(),
            ApiError::InvalidInput(_) => true,
            _ => false,
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
