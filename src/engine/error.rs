// ==========================================
// 产线生产登记系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

use crate::repository::error::RepositoryError;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 输入无法解析（如日期格式错误）
    #[error("无效输入: {0}")]
    InvalidInput(String),

    /// 存储访问失败（整体中止，不返回部分结果）
    #[error(transparent)]
    Store(#[from] RepositoryError),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
