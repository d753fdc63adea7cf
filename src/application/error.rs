//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::VoiceDataError;
use crate::domain::culture::CultureError;

/// 应用层错误
///
/// `CultureError` 以透明变体保留，调用方可以在查询期
/// 对 `UnknownCulture` 做本地分支处理（如退回根默认文化）。
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 文化上下文错误（未注册文化、重复注册、非法回退链）
    #[error(transparent)]
    Culture(#[from] CultureError),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<VoiceDataError> for ApplicationError {
    fn from(err: VoiceDataError) -> Self {
        Self::StorageError(err.to_string())
    }
}
