//! Culture Context - Errors

use thiserror::Error;

use super::CultureCode;

#[derive(Debug, Error)]
pub enum CultureError {
    /// 调用方引用了未注册的文化，属于调用错误，不是缺失翻译
    #[error("未注册的文化: {0}")]
    UnknownCulture(CultureCode),

    #[error("文化已注册: {0}")]
    DuplicateCulture(CultureCode),

    /// 回退链不合法，注册表不允许进入可用状态
    #[error("非法回退链 [{culture}]: {reason}")]
    InvalidFallbackChain { culture: CultureCode, reason: String },
}
