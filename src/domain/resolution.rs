//! 回退解析服务 - 共享领域服务
//!
//! (台词 ID, 请求文化) -> 资产引用的核心算法。
//! 按回退链从最具体到最通用逐级查表，第一个命中的文化获胜，
//! 保证解析结果确定且可解释。

use serde::{Deserialize, Serialize};

use super::culture::{CultureCode, CultureError, CultureRegistry};
use super::voice::{DialogueId, VoiceAssetRef, VoiceEntryTable};

/// 解析结果
///
/// `Missing` 是一等正常结果，调用方必须对其分支处理；
/// 只有未注册文化等调用错误才以 `CultureError` 上抛。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "data")]
pub enum ResolutionResult {
    /// 命中: 资产引用与实际匹配到的文化
    ///
    /// `matched_culture` 与请求文化不同时说明走了回退，
    /// 消费方据此决定是否显示"缺失翻译"标记。
    Found {
        asset: VoiceAssetRef,
        matched_culture: CultureCode,
    },
    /// 整条回退链上均无资产
    Missing { requested: CultureCode },
}

impl ResolutionResult {
    pub fn is_found(&self) -> bool {
        matches!(self, ResolutionResult::Found { .. })
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, ResolutionResult::Missing { .. })
    }

    /// 命中但匹配文化与请求文化不同，即发生了回退
    pub fn used_fallback(&self, requested: &CultureCode) -> bool {
        match self {
            ResolutionResult::Found { matched_culture, .. } => matched_culture != requested,
            ResolutionResult::Missing { .. } => false,
        }
    }
}

/// 按回退链解析台词的语音资产
///
/// 请求文化未注册时返回 `UnknownCulture`（调用方错误）；
/// 回退链走完仍无资产时返回 `Missing`（正常结果）。
pub fn resolve(
    registry: &CultureRegistry,
    table: &VoiceEntryTable,
    dialogue_id: &DialogueId,
    requested: &CultureCode,
) -> Result<ResolutionResult, CultureError> {
    let chain = registry.fallback_chain_for(requested)?;

    for culture in chain.cultures() {
        if let Some(asset) = table.get(dialogue_id, culture) {
            return Ok(ResolutionResult::Found {
                asset,
                matched_culture: culture.clone(),
            });
        }
    }

    Ok(ResolutionResult::Missing {
        requested: requested.clone(),
    })
}
