//! Resolution Query Handlers
//!
//! 运行期只读 API 面: 带缓存的解析、可播放句柄查找、
//! 文化查询与编辑器诊断报告。

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::error::ApplicationError;
use crate::application::ports::{AssetHandle, AssetProviderPort, CacheKey, ResolutionCachePort};
use crate::application::queries::{
    CultureCoverage, GetActiveCulture, GetPlayableVoice, ListCultures, ResolveVoiceLine,
    UnresolvedLines,
};
use crate::domain::culture::{CultureCode, CultureRegistry};
use crate::domain::voice::{DialogueId, VoiceAssetRef, VoiceEntryTable};
use crate::domain::{resolve, ResolutionResult};
use crate::infrastructure::memory::{ActiveCultureState, CultureStamp};

// ============================================================================
// ResolveVoiceLine
// ============================================================================

/// 解析响应
#[derive(Debug, Clone)]
pub struct ResolveVoiceLineResponse {
    pub resolution: ResolutionResult,
    /// 本次结果是否来自缓存
    pub from_cache: bool,
}

/// ResolveVoiceLine Handler
///
/// 先取当前文化快照，再以当前世代查缓存；未命中时执行回退解析
/// 并以同一世代回填。快照与回填之间若发生文化切换，写入的条目
/// 带着旧世代，新世代下不可读，无需额外同步。
pub struct ResolveVoiceLineHandler {
    registry: Arc<CultureRegistry>,
    table: Arc<VoiceEntryTable>,
    cache: Arc<dyn ResolutionCachePort>,
    culture_state: Arc<ActiveCultureState>,
}

impl ResolveVoiceLineHandler {
    pub fn new(
        registry: Arc<CultureRegistry>,
        table: Arc<VoiceEntryTable>,
        cache: Arc<dyn ResolutionCachePort>,
        culture_state: Arc<ActiveCultureState>,
    ) -> Self {
        Self {
            registry,
            table,
            cache,
            culture_state,
        }
    }

    pub fn handle(
        &self,
        query: ResolveVoiceLine,
    ) -> Result<ResolveVoiceLineResponse, ApplicationError> {
        let dialogue_id =
            DialogueId::new(query.dialogue_id).map_err(ApplicationError::validation)?;

        let stamp = self.culture_state.stamp();
        let requested = match query.culture {
            Some(code) => CultureCode::new(code).map_err(ApplicationError::validation)?,
            None => stamp.culture.clone(),
        };

        let key = CacheKey {
            dialogue_id: dialogue_id.clone(),
            culture: requested.clone(),
        };

        if let Some(resolution) = self.cache.get(&key, stamp.generation) {
            return Ok(ResolveVoiceLineResponse {
                resolution,
                from_cache: true,
            });
        }

        let resolution = resolve(&self.registry, &self.table, &dialogue_id, &requested)?;
        self.cache
            .insert(key, resolution.clone(), stamp.generation);

        tracing::debug!(
            dialogue_id = %dialogue_id,
            culture = %requested,
            found = resolution.is_found(),
            "Voice line resolved"
        );

        Ok(ResolveVoiceLineResponse {
            resolution,
            from_cache: false,
        })
    }
}

// ============================================================================
// GetPlayableVoice
// ============================================================================

/// 可播放查询响应
#[derive(Debug, Clone)]
pub enum PlayableVoiceResponse {
    /// 解析命中且资产系统给出了句柄
    Playable {
        handle: AssetHandle,
        matched_culture: CultureCode,
    },
    /// 解析命中但资产系统查不到该引用
    AssetUnavailable {
        asset: VoiceAssetRef,
        matched_culture: CultureCode,
    },
    /// 整条回退链上没有语音
    NoVoice { requested: CultureCode },
}

/// GetPlayableVoice Handler
///
/// 在当前文化下解析并向资产系统换取可播放句柄。
pub struct GetPlayableVoiceHandler {
    resolver: ResolveVoiceLineHandler,
    assets: Arc<dyn AssetProviderPort>,
}

impl GetPlayableVoiceHandler {
    pub fn new(resolver: ResolveVoiceLineHandler, assets: Arc<dyn AssetProviderPort>) -> Self {
        Self { resolver, assets }
    }

    pub fn handle(
        &self,
        query: GetPlayableVoice,
    ) -> Result<PlayableVoiceResponse, ApplicationError> {
        let resolved = self.resolver.handle(ResolveVoiceLine {
            dialogue_id: query.dialogue_id,
            culture: None,
        })?;

        match resolved.resolution {
            ResolutionResult::Found {
                asset,
                matched_culture,
            } => match self.assets.lookup(&asset) {
                Some(handle) => Ok(PlayableVoiceResponse::Playable {
                    handle,
                    matched_culture,
                }),
                None => {
                    tracing::warn!(asset = %asset, "Resolved asset unavailable in asset system");
                    Ok(PlayableVoiceResponse::AssetUnavailable {
                        asset,
                        matched_culture,
                    })
                }
            },
            ResolutionResult::Missing { requested } => {
                Ok(PlayableVoiceResponse::NoVoice { requested })
            }
        }
    }
}

// ============================================================================
// GetActiveCulture / ListCultures
// ============================================================================

/// GetActiveCulture Handler
pub struct GetActiveCultureHandler {
    culture_state: Arc<ActiveCultureState>,
}

impl GetActiveCultureHandler {
    pub fn new(culture_state: Arc<ActiveCultureState>) -> Self {
        Self { culture_state }
    }

    pub fn handle(&self, _query: GetActiveCulture) -> Result<CultureStamp, ApplicationError> {
        Ok(self.culture_state.stamp())
    }
}

/// 文化列表响应项
#[derive(Debug, Clone)]
pub struct CultureResponse {
    pub code: String,
    /// 完整回退链（含自身）
    pub chain: Vec<String>,
    pub active: bool,
}

/// ListCultures Handler
pub struct ListCulturesHandler {
    registry: Arc<CultureRegistry>,
    culture_state: Arc<ActiveCultureState>,
}

impl ListCulturesHandler {
    pub fn new(registry: Arc<CultureRegistry>, culture_state: Arc<ActiveCultureState>) -> Self {
        Self {
            registry,
            culture_state,
        }
    }

    pub fn handle(&self, _query: ListCultures) -> Result<Vec<CultureResponse>, ApplicationError> {
        let active = self.culture_state.stamp().culture;

        let mut responses = Vec::new();
        for code in self.registry.cultures() {
            let chain = self.registry.fallback_chain_for(&code)?;
            responses.push(CultureResponse {
                code: code.as_str().to_string(),
                chain: chain
                    .cultures()
                    .iter()
                    .map(|c| c.as_str().to_string())
                    .collect(),
                active: code == active,
            });
        }
        Ok(responses)
    }
}

// ============================================================================
// UnresolvedLines
// ============================================================================

/// 缺失翻译清单响应
#[derive(Debug, Clone)]
pub struct UnresolvedLinesResponse {
    pub culture: CultureCode,
    pub total_lines: usize,
    /// 该文化下解析为 Missing 的台词（排序后）
    pub missing: Vec<DialogueId>,
}

/// UnresolvedLines Handler
///
/// 回退链对整个清单只取一次；未注册文化按调用错误上抛。
pub struct UnresolvedLinesHandler {
    registry: Arc<CultureRegistry>,
    table: Arc<VoiceEntryTable>,
}

impl UnresolvedLinesHandler {
    pub fn new(registry: Arc<CultureRegistry>, table: Arc<VoiceEntryTable>) -> Self {
        Self { registry, table }
    }

    pub fn handle(
        &self,
        query: UnresolvedLines,
    ) -> Result<UnresolvedLinesResponse, ApplicationError> {
        let culture = CultureCode::new(query.culture).map_err(ApplicationError::validation)?;
        let chain = self.registry.fallback_chain_for(&culture)?;

        let dialogue_ids = self.table.dialogue_ids();
        let total_lines = dialogue_ids.len();

        let missing: Vec<DialogueId> = dialogue_ids
            .into_iter()
            .filter(|id| {
                !chain
                    .cultures()
                    .iter()
                    .any(|c| self.table.get(id, c).is_some())
            })
            .collect();

        tracing::debug!(
            culture = %culture,
            total = total_lines,
            missing = missing.len(),
            "Unresolved lines scanned"
        );

        Ok(UnresolvedLinesResponse {
            culture,
            total_lines,
            missing,
        })
    }
}

// ============================================================================
// CultureCoverage
// ============================================================================

/// 单个文化的覆盖统计
#[derive(Debug, Clone)]
pub struct CultureCoverageEntry {
    pub culture: CultureCode,
    pub total_lines: usize,
    /// 直接持有该文化资产的台词数（不计回退）
    pub lines_with_culture: usize,
}

impl CultureCoverageEntry {
    /// 覆盖率 0.0 - 1.0
    pub fn coverage(&self) -> f32 {
        if self.total_lines > 0 {
            self.lines_with_culture as f32 / self.total_lines as f32
        } else {
            0.0
        }
    }
}

/// 覆盖率报告
#[derive(Debug, Clone)]
pub struct CultureCoverageReport {
    pub entries: Vec<CultureCoverageEntry>,
    pub generated_at: DateTime<Utc>,
}

/// CultureCoverage Handler
pub struct CultureCoverageHandler {
    registry: Arc<CultureRegistry>,
    table: Arc<VoiceEntryTable>,
}

impl CultureCoverageHandler {
    pub fn new(registry: Arc<CultureRegistry>, table: Arc<VoiceEntryTable>) -> Self {
        Self { registry, table }
    }

    pub fn handle(
        &self,
        _query: CultureCoverage,
    ) -> Result<CultureCoverageReport, ApplicationError> {
        let snapshot = self.table.snapshot();
        let total_lines = snapshot.len();

        let entries = self
            .registry
            .cultures()
            .into_iter()
            .map(|culture| {
                let lines_with_culture = snapshot
                    .values()
                    .filter(|assets| assets.contains_key(&culture))
                    .count();
                CultureCoverageEntry {
                    culture,
                    total_lines,
                    lines_with_culture,
                }
            })
            .collect();

        Ok(CultureCoverageReport {
            entries,
            generated_at: Utc::now(),
        })
    }
}
