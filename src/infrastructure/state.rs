//! Engine State - 引擎组合根
//!
//! 编辑器（写）与运行期（读）两个 API 面共享的唯一状态持有者。
//! 显式 init/teardown 生命周期，由宿主注入消费方，不做隐式全局单例。

use std::sync::Arc;

use thiserror::Error;

use crate::application::{
    AssetProviderPort, CultureCoverageHandler, ExportVoiceDataHandler, GetActiveCultureHandler,
    GetPlayableVoiceHandler, ImportVoiceDataHandler, ListCulturesHandler, RegisterCultureHandler,
    RemoveVoiceLineHandler, ResolutionCachePort, ResolveVoiceLineHandler, SetActiveCultureHandler,
    UnresolvedLinesHandler, UpsertVoiceLineHandler, VoiceDataStorePort,
};
use crate::config::AppConfig;
use crate::domain::culture::{CultureCode, CultureError, CultureRegistry};
use crate::domain::voice::VoiceEntryTable;
use crate::infrastructure::events::ChangeNotifier;
use crate::infrastructure::memory::{ActiveCultureState, InMemoryResolutionCache};

/// 引擎初始化错误
///
/// 配置期错误对初始化是致命的，必须在任何解析流量之前暴露。
#[derive(Debug, Error)]
pub enum EngineInitError {
    #[error("配置中的文化代码非法 [{code}]: {reason}")]
    InvalidCultureCode { code: String, reason: String },

    #[error(transparent)]
    Culture(#[from] CultureError),
}

/// 引擎状态
pub struct EngineState {
    // ========== 核心状态与端口 ==========
    pub registry: Arc<CultureRegistry>,
    pub table: Arc<VoiceEntryTable>,
    pub culture_state: Arc<ActiveCultureState>,
    pub cache: Arc<dyn ResolutionCachePort>,
    pub notifier: Arc<ChangeNotifier>,
    pub asset_provider: Arc<dyn AssetProviderPort>,
    pub data_store: Arc<dyn VoiceDataStorePort>,

    // ========== Command Handlers（编辑器写入面） ==========
    pub register_culture_handler: RegisterCultureHandler,
    pub set_active_culture_handler: SetActiveCultureHandler,
    pub upsert_voice_line_handler: UpsertVoiceLineHandler,
    pub remove_voice_line_handler: RemoveVoiceLineHandler,
    pub import_voice_data_handler: ImportVoiceDataHandler,
    pub export_voice_data_handler: ExportVoiceDataHandler,

    // ========== Query Handlers（运行期读取面） ==========
    pub resolve_voice_line_handler: ResolveVoiceLineHandler,
    pub get_playable_voice_handler: GetPlayableVoiceHandler,
    pub get_active_culture_handler: GetActiveCultureHandler,
    pub list_cultures_handler: ListCulturesHandler,
    pub unresolved_lines_handler: UnresolvedLinesHandler,
    pub culture_coverage_handler: CultureCoverageHandler,
}

impl EngineState {
    /// 从配置构建引擎
    ///
    /// 注册配置中的全部文化、整体校验回退链并设定初始文化。
    /// 任一配置错误直接失败——不允许半初始化的注册表进入解析。
    pub fn init(
        config: &AppConfig,
        asset_provider: Arc<dyn AssetProviderPort>,
        data_store: Arc<dyn VoiceDataStorePort>,
    ) -> Result<Self, EngineInitError> {
        let registry = CultureRegistry::new();

        for (code_raw, tail) in &config.cultures.fallbacks {
            let code = parse_culture(code_raw)?;
            let mut chain = Vec::with_capacity(tail.len() + 1);
            chain.push(code.clone());
            for member_raw in tail {
                chain.push(parse_culture(member_raw)?);
            }
            registry.register(code, chain)?;
        }

        // 默认文化未显式配置时注册为根文化
        let default_culture = parse_culture(&config.cultures.default_culture)?;
        if !registry.contains(&default_culture) {
            registry.register(default_culture.clone(), vec![default_culture.clone()])?;
        }

        registry.validate()?;

        let initial = match config.cultures.active_culture.as_deref() {
            Some(raw) if !raw.trim().is_empty() => parse_culture(raw)?,
            _ => default_culture.clone(),
        };
        if !registry.contains(&initial) {
            return Err(CultureError::UnknownCulture(initial).into());
        }

        tracing::info!(
            cultures = registry.len(),
            default = %default_culture,
            active = %initial,
            "Engine state initialized"
        );

        Ok(Self::new(
            registry.arc(),
            VoiceEntryTable::new().arc(),
            ActiveCultureState::new(initial).arc(),
            InMemoryResolutionCache::new().arc(),
            ChangeNotifier::new().arc(),
            asset_provider,
            data_store,
        ))
    }

    /// 装配所有处理器
    pub fn new(
        registry: Arc<CultureRegistry>,
        table: Arc<VoiceEntryTable>,
        culture_state: Arc<ActiveCultureState>,
        cache: Arc<dyn ResolutionCachePort>,
        notifier: Arc<ChangeNotifier>,
        asset_provider: Arc<dyn AssetProviderPort>,
        data_store: Arc<dyn VoiceDataStorePort>,
    ) -> Self {
        Self {
            // Command handlers
            register_culture_handler: RegisterCultureHandler::new(registry.clone()),
            set_active_culture_handler: SetActiveCultureHandler::new(
                registry.clone(),
                culture_state.clone(),
                cache.clone(),
                notifier.clone(),
            ),
            upsert_voice_line_handler: UpsertVoiceLineHandler::new(
                registry.clone(),
                table.clone(),
                cache.clone(),
                notifier.clone(),
            ),
            remove_voice_line_handler: RemoveVoiceLineHandler::new(
                table.clone(),
                cache.clone(),
                notifier.clone(),
            ),
            import_voice_data_handler: ImportVoiceDataHandler::new(
                registry.clone(),
                table.clone(),
                data_store.clone(),
                cache.clone(),
                notifier.clone(),
            ),
            export_voice_data_handler: ExportVoiceDataHandler::new(
                table.clone(),
                data_store.clone(),
            ),

            // Query handlers
            resolve_voice_line_handler: ResolveVoiceLineHandler::new(
                registry.clone(),
                table.clone(),
                cache.clone(),
                culture_state.clone(),
            ),
            get_playable_voice_handler: GetPlayableVoiceHandler::new(
                ResolveVoiceLineHandler::new(
                    registry.clone(),
                    table.clone(),
                    cache.clone(),
                    culture_state.clone(),
                ),
                asset_provider.clone(),
            ),
            get_active_culture_handler: GetActiveCultureHandler::new(culture_state.clone()),
            list_cultures_handler: ListCulturesHandler::new(
                registry.clone(),
                culture_state.clone(),
            ),
            unresolved_lines_handler: UnresolvedLinesHandler::new(
                registry.clone(),
                table.clone(),
            ),
            culture_coverage_handler: CultureCoverageHandler::new(
                registry.clone(),
                table.clone(),
            ),

            // 状态与端口
            registry,
            table,
            culture_state,
            cache,
            notifier,
            asset_provider,
            data_store,
        }
    }

    /// 显式停机: 丢弃派生缓存并清空订阅者
    ///
    /// 授权数据与注册表随 EngineState 一起释放。
    pub fn shutdown(&self) {
        self.cache.invalidate_all();
        self.notifier.clear();
        tracing::info!("Engine state shut down");
    }
}

fn parse_culture(raw: &str) -> Result<CultureCode, EngineInitError> {
    CultureCode::new(raw).map_err(|reason| EngineInitError::InvalidCultureCode {
        code: raw.to_string(),
        reason: reason.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        GetActiveCulture, GetPlayableVoice, ImportVoiceData, PlayableVoiceResponse,
        ResolveVoiceLine, SetActiveCulture, UnresolvedLines, UpsertVoiceLine,
    };
    use crate::domain::voice::VoiceAssetRef;
    use crate::domain::ResolutionResult;
    use crate::infrastructure::adapters::InMemoryAssetProvider;
    use crate::infrastructure::persistence::json::JsonVoiceDataStore;

    fn test_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.cultures.default_culture = "en".to_string();
        config
            .cultures
            .fallbacks
            .insert("fr".to_string(), vec!["en".to_string()]);
        config
    }

    fn engine_with(config: &AppConfig) -> (EngineState, Arc<InMemoryAssetProvider>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let assets = InMemoryAssetProvider::new().arc();
        let store = JsonVoiceDataStore::new(dir.path().join("voice_lines.json")).arc();
        let engine = EngineState::init(config, assets.clone(), store).unwrap();
        (engine, assets, dir)
    }

    fn upsert(engine: &EngineState, id: &str, culture: &str, asset: &str) {
        engine
            .upsert_voice_line_handler
            .handle(UpsertVoiceLine {
                dialogue_id: id.to_string(),
                culture: culture.to_string(),
                asset: asset.to_string(),
            })
            .unwrap();
    }

    fn resolve_fr(engine: &EngineState, id: &str) -> (ResolutionResult, bool) {
        let response = engine
            .resolve_voice_line_handler
            .handle(ResolveVoiceLine {
                dialogue_id: id.to_string(),
                culture: Some("fr".to_string()),
            })
            .unwrap();
        (response.resolution, response.from_cache)
    }

    #[test]
    fn test_init_rejects_cyclic_chain_config() {
        let mut config = test_config();
        config.cultures.fallbacks.insert(
            "es".to_string(),
            vec!["fr".to_string(), "es".to_string()],
        );

        let dir = tempfile::tempdir().unwrap();
        let result = EngineState::init(
            &config,
            InMemoryAssetProvider::new().arc(),
            JsonVoiceDataStore::new(dir.path().join("v.json")).arc(),
        );
        assert!(matches!(
            result,
            Err(EngineInitError::Culture(
                CultureError::InvalidFallbackChain { .. }
            ))
        ));
    }

    #[test]
    fn test_init_rejects_unknown_active_culture() {
        let mut config = test_config();
        config.cultures.active_culture = Some("jp".to_string());

        let dir = tempfile::tempdir().unwrap();
        let result = EngineState::init(
            &config,
            InMemoryAssetProvider::new().arc(),
            JsonVoiceDataStore::new(dir.path().join("v.json")).arc(),
        );
        assert!(matches!(
            result,
            Err(EngineInitError::Culture(CultureError::UnknownCulture(_)))
        ));
    }

    #[test]
    fn test_fallback_scenario_then_specific_wins() {
        let (engine, _assets, _dir) = engine_with(&test_config());

        upsert(&engine, "line1", "en", "asset_a");
        let (resolution, _) = resolve_fr(&engine, "line1");
        assert_eq!(
            resolution,
            ResolutionResult::Found {
                asset: VoiceAssetRef::new("asset_a").unwrap(),
                matched_culture: crate::domain::culture::CultureCode::new("en").unwrap(),
            }
        );

        // 补齐 fr 后必须命中 fr（写入已定向失效缓存）
        upsert(&engine, "line1", "fr", "asset_b");
        let (resolution, from_cache) = resolve_fr(&engine, "line1");
        assert!(!from_cache);
        assert_eq!(
            resolution,
            ResolutionResult::Found {
                asset: VoiceAssetRef::new("asset_b").unwrap(),
                matched_culture: crate::domain::culture::CultureCode::new("fr").unwrap(),
            }
        );
    }

    #[test]
    fn test_cached_resolution_is_idempotent() {
        let (engine, _assets, _dir) = engine_with(&test_config());
        upsert(&engine, "line1", "en", "asset_a");

        let (first, first_cached) = resolve_fr(&engine, "line1");
        let (second, second_cached) = resolve_fr(&engine, "line1");

        assert_eq!(first, second);
        assert!(!first_cached);
        assert!(second_cached);

        let stats = engine.cache.stats();
        assert_eq!(stats.hit_count, 1);
    }

    #[test]
    fn test_culture_switch_invalidates_cache_and_notifies() {
        let (engine, _assets, _dir) = engine_with(&test_config());
        upsert(&engine, "line1", "en", "asset_a");
        let _ = resolve_fr(&engine, "line1");

        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = seen.clone();
        engine.notifier.subscribe(move |event| {
            sink.lock().push(format!("{:?}", event));
        });

        let before = engine
            .get_active_culture_handler
            .handle(GetActiveCulture)
            .unwrap();
        let stamp = engine
            .set_active_culture_handler
            .handle(SetActiveCulture {
                code: "fr".to_string(),
            })
            .unwrap();
        assert!(stamp.generation > before.generation);
        assert_eq!(seen.lock().len(), 1);

        // 切换后旧缓存不可读
        let (_, from_cache) = resolve_fr(&engine, "line1");
        assert!(!from_cache);
    }

    #[test]
    fn test_set_active_culture_rejects_unregistered() {
        let (engine, _assets, _dir) = engine_with(&test_config());
        let result = engine.set_active_culture_handler.handle(SetActiveCulture {
            code: "jp".to_string(),
        });
        assert!(matches!(
            result,
            Err(crate::application::ApplicationError::Culture(
                CultureError::UnknownCulture(_)
            ))
        ));
    }

    #[test]
    fn test_playable_voice_round_trip() {
        let (engine, assets, _dir) = engine_with(&test_config());
        upsert(&engine, "line1", "en", "asset_a");
        assets.register(VoiceAssetRef::new("asset_a").unwrap(), 2500);

        let response = engine
            .get_playable_voice_handler
            .handle(GetPlayableVoice {
                dialogue_id: "line1".to_string(),
            })
            .unwrap();

        match response {
            PlayableVoiceResponse::Playable { handle, .. } => {
                assert_eq!(handle.duration_ms, 2500);
            }
            other => panic!("expected playable, got {:?}", other),
        }
    }

    #[test]
    fn test_unresolved_lines_report() {
        let (engine, _assets, _dir) = engine_with(&test_config());
        upsert(&engine, "line1", "en", "asset_a");
        upsert(&engine, "line2", "fr", "asset_b");

        // en 链只有 [en]: line2 无 en 资产 -> 缺失
        let report = engine
            .unresolved_lines_handler
            .handle(UnresolvedLines {
                culture: "en".to_string(),
            })
            .unwrap();
        assert_eq!(report.total_lines, 2);
        assert_eq!(
            report.missing,
            vec![crate::domain::voice::DialogueId::new("line2").unwrap()]
        );

        // fr 链 [fr, en]: 两条都能解析
        let report = engine
            .unresolved_lines_handler
            .handle(UnresolvedLines {
                culture: "fr".to_string(),
            })
            .unwrap();
        assert!(report.missing.is_empty());
    }

    #[test]
    fn test_import_resolves_after_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("voice_lines.json");
        std::fs::write(
            &path,
            r#"{
  "version": 1,
  "lines": [
    { "id": "line1", "assets": { "en": "asset_a", "jp": "asset_x" } }
  ]
}"#,
        )
        .unwrap();

        let config = test_config();
        let engine = EngineState::init(
            &config,
            InMemoryAssetProvider::new().arc(),
            JsonVoiceDataStore::new(&path).arc(),
        )
        .unwrap();

        let imported = engine
            .import_voice_data_handler
            .handle(ImportVoiceData)
            .unwrap();
        assert_eq!(imported.lines, 1);
        assert_eq!(imported.assets, 1);
        // jp 未注册 -> 跳过
        assert_eq!(imported.skipped_assets, 1);

        let (resolution, _) = resolve_fr(&engine, "line1");
        assert!(resolution.is_found());
    }

    #[test]
    fn test_runtime_culture_registration() {
        let (engine, _assets, _dir) = engine_with(&test_config());

        engine
            .register_culture_handler
            .handle(crate::application::RegisterCulture {
                code: "de".to_string(),
                fallback: vec!["en".to_string()],
            })
            .unwrap();

        let stamp = engine
            .set_active_culture_handler
            .handle(SetActiveCulture {
                code: "de".to_string(),
            })
            .unwrap();
        assert_eq!(stamp.culture.as_str(), "de");

        // 链成员未注册 -> 拒绝
        let result = engine
            .register_culture_handler
            .handle(crate::application::RegisterCulture {
                code: "pt".to_string(),
                fallback: vec!["es".to_string()],
            });
        assert!(matches!(
            result,
            Err(crate::application::ApplicationError::Culture(
                CultureError::InvalidFallbackChain { .. }
            ))
        ));
        assert!(engine.registry.validate().is_ok());
    }

    #[test]
    fn test_shutdown_clears_derived_state() {
        let (engine, _assets, _dir) = engine_with(&test_config());
        upsert(&engine, "line1", "en", "asset_a");
        let _ = resolve_fr(&engine, "line1");
        engine.notifier.subscribe(|_| {});

        engine.shutdown();

        assert_eq!(engine.cache.stats().entries, 0);
        assert_eq!(engine.notifier.subscriber_count(), 0);
    }
}
