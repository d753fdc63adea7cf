//! Voice Command Handlers

use std::sync::Arc;

use crate::application::commands::{
    ExportVoiceData, ImportVoiceData, RemoveVoiceLine, UpsertVoiceLine,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    ResolutionCachePort, VoiceDataSnapshot, VoiceDataStorePort, VoiceLineRecord,
};
use crate::domain::culture::{CultureCode, CultureError, CultureRegistry};
use crate::domain::voice::{DialogueId, VoiceAssetRef, VoiceEntryTable};
use crate::infrastructure::events::ChangeNotifier;

// ============================================================================
// UpsertVoiceLine
// ============================================================================

/// 写入响应
#[derive(Debug, Clone)]
pub struct UpsertVoiceLineResponse {
    pub dialogue_id: DialogueId,
    pub culture: CultureCode,
    /// 是否替换了已有资产
    pub replaced: bool,
}

/// UpsertVoiceLine Handler
///
/// 写入后按台词 ID 定向失效缓存并广播条目失效事件。
/// 未注册文化下的写入被拒绝：没有任何回退链能到达它。
pub struct UpsertVoiceLineHandler {
    registry: Arc<CultureRegistry>,
    table: Arc<VoiceEntryTable>,
    cache: Arc<dyn ResolutionCachePort>,
    notifier: Arc<ChangeNotifier>,
}

impl UpsertVoiceLineHandler {
    pub fn new(
        registry: Arc<CultureRegistry>,
        table: Arc<VoiceEntryTable>,
        cache: Arc<dyn ResolutionCachePort>,
        notifier: Arc<ChangeNotifier>,
    ) -> Self {
        Self {
            registry,
            table,
            cache,
            notifier,
        }
    }

    pub fn handle(
        &self,
        command: UpsertVoiceLine,
    ) -> Result<UpsertVoiceLineResponse, ApplicationError> {
        let dialogue_id =
            DialogueId::new(command.dialogue_id).map_err(ApplicationError::validation)?;
        let culture = CultureCode::new(command.culture).map_err(ApplicationError::validation)?;
        let asset = VoiceAssetRef::new(command.asset).map_err(ApplicationError::validation)?;

        if !self.registry.contains(&culture) {
            return Err(CultureError::UnknownCulture(culture).into());
        }

        let replaced = self
            .table
            .upsert(dialogue_id.clone(), culture.clone(), asset);

        self.cache.invalidate_entry(&dialogue_id);
        self.notifier.publish_entry_invalidated(dialogue_id.clone());

        tracing::info!(
            dialogue_id = %dialogue_id,
            culture = %culture,
            replaced = replaced,
            "Voice line upserted"
        );

        Ok(UpsertVoiceLineResponse {
            dialogue_id,
            culture,
            replaced,
        })
    }
}

// ============================================================================
// RemoveVoiceLine
// ============================================================================

/// RemoveVoiceLine Handler
pub struct RemoveVoiceLineHandler {
    table: Arc<VoiceEntryTable>,
    cache: Arc<dyn ResolutionCachePort>,
    notifier: Arc<ChangeNotifier>,
}

impl RemoveVoiceLineHandler {
    pub fn new(
        table: Arc<VoiceEntryTable>,
        cache: Arc<dyn ResolutionCachePort>,
        notifier: Arc<ChangeNotifier>,
    ) -> Self {
        Self {
            table,
            cache,
            notifier,
        }
    }

    pub fn handle(&self, command: RemoveVoiceLine) -> Result<(), ApplicationError> {
        let dialogue_id =
            DialogueId::new(command.dialogue_id).map_err(ApplicationError::validation)?;

        if !self.table.remove(&dialogue_id) {
            return Err(ApplicationError::not_found(
                "VoiceLine",
                dialogue_id.as_str(),
            ));
        }

        self.cache.invalidate_entry(&dialogue_id);
        self.notifier.publish_entry_invalidated(dialogue_id.clone());

        tracing::info!(dialogue_id = %dialogue_id, "Voice line removed");

        Ok(())
    }
}

// ============================================================================
// ImportVoiceData
// ============================================================================

/// 导入响应
#[derive(Debug, Clone)]
pub struct ImportVoiceDataResponse {
    /// 成功导入的台词数
    pub lines: usize,
    /// 成功导入的资产数
    pub assets: usize,
    /// 跳过的台词数（ID 非法）
    pub skipped_lines: usize,
    /// 跳过的资产数（文化非法或未注册）
    pub skipped_assets: usize,
}

/// ImportVoiceData Handler
///
/// 整表替换语义: 清空现表后载入快照，随后全量失效缓存并广播重载事件。
/// 快照解析成功后导入绝不硬失败——坏记录跳过、计数并告警，
/// 诊断以报告形式呈现而不是中断编辑器会话。
pub struct ImportVoiceDataHandler {
    registry: Arc<CultureRegistry>,
    table: Arc<VoiceEntryTable>,
    store: Arc<dyn VoiceDataStorePort>,
    cache: Arc<dyn ResolutionCachePort>,
    notifier: Arc<ChangeNotifier>,
}

impl ImportVoiceDataHandler {
    pub fn new(
        registry: Arc<CultureRegistry>,
        table: Arc<VoiceEntryTable>,
        store: Arc<dyn VoiceDataStorePort>,
        cache: Arc<dyn ResolutionCachePort>,
        notifier: Arc<ChangeNotifier>,
    ) -> Self {
        Self {
            registry,
            table,
            store,
            cache,
            notifier,
        }
    }

    pub fn handle(
        &self,
        _command: ImportVoiceData,
    ) -> Result<ImportVoiceDataResponse, ApplicationError> {
        let snapshot = self.store.load()?;

        self.table.clear();

        let mut lines = 0usize;
        let mut assets = 0usize;
        let mut skipped_lines = 0usize;
        let mut skipped_assets = 0usize;

        for record in snapshot.lines {
            let dialogue_id = match DialogueId::new(record.id.as_str()) {
                Ok(id) => id,
                Err(reason) => {
                    tracing::warn!(id = %record.id, reason = reason, "Skipping voice line record");
                    skipped_lines += 1;
                    continue;
                }
            };

            let mut imported_any = false;
            for (culture_raw, asset_raw) in record.assets {
                let culture = match CultureCode::new(culture_raw.as_str()) {
                    Ok(culture) => culture,
                    Err(reason) => {
                        tracing::warn!(
                            dialogue_id = %dialogue_id,
                            culture = %culture_raw,
                            reason = reason,
                            "Skipping asset record"
                        );
                        skipped_assets += 1;
                        continue;
                    }
                };
                if !self.registry.contains(&culture) {
                    tracing::warn!(
                        dialogue_id = %dialogue_id,
                        culture = %culture,
                        "Skipping asset record for unregistered culture"
                    );
                    skipped_assets += 1;
                    continue;
                }
                let asset = match VoiceAssetRef::new(asset_raw.as_str()) {
                    Ok(asset) => asset,
                    Err(reason) => {
                        tracing::warn!(
                            dialogue_id = %dialogue_id,
                            culture = %culture,
                            reason = reason,
                            "Skipping asset record"
                        );
                        skipped_assets += 1;
                        continue;
                    }
                };

                self.table.upsert(dialogue_id.clone(), culture, asset);
                assets += 1;
                imported_any = true;
            }

            if imported_any {
                lines += 1;
            }
        }

        self.cache.invalidate_all();
        self.notifier.publish_data_reloaded();

        tracing::info!(
            lines = lines,
            assets = assets,
            skipped_lines = skipped_lines,
            skipped_assets = skipped_assets,
            "Voice data imported"
        );

        Ok(ImportVoiceDataResponse {
            lines,
            assets,
            skipped_lines,
            skipped_assets,
        })
    }
}

// ============================================================================
// ExportVoiceData
// ============================================================================

/// 导出响应
#[derive(Debug, Clone)]
pub struct ExportVoiceDataResponse {
    pub lines: usize,
    pub assets: usize,
}

/// ExportVoiceData Handler
pub struct ExportVoiceDataHandler {
    table: Arc<VoiceEntryTable>,
    store: Arc<dyn VoiceDataStorePort>,
}

impl ExportVoiceDataHandler {
    pub fn new(table: Arc<VoiceEntryTable>, store: Arc<dyn VoiceDataStorePort>) -> Self {
        Self { table, store }
    }

    pub fn handle(
        &self,
        _command: ExportVoiceData,
    ) -> Result<ExportVoiceDataResponse, ApplicationError> {
        let snapshot = self.table.snapshot();

        let mut assets = 0usize;
        let records: Vec<VoiceLineRecord> = snapshot
            .into_iter()
            .map(|(dialogue_id, entry_assets)| {
                assets += entry_assets.len();
                VoiceLineRecord {
                    id: dialogue_id.as_str().to_string(),
                    assets: entry_assets
                        .into_iter()
                        .map(|(culture, asset)| {
                            (culture.as_str().to_string(), asset.as_str().to_string())
                        })
                        .collect(),
                }
            })
            .collect();

        let lines = records.len();
        self.store.save(&VoiceDataSnapshot::new(records))?;

        tracing::info!(lines = lines, assets = assets, "Voice data exported");

        Ok(ExportVoiceDataResponse { lines, assets })
    }
}
