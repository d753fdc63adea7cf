//! Voice Context - 语音条目表

use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::DashMap;

use crate::domain::culture::CultureCode;

use super::{DialogueId, VoiceAssetRef, VoiceEntry};

/// 语音条目表
///
/// 授权数据的进程级主表: 每条台词一个条目。
/// 不同台词的编辑相互独立；同一台词的编辑按 DashMap
/// 分片锁串行化，后写者胜。
pub struct VoiceEntryTable {
    entries: DashMap<DialogueId, VoiceEntry>,
}

impl VoiceEntryTable {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 写入或替换 (台词, 文化) 对应的资产，返回是否替换了旧值
    pub fn upsert(
        &self,
        dialogue_id: DialogueId,
        culture: CultureCode,
        asset: VoiceAssetRef,
    ) -> bool {
        let mut entry = self.entries.entry(dialogue_id).or_default();
        entry.set_asset(culture, asset).is_some()
    }

    /// 删除整条台词，返回是否确有删除
    pub fn remove(&self, dialogue_id: &DialogueId) -> bool {
        self.entries.remove(dialogue_id).is_some()
    }

    /// 查询 (台词, 文化) 的资产引用
    ///
    /// 缺失返回 None —— 这是驱动回退的正常状态，不是错误。
    pub fn get(&self, dialogue_id: &DialogueId, culture: &CultureCode) -> Option<VoiceAssetRef> {
        self.entries
            .get(dialogue_id)
            .and_then(|entry| entry.asset_for(culture).cloned())
    }

    pub fn contains(&self, dialogue_id: &DialogueId) -> bool {
        self.entries.contains_key(dialogue_id)
    }

    /// 某台词已授权的文化（排序后返回）
    pub fn cultures_for(&self, dialogue_id: &DialogueId) -> Option<Vec<CultureCode>> {
        self.entries
            .get(dialogue_id)
            .map(|entry| entry.cultures())
    }

    /// 所有台词 ID（排序后返回，保证诊断输出确定性）
    pub fn dialogue_ids(&self) -> Vec<DialogueId> {
        let mut ids: Vec<DialogueId> =
            self.entries.iter().map(|entry| entry.key().clone()).collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 清空整表（整表重载前调用）
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// 确定性快照: 台词 -> (文化 -> 资产)
    ///
    /// 用于导出与覆盖率统计，排序由 BTreeMap 保证。
    pub fn snapshot(&self) -> BTreeMap<DialogueId, BTreeMap<CultureCode, VoiceAssetRef>> {
        self.entries
            .iter()
            .map(|entry| {
                let assets = entry
                    .value()
                    .assets()
                    .map(|(culture, asset)| (culture.clone(), asset.clone()))
                    .collect();
                (entry.key().clone(), assets)
            })
            .collect()
    }
}

impl Default for VoiceEntryTable {
    fn default() -> Self {
        Self::new()
    }
}
