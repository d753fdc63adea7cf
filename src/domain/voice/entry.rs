//! Voice Context - 语音条目聚合

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::culture::CultureCode;

use super::VoiceAssetRef;

/// 语音条目聚合根
///
/// 一条台词在各文化下的资产映射，每个文化至多一个资产。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoiceEntry {
    assets: HashMap<CultureCode, VoiceAssetRef>,
}

impl VoiceEntry {
    pub fn new() -> Self {
        Self {
            assets: HashMap::new(),
        }
    }

    /// 写入或替换某文化下的资产，返回被替换的旧值
    pub fn set_asset(
        &mut self,
        culture: CultureCode,
        asset: VoiceAssetRef,
    ) -> Option<VoiceAssetRef> {
        self.assets.insert(culture, asset)
    }

    pub fn remove_asset(&mut self, culture: &CultureCode) -> Option<VoiceAssetRef> {
        self.assets.remove(culture)
    }

    pub fn asset_for(&self, culture: &CultureCode) -> Option<&VoiceAssetRef> {
        self.assets.get(culture)
    }

    pub fn has_culture(&self, culture: &CultureCode) -> bool {
        self.assets.contains_key(culture)
    }

    /// 已授权的文化（排序后返回）
    pub fn cultures(&self) -> Vec<CultureCode> {
        let mut cultures: Vec<CultureCode> = self.assets.keys().cloned().collect();
        cultures.sort();
        cultures
    }

    pub fn assets(&self) -> impl Iterator<Item = (&CultureCode, &VoiceAssetRef)> {
        self.assets.iter()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
