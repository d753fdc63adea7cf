//! In-Memory Asset Provider - 用于测试与独立运行的资产系统适配器
//!
//! 以预注册的句柄表应答查找，不触碰任何真实音频。

use std::sync::Arc;

use dashmap::DashMap;

use crate::application::ports::{AssetHandle, AssetProviderPort};
use crate::domain::voice::VoiceAssetRef;

/// 内存资产提供者
pub struct InMemoryAssetProvider {
    handles: DashMap<VoiceAssetRef, AssetHandle>,
}

impl InMemoryAssetProvider {
    pub fn new() -> Self {
        Self {
            handles: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 注册资产句柄
    pub fn register(&self, asset: VoiceAssetRef, duration_ms: u64) {
        self.handles.insert(
            asset.clone(),
            AssetHandle { asset, duration_ms },
        );
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl Default for InMemoryAssetProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetProviderPort for InMemoryAssetProvider {
    fn lookup(&self, asset: &VoiceAssetRef) -> Option<AssetHandle> {
        self.handles.get(asset).map(|handle| handle.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(s: &str) -> VoiceAssetRef {
        VoiceAssetRef::new(s).unwrap()
    }

    #[test]
    fn test_lookup_registered_asset() {
        let provider = InMemoryAssetProvider::new();
        provider.register(asset("a_en_line1"), 1800);

        let handle = provider.lookup(&asset("a_en_line1")).unwrap();
        assert_eq!(handle.duration_ms, 1800);
        assert_eq!(handle.asset, asset("a_en_line1"));
    }

    #[test]
    fn test_lookup_unknown_asset_is_none() {
        let provider = InMemoryAssetProvider::new();
        assert!(provider.lookup(&asset("missing")).is_none());
    }
}
