//! Asset Provider Port - 外部资产系统查找

use crate::domain::voice::VoiceAssetRef;

/// 可播放资产句柄
///
/// 外部资产系统返回的非持有句柄，引擎只透传，从不解码或校验音频内容。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetHandle {
    pub asset: VoiceAssetRef,
    /// 资产时长（毫秒），由资产系统上报
    pub duration_ms: u64,
}

/// Asset Provider Port
///
/// 按标识符向资产系统查找可播放句柄。
/// 资产的加载、解码与生命周期全部归资产系统所有。
pub trait AssetProviderPort: Send + Sync {
    /// 查找资产句柄，未找到返回 None
    fn lookup(&self, asset: &VoiceAssetRef) -> Option<AssetHandle>;
}
