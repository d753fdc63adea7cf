//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod asset_provider;
mod resolution_cache;
mod voice_data_store;

pub use asset_provider::{AssetHandle, AssetProviderPort};
pub use resolution_cache::{CacheKey, CacheStats, ResolutionCachePort};
pub use voice_data_store::{
    VoiceDataError, VoiceDataSnapshot, VoiceDataStorePort, VoiceLineRecord, SNAPSHOT_VERSION,
};
