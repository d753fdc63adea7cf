//! 应用层 - 用例编排
//!
//! 包含：
//! - Ports: 出站端口定义（AssetProvider, ResolutionCache, VoiceDataStore）
//! - Commands: CQRS 命令处理器（编辑器/授权面）
//! - Queries: CQRS 查询处理器（运行期消费面）

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

pub use commands::handlers::{
    ExportVoiceDataHandler, ExportVoiceDataResponse, ImportVoiceDataHandler,
    ImportVoiceDataResponse, RegisterCultureHandler, RemoveVoiceLineHandler,
    SetActiveCultureHandler, UpsertVoiceLineHandler, UpsertVoiceLineResponse,
};
pub use commands::{
    ExportVoiceData, ImportVoiceData, RegisterCulture, RemoveVoiceLine, SetActiveCulture,
    UpsertVoiceLine,
};
pub use error::ApplicationError;
pub use ports::{
    AssetHandle, AssetProviderPort, CacheKey, CacheStats, ResolutionCachePort, VoiceDataError,
    VoiceDataSnapshot, VoiceDataStorePort, VoiceLineRecord,
};
pub use queries::handlers::{
    CultureCoverageEntry, CultureCoverageHandler, CultureCoverageReport, CultureResponse,
    GetActiveCultureHandler, GetPlayableVoiceHandler, ListCulturesHandler, PlayableVoiceResponse,
    ResolveVoiceLineHandler, ResolveVoiceLineResponse, UnresolvedLinesHandler,
    UnresolvedLinesResponse,
};
pub use queries::{
    CultureCoverage, GetActiveCulture, GetPlayableVoice, ListCultures, ResolveVoiceLine,
    UnresolvedLines,
};
