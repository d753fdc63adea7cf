//! Query Handlers 实现
//!
//! 所有 QueryHandler 的具体实现

mod resolution_handlers;

pub use resolution_handlers::{
    CultureCoverageEntry, CultureCoverageHandler, CultureCoverageReport, CultureResponse,
    GetActiveCultureHandler, GetPlayableVoiceHandler, ListCulturesHandler, PlayableVoiceResponse,
    ResolveVoiceLineHandler, ResolveVoiceLineResponse, UnresolvedLinesHandler,
    UnresolvedLinesResponse,
};
