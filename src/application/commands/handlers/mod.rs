//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod culture_handlers;
mod voice_handlers;

pub use culture_handlers::{RegisterCultureHandler, SetActiveCultureHandler};
pub use voice_handlers::{
    ExportVoiceDataHandler, ExportVoiceDataResponse, ImportVoiceDataHandler,
    ImportVoiceDataResponse, RemoveVoiceLineHandler, UpsertVoiceLineHandler,
    UpsertVoiceLineResponse,
};
