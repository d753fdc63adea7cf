//! Voice Context - 台词语音限界上下文
//!
//! 职责:
//! - 台词标识与资产引用
//! - 按文化授权的语音条目管理
//! - 条目表的并发读写

mod entry;
mod table;
mod value_objects;

pub use entry::VoiceEntry;
pub use table::VoiceEntryTable;
pub use value_objects::{DialogueId, VoiceAssetRef};
