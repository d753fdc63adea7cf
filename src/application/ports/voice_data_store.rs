//! Voice Data Store Port - 授权数据持久化
//!
//! 授权语音数据的快照存取接口，具体格式由适配器决定。
//! 记录使用原始字符串，值对象的校验在导入时进行。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Voice Data 错误
#[derive(Debug, Error)]
pub enum VoiceDataError {
    #[error("Voice data not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// 台词记录（用于持久化）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceLineRecord {
    pub id: String,
    /// 文化代码 -> 资产引用
    pub assets: BTreeMap<String, String>,
}

/// 授权数据快照文档
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceDataSnapshot {
    pub version: u32,
    pub lines: Vec<VoiceLineRecord>,
}

/// 当前快照格式版本
pub const SNAPSHOT_VERSION: u32 = 1;

impl VoiceDataSnapshot {
    pub fn new(lines: Vec<VoiceLineRecord>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            lines,
        }
    }
}

/// Voice Data Store Port
pub trait VoiceDataStorePort: Send + Sync {
    /// 载入快照
    fn load(&self) -> Result<VoiceDataSnapshot, VoiceDataError>;

    /// 写出快照
    fn save(&self, snapshot: &VoiceDataSnapshot) -> Result<(), VoiceDataError>;

    /// 快照是否存在
    fn exists(&self) -> bool;
}
