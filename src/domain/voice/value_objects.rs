//! Voice Context - Value Objects

use serde::{Deserialize, Serialize};

/// 台词唯一标识
///
/// 与文化无关的稳定 ID，一条台词对应一个。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DialogueId(String);

impl DialogueId {
    pub fn new(id: impl Into<String>) -> Result<Self, &'static str> {
        let id = id.into();
        let id = id.trim().to_string();
        if id.is_empty() {
            return Err("台词 ID 不能为空");
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DialogueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 语音资产引用
///
/// 指向外部资产系统的非持有引用，仅保存标识符，
/// 资产本体的加载与生命周期归资产系统所有。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoiceAssetRef(String);

impl VoiceAssetRef {
    pub fn new(asset_id: impl Into<String>) -> Result<Self, &'static str> {
        let asset_id = asset_id.into();
        let asset_id = asset_id.trim().to_string();
        if asset_id.is_empty() {
            return Err("资产引用不能为空");
        }
        Ok(Self(asset_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VoiceAssetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
