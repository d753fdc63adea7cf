//! Voice Commands

/// 写入或替换台词在某文化下的资产
#[derive(Debug, Clone)]
pub struct UpsertVoiceLine {
    pub dialogue_id: String,
    pub culture: String,
    pub asset: String,
}

/// 删除整条台词
#[derive(Debug, Clone)]
pub struct RemoveVoiceLine {
    pub dialogue_id: String,
}

/// 从数据存储整表重载授权数据
#[derive(Debug, Clone)]
pub struct ImportVoiceData;

/// 将授权数据整表写入数据存储
#[derive(Debug, Clone)]
pub struct ExportVoiceData;
