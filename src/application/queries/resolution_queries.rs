//! Resolution Queries

/// 解析台词语音查询
#[derive(Debug, Clone)]
pub struct ResolveVoiceLine {
    pub dialogue_id: String,
    /// None 表示使用当前文化
    pub culture: Option<String>,
}

/// 可播放语音查询（解析 + 资产句柄查找）
#[derive(Debug, Clone)]
pub struct GetPlayableVoice {
    pub dialogue_id: String,
}

/// 当前文化查询
#[derive(Debug, Clone)]
pub struct GetActiveCulture;

/// 已注册文化列表查询
#[derive(Debug, Clone)]
pub struct ListCultures;

/// 缺失翻译清单查询: 指定文化下解析为 Missing 的所有台词
#[derive(Debug, Clone)]
pub struct UnresolvedLines {
    pub culture: String,
}

/// 文化覆盖率报告查询
#[derive(Debug, Clone)]
pub struct CultureCoverage;
