//! Culture Commands

/// 注册文化命令
///
/// `fallback` 是自身之后的回退尾部（最具体在前），
/// 完整回退链由处理器拼为 [code] + fallback。
#[derive(Debug, Clone)]
pub struct RegisterCulture {
    pub code: String,
    pub fallback: Vec<String>,
}

/// 切换当前文化命令
#[derive(Debug, Clone)]
pub struct SetActiveCulture {
    pub code: String,
}
