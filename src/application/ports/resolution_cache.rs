//! Resolution Cache Port - 解析结果缓存
//!
//! 以 (台词 ID, 请求文化) 为键、带世代标签的备忘缓存。
//! 过期检测依靠世代号比对，不使用 TTL。

use crate::domain::culture::CultureCode;
use crate::domain::voice::DialogueId;
use crate::domain::ResolutionResult;

/// 缓存键: (台词 ID, 解析时请求的文化)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub dialogue_id: DialogueId,
    pub culture: CultureCode,
}

/// 缓存统计信息
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub entries: usize,
    pub hit_count: u64,
    pub miss_count: u64,
    pub invalidation_count: u64,
}

/// Resolution Cache Port
///
/// 并发读安全；同一键的并发写可能产生等价的重复插入，
/// 这是无害的，只要不破坏数据本身。
pub trait ResolutionCachePort: Send + Sync {
    /// 读取与 `generation` 一致的缓存条目
    ///
    /// 世代不匹配的条目一律视为过期，绝不返回。
    fn get(&self, key: &CacheKey, generation: u64) -> Option<ResolutionResult>;

    /// 写入解析结果并打上世代标签
    fn insert(&self, key: CacheKey, resolution: ResolutionResult, generation: u64);

    /// 选择性失效: 丢弃指定台词在所有文化下的缓存条目
    fn invalidate_entry(&self, dialogue_id: &DialogueId);

    /// 全量失效: 切换文化或整表重载时调用
    fn invalidate_all(&self);

    /// 缓存统计
    fn stats(&self) -> CacheStats;
}
