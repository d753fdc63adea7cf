//! In-Memory Resolution Cache Implementation

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use crate::application::ports::{CacheKey, CacheStats, ResolutionCachePort};
use crate::domain::voice::DialogueId;
use crate::domain::ResolutionResult;

/// 带世代标签的内部缓存条目
#[derive(Debug, Clone)]
struct CachedResolution {
    resolution: ResolutionResult,
    generation: u64,
}

/// 内存解析缓存
///
/// 纯派生索引: 不持有任何外部资源，可随时整体丢弃重建。
/// 同一键的并发写入由 DashMap 分片锁串行化；
/// 两次等价插入互相覆盖，无害。
pub struct InMemoryResolutionCache {
    entries: DashMap<CacheKey, CachedResolution>,
    hit_count: AtomicU64,
    miss_count: AtomicU64,
    invalidation_count: AtomicU64,
}

impl InMemoryResolutionCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            hit_count: AtomicU64::new(0),
            miss_count: AtomicU64::new(0),
            invalidation_count: AtomicU64::new(0),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Default for InMemoryResolutionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionCachePort for InMemoryResolutionCache {
    fn get(&self, key: &CacheKey, generation: u64) -> Option<ResolutionResult> {
        if let Some(entry) = self.entries.get(key) {
            if entry.generation == generation {
                self.hit_count.fetch_add(1, Ordering::Relaxed);
                return Some(entry.resolution.clone());
            }
        } else {
            self.miss_count.fetch_add(1, Ordering::Relaxed);
            return None;
        }

        // 条目存在但世代过期: 顺手丢弃，按未命中处理
        self.entries
            .remove_if(key, |_, entry| entry.generation != generation);
        self.miss_count.fetch_add(1, Ordering::Relaxed);
        None
    }

    fn insert(&self, key: CacheKey, resolution: ResolutionResult, generation: u64) {
        self.entries.insert(
            key,
            CachedResolution {
                resolution,
                generation,
            },
        );
    }

    fn invalidate_entry(&self, dialogue_id: &DialogueId) {
        self.entries.retain(|key, _| key.dialogue_id != *dialogue_id);
        self.invalidation_count.fetch_add(1, Ordering::Relaxed);
    }

    fn invalidate_all(&self) {
        self.entries.clear();
        self.invalidation_count.fetch_add(1, Ordering::Relaxed);
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hit_count: self.hit_count.load(Ordering::Relaxed),
            miss_count: self.miss_count.load(Ordering::Relaxed),
            invalidation_count: self.invalidation_count.load(Ordering::Relaxed),
        }
    }
}
