//! Active Culture State - 进程级当前文化状态

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use crate::domain::culture::CultureCode;

/// 文化戳 - 当前文化与世代号的一次性原子读取结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CultureStamp {
    pub culture: CultureCode,
    /// 单调递增，每次切换 +1；用于判定缓存条目是否过期
    pub generation: u64,
}

/// 当前文化状态
///
/// 进程级单一写者（SetActiveCulture 命令），任意多读者。
/// culture 与 generation 在同一把锁下读写，杜绝两者不一致的撕裂读。
pub struct ActiveCultureState {
    inner: RwLock<CultureStamp>,
}

impl ActiveCultureState {
    pub fn new(initial: CultureCode) -> Self {
        Self {
            inner: RwLock::new(CultureStamp {
                culture: initial,
                generation: 0,
            }),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 原子读取当前文化与世代
    pub fn stamp(&self) -> CultureStamp {
        self.inner.read().clone()
    }

    /// 切换文化并递增世代
    ///
    /// 切到相同文化同样递增——不变量保持简单:
    /// 每次被接受的切换都使既有缓存条目不可读。
    pub fn switch(&self, culture: CultureCode) -> CultureStamp {
        let mut guard = self.inner.write();
        guard.generation += 1;
        guard.culture = culture;
        guard.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn culture(s: &str) -> CultureCode {
        CultureCode::new(s).unwrap()
    }

    #[test]
    fn test_initial_stamp() {
        let state = ActiveCultureState::new(culture("en"));
        let stamp = state.stamp();
        assert_eq!(stamp.culture, culture("en"));
        assert_eq!(stamp.generation, 0);
    }

    #[test]
    fn test_switch_increments_generation() {
        let state = ActiveCultureState::new(culture("en"));
        let first = state.switch(culture("fr"));
        assert_eq!(first.culture, culture("fr"));
        assert_eq!(first.generation, 1);

        // 切回相同文化也递增
        let second = state.switch(culture("fr"));
        assert_eq!(second.generation, 2);
        assert_eq!(state.stamp(), second);
    }
}
