//! Culture Context - 文化注册表

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use super::{CultureCode, CultureError};

/// 回退链 - 从最具体到根默认文化的有序序列
///
/// 不变量:
/// - 位置 0 是文化自身
/// - 链上不重复访问任何文化
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackChain {
    chain: Vec<CultureCode>,
}

impl FallbackChain {
    fn new(chain: Vec<CultureCode>) -> Self {
        Self { chain }
    }

    pub fn cultures(&self) -> &[CultureCode] {
        &self.chain
    }

    /// 链尾的根默认文化
    pub fn root(&self) -> Option<&CultureCode> {
        self.chain.last()
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}

/// 文化注册表
///
/// 进程级已知文化表，每个文化持有一条显式回退链。
/// 注册时校验链的局部不变量，`validate` 负责跨文化的整体校验。
pub struct CultureRegistry {
    chains: DashMap<CultureCode, FallbackChain>,
}

impl CultureRegistry {
    pub fn new() -> Self {
        Self {
            chains: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 注册文化及其完整回退链（链首必须是文化自身）
    ///
    /// 校验:
    /// - 链非空且以 `code` 开头
    /// - 链上不重复访问任何文化（`code` 只允许出现在位置 0）
    pub fn register(
        &self,
        code: CultureCode,
        chain: Vec<CultureCode>,
    ) -> Result<(), CultureError> {
        if chain.is_empty() {
            return Err(CultureError::InvalidFallbackChain {
                culture: code,
                reason: "回退链不能为空".to_string(),
            });
        }
        if chain[0] != code {
            return Err(CultureError::InvalidFallbackChain {
                culture: code,
                reason: "回退链必须以文化自身开头".to_string(),
            });
        }
        let mut seen = HashSet::new();
        for culture in &chain {
            if !seen.insert(culture) {
                return Err(CultureError::InvalidFallbackChain {
                    culture: code,
                    reason: format!("回退链重复访问文化: {}", culture),
                });
            }
        }

        match self.chains.entry(code) {
            Entry::Occupied(occupied) => {
                Err(CultureError::DuplicateCulture(occupied.key().clone()))
            }
            Entry::Vacant(vacant) => {
                vacant.insert(FallbackChain::new(chain));
                Ok(())
            }
        }
    }

    /// 查询文化的回退链
    pub fn fallback_chain_for(&self, code: &CultureCode) -> Result<FallbackChain, CultureError> {
        self.chains
            .get(code)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| CultureError::UnknownCulture(code.clone()))
    }

    pub fn contains(&self, code: &CultureCode) -> bool {
        self.chains.contains_key(code)
    }

    /// 根文化: 回退链只含自身的文化
    pub fn is_root(&self, code: &CultureCode) -> bool {
        self.chains
            .get(code)
            .map(|entry| entry.value().len() == 1)
            .unwrap_or(false)
    }

    /// 所有已注册文化（排序后返回，保证报告输出确定性）
    pub fn cultures(&self) -> Vec<CultureCode> {
        let mut cultures: Vec<CultureCode> =
            self.chains.iter().map(|entry| entry.key().clone()).collect();
        cultures.sort();
        cultures
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// 整体校验: 每条链的成员都已注册，且链尾是根文化
    ///
    /// 引擎初始化时调用；失败即配置错误，注册表不得投入解析。
    pub fn validate(&self) -> Result<(), CultureError> {
        for entry in self.chains.iter() {
            let chain = entry.value();
            for culture in chain.cultures() {
                if !self.chains.contains_key(culture) {
                    return Err(CultureError::InvalidFallbackChain {
                        culture: entry.key().clone(),
                        reason: format!("回退链引用了未注册的文化: {}", culture),
                    });
                }
            }
            if let Some(root) = chain.root() {
                if !self.is_root(root) {
                    return Err(CultureError::InvalidFallbackChain {
                        culture: entry.key().clone(),
                        reason: format!("回退链未终止于根文化: {}", root),
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for CultureRegistry {
    fn default() -> Self {
        Self::new()
    }
}
