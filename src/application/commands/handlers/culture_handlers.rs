//! Culture Command Handlers

use std::sync::Arc;

use crate::application::commands::{RegisterCulture, SetActiveCulture};
use crate::application::error::ApplicationError;
use crate::application::ports::ResolutionCachePort;
use crate::domain::culture::{CultureCode, CultureError, CultureRegistry};
use crate::infrastructure::events::ChangeNotifier;
use crate::infrastructure::memory::{ActiveCultureState, CultureStamp};

// ============================================================================
// RegisterCulture
// ============================================================================

/// RegisterCulture Handler
///
/// 注册表在引擎初始化时已整体校验；运行期注册必须先自证
/// 链成员已注册、链尾是根文化，否则拒绝，不污染注册表。
pub struct RegisterCultureHandler {
    registry: Arc<CultureRegistry>,
}

impl RegisterCultureHandler {
    pub fn new(registry: Arc<CultureRegistry>) -> Self {
        Self { registry }
    }

    pub fn handle(&self, command: RegisterCulture) -> Result<(), ApplicationError> {
        let code = CultureCode::new(command.code).map_err(ApplicationError::validation)?;

        let mut chain = Vec::with_capacity(command.fallback.len() + 1);
        chain.push(code.clone());
        for fallback in command.fallback {
            chain.push(CultureCode::new(fallback).map_err(ApplicationError::validation)?);
        }

        for member in chain.iter().skip(1) {
            if !self.registry.contains(member) {
                return Err(CultureError::InvalidFallbackChain {
                    culture: code,
                    reason: format!("回退链引用了未注册的文化: {}", member),
                }
                .into());
            }
        }
        if chain.len() > 1 {
            if let Some(last) = chain.last() {
                if !self.registry.is_root(last) {
                    return Err(CultureError::InvalidFallbackChain {
                        culture: code,
                        reason: format!("回退链未终止于根文化: {}", last),
                    }
                    .into());
                }
            }
        }

        let chain_len = chain.len();
        self.registry.register(code.clone(), chain)?;

        tracing::info!(
            culture = %code,
            chain_len = chain_len,
            "Culture registered"
        );

        Ok(())
    }
}

// ============================================================================
// SetActiveCulture
// ============================================================================

/// SetActiveCulture Handler
///
/// 独占式低频操作: 递增世代并换入新文化，随后整体失效缓存，
/// 并在返回前同步通知订阅者，保证订阅者观察到的文化与
/// 后续解析调用一致。
pub struct SetActiveCultureHandler {
    registry: Arc<CultureRegistry>,
    culture_state: Arc<ActiveCultureState>,
    cache: Arc<dyn ResolutionCachePort>,
    notifier: Arc<ChangeNotifier>,
}

impl SetActiveCultureHandler {
    pub fn new(
        registry: Arc<CultureRegistry>,
        culture_state: Arc<ActiveCultureState>,
        cache: Arc<dyn ResolutionCachePort>,
        notifier: Arc<ChangeNotifier>,
    ) -> Self {
        Self {
            registry,
            culture_state,
            cache,
            notifier,
        }
    }

    pub fn handle(&self, command: SetActiveCulture) -> Result<CultureStamp, ApplicationError> {
        let code = CultureCode::new(command.code).map_err(ApplicationError::validation)?;
        if !self.registry.contains(&code) {
            return Err(CultureError::UnknownCulture(code).into());
        }

        let stamp = self.culture_state.switch(code);
        self.cache.invalidate_all();
        self.notifier
            .publish_culture_changed(stamp.culture.clone(), stamp.generation);

        tracing::info!(
            culture = %stamp.culture,
            generation = stamp.generation,
            "Active culture switched"
        );

        Ok(stamp)
    }
}
