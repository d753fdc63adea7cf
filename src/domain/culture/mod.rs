//! Culture Context - 文化限界上下文
//!
//! 职责:
//! - 文化代码注册与规范化
//! - 回退链校验与查询
//! - 注册表完整性检查

mod errors;
mod registry;
mod value_objects;

pub use errors::CultureError;
pub use registry::{CultureRegistry, FallbackChain};
pub use value_objects::CultureCode;
