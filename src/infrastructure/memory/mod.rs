//! Memory Layer - In-Memory State Management
//!
//! 当前文化状态与解析缓存的内存实现

mod culture_state;
mod resolution_cache;

pub use culture_state::{ActiveCultureState, CultureStamp};
pub use resolution_cache::InMemoryResolutionCache;
