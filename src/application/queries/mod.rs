//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：运行期消费方使用的只读 API 面

mod resolution_queries;

pub mod handlers;

pub use resolution_queries::{
    CultureCoverage, GetActiveCulture, GetPlayableVoice, ListCultures, ResolveVoiceLine,
    UnresolvedLines,
};
