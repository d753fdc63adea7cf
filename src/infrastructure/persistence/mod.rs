//! Persistence Layer - 数据持久化
//!
//! 授权数据快照的 JSON 文件实现

pub mod json;
