//! Voxloc - 语音文化解析引擎
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Culture Context: 文化代码与回退链管理
//! - Voice Context: 台词语音条目管理
//! - Resolution Service: 回退解析算法
//!
//! 应用层 (application/):
//! - Ports: 端口定义（AssetProvider, ResolutionCache, VoiceDataStore）
//! - Commands: CQRS 命令处理器（编辑器/授权面）
//! - Queries: CQRS 查询处理器（运行期消费面）
//!
//! 基础设施层 (infrastructure/):
//! - Memory: 当前文化状态 + 解析缓存
//! - Events: 同步有序变更通知
//! - Persistence: 授权数据 JSON 快照
//! - Adapters: 资产系统适配器
//! - State: 引擎组合根（显式 init/teardown）

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
pub use infrastructure::{EngineInitError, EngineState};
