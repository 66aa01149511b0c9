//! 翻译系统核心模块
//!
//! ## 模块依赖关系
//!
//! ```text
//! TranslationService (service.rs)
//!     └── BatchTranslator (batch.rs)
//!             └── TranslationEngine (engine.rs)
//!                     ├── TermDictionary (dictionary.rs)
//!                     ├── PolicyTable (policy.rs)
//!                     └── RemoteTranslator (remote.rs)
//! ```

pub mod batch;
pub mod engine;
pub mod service;

/// 批量翻译器与配置
pub use batch::{BatchConfig, BatchStats, BatchTranslator};

/// 翻译引擎 - 单实体字段解析
pub use engine::{EngineStats, TranslationEngine};

/// 统一翻译服务 - 主要的对外接口
pub use service::{ServiceStatsSnapshot, TranslationService};
