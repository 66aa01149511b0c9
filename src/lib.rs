//! # Bond Gateway Library
//!
//! 债券行情网关的响应字段翻译管道：把上游债券数据 API 返回的 JSON 载荷中
//! 选定的字符串字段翻译成中文，结构保持不变。
//!
//! ## 模块组织
//!
//! - `env` - 类型安全的环境变量管理
//! - `logging` - 日志初始化
//! - `translation` - 翻译管道（词典、远程翻译、字段策略、引擎、批处理）

pub mod env;
pub mod logging;
pub mod translation;

// Re-export commonly used items for convenience
pub use translation::{
    EntityKind, TargetLanguage, TranslationConfig, TranslationError, TranslationResult,
    TranslationService,
};
