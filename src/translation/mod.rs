//! 翻译模块
//!
//! 把上游债券数据 API 返回的实体翻译成目标语言，采用清晰的模块化架构：
//! - **dictionary**: 内置金融术语词典（精确匹配）
//! - **remote**: 远程机器翻译（尽力而为，失败时保留原文）
//! - **policy**: 每种实体类型的可翻译字段及解析方式
//! - **core**: 单实体翻译引擎、批量翻译器和统一服务
//! - **config**: 配置管理
//! - **error**: 错误处理
//!
//! # 基本用法
//!
//! ```rust,no_run
//! use bond_gateway::translation::{EntityKind, TargetLanguage, TranslationConfig, TranslationService};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = TranslationService::new(TranslationConfig::default())?;
//!
//! let emission = json!({"emitent_branch_name_eng": "Banking", "kind_name_eng": "Bonds"});
//! let translated = service
//!     .translate_entity(&emission, EntityKind::BondEmission, TargetLanguage::TraditionalChinese)
//!     .await?;
//! assert_eq!(translated["emitent_branch_name_eng"], "銀行業");
//! # Ok(())
//! # }
//! ```

// ============================================================================
// 子模块声明
// ============================================================================

/// 配置管理模块 - 远程翻译地址、并发上限、附加术语
pub mod config;

/// 核心模块 - 翻译引擎、批处理和统一服务
pub mod core;

/// 金融术语词典
pub mod dictionary;

/// 错误处理模块 - 统一的错误类型和处理机制
pub mod error;

/// 目标语言
pub mod language;

/// 字段翻译策略
pub mod policy;

/// 远程翻译器
pub mod remote;

// ============================================================================
// 核心API导出
// ============================================================================

/// 翻译服务的主要组件
///
/// - `TranslationService`: 统一翻译服务
/// - `TranslationEngine`: 单实体翻译引擎
/// - `BatchTranslator`: 保序、限流、隔离失败的批量翻译器
pub use self::core::{
    BatchConfig, BatchTranslator, ServiceStatsSnapshot, TranslationEngine, TranslationService,
};

/// 配置管理相关组件
pub use config::{constants, ConfigManager, TranslationConfig};

/// 错误处理相关类型
pub use error::{ErrorCategory, ErrorSeverity, TranslationError, TranslationResult};

/// 领域类型
pub use dictionary::TermDictionary;
pub use language::TargetLanguage;
pub use policy::{EntityKind, FieldPolicy, FieldRule, PolicyTable, ResolutionMode};
pub use remote::{HttpRemoteTranslator, PassthroughTranslator, RemoteTranslator};

// ============================================================================
// 便利函数
// ============================================================================

/// 检查翻译配置文件是否存在
///
/// 按 `constants::CONFIG_PATHS` 的顺序查找，支持 `~` 展开。
pub fn config_file_exists() -> bool {
    config::config_file_exists()
}

/// 加载翻译配置
///
/// 依次应用 `.env`、配置文件和环境变量；失败时回退到默认配置。
pub fn load_translation_config() -> TranslationConfig {
    config::load_translation_config()
}

/// 按配置创建翻译服务
///
/// 配置来源同 [`load_translation_config`]。
pub fn create_service() -> TranslationResult<TranslationService> {
    TranslationService::new(load_translation_config())
}
