//! 翻译配置管理模块
//!
//! 提供简化的配置管理，支持环境变量、配置文件和默认值

pub mod manager;

// 重新导出主要类型
pub use manager::{ConfigManager, TranslationConfig};

/// 配置常量
pub mod constants {
    // 远程翻译服务
    pub const DEFAULT_API_URL: &str = "https://ftapi.pythonanywhere.com/translate";
    pub const SOURCE_LOCALE: &str = "en";
    pub const RESPONSE_TEXT_FIELD: &str = "destination-text";

    // 批处理
    pub const DEFAULT_MAX_CONCURRENT_ENTITIES: usize = 8;

    // 响应载荷
    pub const ITEMS_FIELD: &str = "items";
    pub const LANGUAGE_MARKER_FIELD: &str = "lang";

    // 配置文件搜索路径
    pub const CONFIG_PATHS: &[&str] = &[
        "bond-gateway.toml",
        "translation-config.toml",
        "translation-config.json",
        ".bond-gateway.toml",
        "~/.config/bond-gateway/translation.toml",
        "/etc/bond-gateway/translation.toml",
    ];
}

/// 便利函数
pub fn config_file_exists() -> bool {
    constants::CONFIG_PATHS
        .iter()
        .any(|path| std::path::Path::new(shellexpand::tilde(path).as_ref()).exists())
}

/// 加载配置，失败时回退到默认配置
pub fn load_translation_config() -> TranslationConfig {
    match ConfigManager::new() {
        Ok(manager) => manager.get_config().clone(),
        Err(e) => {
            tracing::warn!("配置加载失败，使用默认配置: {}", e);
            TranslationConfig::default()
        }
    }
}
