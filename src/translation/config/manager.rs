//! 简化的配置管理器
//!
//! 提供统一的配置接口，支持文件配置、环境变量和默认值

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::constants;
use crate::translation::error::{helpers, TranslationError, TranslationResult};

/// 翻译管道配置
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// 词典未命中时是否允许调用远程翻译
    pub remote_enabled: bool,
    pub api_url: String,
    pub source_locale: String,

    /// 批处理中同时翻译的实体上限
    pub max_concurrent_entities: usize,
    /// 远程请求超时（秒），不设置时使用传输层默认值
    pub request_timeout_secs: Option<u64>,

    /// 追加到内置词典的术语（覆盖同名术语）
    pub terms: BTreeMap<String, String>,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            remote_enabled: true,
            api_url: constants::DEFAULT_API_URL.to_string(),
            source_locale: constants::SOURCE_LOCALE.to_string(),
            max_concurrent_entities: constants::DEFAULT_MAX_CONCURRENT_ENTITIES,
            request_timeout_secs: None,
            terms: BTreeMap::new(),
        }
    }
}

impl TranslationConfig {
    /// 创建指定 API 地址的默认配置
    pub fn with_api_url(api_url: &str) -> Self {
        Self {
            api_url: api_url.to_string(),
            ..Self::default()
        }
    }

    /// 验证配置
    pub fn validate(&self) -> TranslationResult<()> {
        if self.max_concurrent_entities == 0 {
            return Err(TranslationError::ConfigError("最大并发实体数不能为0".to_string()));
        }

        if self.source_locale.trim().is_empty() {
            return Err(TranslationError::ConfigError("源语言代码不能为空".to_string()));
        }

        if self.request_timeout_secs == Some(0) {
            return Err(TranslationError::ConfigError("请求超时必须大于0".to_string()));
        }

        if self.remote_enabled {
            let url = url::Url::parse(&self.api_url).map_err(|e| {
                TranslationError::ConfigError(format!("无效的翻译API地址 {}: {}", self.api_url, e))
            })?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(TranslationError::ConfigError(format!(
                    "翻译API地址必须使用 http 或 https: {}",
                    self.api_url
                )));
            }
        }

        if let Some((source, _)) = self
            .terms
            .iter()
            .find(|(source, target)| source.is_empty() || target.is_empty())
        {
            return Err(TranslationError::ConfigError(format!(
                "词典条目不能为空: {:?}",
                source
            )));
        }

        Ok(())
    }

    /// 应用环境变量覆盖
    ///
    /// 只有显式设置的变量才会覆盖；无效值记录警告后忽略。
    pub fn apply_env_overrides(&mut self) {
        use crate::env::{translation, EnvResult, EnvVar};

        fn take<T>(value: Option<EnvResult<T>>) -> Option<T> {
            match value? {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!("忽略无效的环境变量: {}", e);
                    None
                }
            }
        }

        if let Some(enabled) = take(translation::RemoteEnabled::get_if_set()) {
            self.remote_enabled = enabled;
        }

        if let Some(api_url) = take(translation::ApiUrl::get_if_set()) {
            self.api_url = api_url;
            tracing::info!("环境变量覆盖 API URL: {}", self.api_url);
        }

        if let Some(locale) = take(translation::SourceLocale::get_if_set()) {
            self.source_locale = locale;
        }

        if let Some(limit) = take(translation::MaxConcurrentEntities::get_if_set()) {
            self.max_concurrent_entities = limit;
        }

        if let Some(timeout) = take(translation::RequestTimeout::get_if_set()) {
            self.request_timeout_secs = Some(timeout.as_secs());
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// 简化的配置管理器
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: TranslationConfig,
}

impl ConfigManager {
    /// 创建新的配置管理器
    ///
    /// 依次加载 `.env`、配置文件、环境变量覆盖，最后验证。
    pub fn new() -> TranslationResult<Self> {
        let mut config = Self::load_config()?;
        config.apply_env_overrides();
        config.validate()?;

        Ok(Self { config })
    }

    /// 从指定文件创建（同样应用环境变量覆盖）
    pub fn from_file(path: &str) -> TranslationResult<Self> {
        let mut config = Self::load_from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;

        Ok(Self { config })
    }

    /// 获取配置
    pub fn get_config(&self) -> &TranslationConfig {
        &self.config
    }

    pub fn into_config(self) -> TranslationConfig {
        self.config
    }

    /// 从文件加载配置
    fn load_config() -> TranslationResult<TranslationConfig> {
        // 首先尝试加载 .env 文件
        Self::load_dotenv();

        // 查找配置文件
        for path in constants::CONFIG_PATHS {
            let expanded_path = shellexpand::tilde(path);
            if Path::new(expanded_path.as_ref()).exists() {
                tracing::info!("加载配置文件: {}", expanded_path);
                return Self::load_from_file(&expanded_path);
            }
        }

        tracing::info!("未找到配置文件，使用默认配置");
        Ok(TranslationConfig::default())
    }

    /// 从指定文件加载配置
    pub fn load_from_file(path: &str) -> TranslationResult<TranslationConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| helpers::config_error(format!("读取配置文件失败: {}", e)))?;

        // 尝试TOML格式
        if path.ends_with(".toml") {
            toml::from_str(&content)
                .map_err(|e| helpers::config_error(format!("解析TOML配置失败: {}", e)))
        } else {
            // 尝试JSON格式
            serde_json::from_str(&content)
                .map_err(|e| helpers::config_error(format!("解析JSON配置失败: {}", e)))
        }
    }

    /// 加载 .env 文件
    fn load_dotenv() {
        let env_files = [".env.local", ".env.development", ".env.production", ".env"];

        for env_file in &env_files {
            if Path::new(env_file).exists() && dotenv::from_filename(env_file).is_ok() {
                tracing::info!("已加载环境变量文件: {}", env_file);
                break;
            }
        }
    }

    /// 生成示例配置文件
    pub fn generate_example_config(path: &str) -> TranslationResult<()> {
        let mut config = TranslationConfig::default();
        config.request_timeout_secs = Some(10);
        config
            .terms
            .insert("Mining".to_string(), "採礦業".to_string());

        let content = toml::to_string_pretty(&config)
            .map_err(|e| helpers::config_error(format!("序列化配置失败: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| helpers::config_error(format!("写入配置文件失败: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("bond-gateway-{}-{}", std::process::id(), name))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = TranslationConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.remote_enabled);
        assert_eq!(config.source_locale, "en");
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_validation_failures() {
        let mut config = TranslationConfig::default();
        config.max_concurrent_entities = 0;
        assert!(matches!(config.validate(), Err(TranslationError::ConfigError(_))));

        let config = TranslationConfig::with_api_url("not a url");
        assert!(config.validate().is_err());

        let config = TranslationConfig::with_api_url("ftp://example.com/translate");
        assert!(config.validate().is_err());

        let mut config = TranslationConfig::default();
        config.request_timeout_secs = Some(0);
        assert!(config.validate().is_err());

        let mut config = TranslationConfig::default();
        config.terms.insert("Mining".to_string(), String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_disabled_remote_skips_url_check() {
        let mut config = TranslationConfig::with_api_url("not a url");
        config.remote_enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_toml_with_partial_fields() {
        let path = temp_path("partial.toml");
        std::fs::write(
            &path,
            r#"
max_concurrent_entities = 3
request_timeout_secs = 5

[terms]
Mining = "採礦業"
"#,
        )
        .unwrap();

        let config = ConfigManager::load_from_file(&path).unwrap();
        assert_eq!(config.max_concurrent_entities, 3);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.terms.get("Mining").map(String::as_str), Some("採礦業"));
        assert_eq!(config.api_url, constants::DEFAULT_API_URL);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_json_config() {
        let path = temp_path("config.json");
        std::fs::write(
            &path,
            r#"{"remote_enabled": false, "api_url": "http://localhost:5000/translate"}"#,
        )
        .unwrap();

        let config = ConfigManager::load_from_file(&path).unwrap();
        assert!(!config.remote_enabled);
        assert_eq!(config.api_url, "http://localhost:5000/translate");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_missing_and_malformed_files() {
        assert!(ConfigManager::load_from_file("/nonexistent/bond-gateway.toml").is_err());

        let path = temp_path("broken.toml");
        std::fs::write(&path, "max_concurrent_entities = \"many\"").unwrap();
        let error = ConfigManager::load_from_file(&path).unwrap_err();
        assert!(matches!(error, TranslationError::ConfigError(_)));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_generate_example_config_round_trips() {
        let path = temp_path("example.toml");
        ConfigManager::generate_example_config(&path).unwrap();

        let config = ConfigManager::load_from_file(&path).unwrap();
        assert_eq!(config.request_timeout_secs, Some(10));
        assert!(config.terms.contains_key("Mining"));
        assert!(config.validate().is_ok());

        std::fs::remove_file(&path).ok();
    }
}
