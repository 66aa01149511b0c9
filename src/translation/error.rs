//! 翻译模块统一错误处理
//!
//! 提供结构化错误类型和错误处理机制。注意：远程翻译失败在
//! `RemoteTranslator` 内部就被降级为原文返回，这里的网络类错误只在
//! 翻译器内部流转，不会到达调用方。

use std::fmt;

use thiserror::Error;

/// 翻译错误类型
#[derive(Error, Debug, Clone)]
pub enum TranslationError {
    /// 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),

    /// 网络错误
    #[error("网络错误: {0}")]
    NetworkError(String),

    /// 远程翻译服务返回了非成功状态
    #[error("远程翻译服务错误: {0}")]
    RemoteServiceError(String),

    /// 输入验证错误（例如实体不是 JSON 对象）
    #[error("输入无效: {0}")]
    InvalidInput(String),

    /// 未知的实体类型，属于调用方的编程错误
    #[error("未知的实体类型: {0}")]
    UnknownEntityKind(String),

    /// 不支持的目标语言代码
    #[error("不支持的目标语言: {0}")]
    UnsupportedLanguage(String),

    /// 解析错误
    #[error("解析错误: {0}")]
    ParseError(String),

    /// 序列化错误
    #[error("序列化错误: {0}")]
    SerializationError(String),

    /// 内部错误
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl TranslationError {
    /// 是否是调用方的编程错误
    ///
    /// 这类错误必须向上传播，不能在批处理边界被吞掉。
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            TranslationError::UnknownEntityKind(_) | TranslationError::UnsupportedLanguage(_)
        )
    }

    /// 获取错误的严重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TranslationError::ConfigError(_) => ErrorSeverity::Critical,
            TranslationError::NetworkError(_) => ErrorSeverity::Warning,
            TranslationError::RemoteServiceError(_) => ErrorSeverity::Warning,
            TranslationError::InvalidInput(_) => ErrorSeverity::Warning,
            TranslationError::UnknownEntityKind(_) => ErrorSeverity::Error,
            TranslationError::UnsupportedLanguage(_) => ErrorSeverity::Error,
            TranslationError::ParseError(_) => ErrorSeverity::Warning,
            TranslationError::SerializationError(_) => ErrorSeverity::Error,
            TranslationError::InternalError(_) => ErrorSeverity::Critical,
        }
    }

    /// 获取错误类别
    pub fn category(&self) -> ErrorCategory {
        match self {
            TranslationError::ConfigError(_) => ErrorCategory::Configuration,
            TranslationError::NetworkError(_) => ErrorCategory::Network,
            TranslationError::RemoteServiceError(_) => ErrorCategory::Service,
            TranslationError::InvalidInput(_) => ErrorCategory::Input,
            TranslationError::UnknownEntityKind(_) => ErrorCategory::Caller,
            TranslationError::UnsupportedLanguage(_) => ErrorCategory::Caller,
            TranslationError::ParseError(_) => ErrorCategory::Parsing,
            TranslationError::SerializationError(_) => ErrorCategory::Serialization,
            TranslationError::InternalError(_) => ErrorCategory::Internal,
        }
    }

    /// 创建带上下文的错误
    pub fn with_context<T: fmt::Display>(mut self, context: T) -> Self {
        let new_msg = format!("{} (上下文: {})", self.message(), context);

        match &mut self {
            TranslationError::ConfigError(msg)
            | TranslationError::NetworkError(msg)
            | TranslationError::RemoteServiceError(msg)
            | TranslationError::InvalidInput(msg)
            | TranslationError::UnknownEntityKind(msg)
            | TranslationError::UnsupportedLanguage(msg)
            | TranslationError::ParseError(msg)
            | TranslationError::SerializationError(msg)
            | TranslationError::InternalError(msg) => *msg = new_msg,
        }

        self
    }

    fn message(&self) -> &str {
        match self {
            TranslationError::ConfigError(msg)
            | TranslationError::NetworkError(msg)
            | TranslationError::RemoteServiceError(msg)
            | TranslationError::InvalidInput(msg)
            | TranslationError::UnknownEntityKind(msg)
            | TranslationError::UnsupportedLanguage(msg)
            | TranslationError::ParseError(msg)
            | TranslationError::SerializationError(msg)
            | TranslationError::InternalError(msg) => msg,
        }
    }
}

/// 错误严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Service,
    Input,
    Caller,
    Parsing,
    Serialization,
    Internal,
}

/// 标准错误转换
impl From<std::io::Error> for TranslationError {
    fn from(error: std::io::Error) -> Self {
        TranslationError::ConfigError(format!("IO错误: {}", error))
    }
}

impl From<serde_json::Error> for TranslationError {
    fn from(error: serde_json::Error) -> Self {
        TranslationError::SerializationError(format!("JSON序列化错误: {}", error))
    }
}

impl From<toml::de::Error> for TranslationError {
    fn from(error: toml::de::Error) -> Self {
        TranslationError::ParseError(format!("TOML解析错误: {}", error))
    }
}

impl From<reqwest::Error> for TranslationError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            TranslationError::ParseError(format!("响应解析失败: {}", error))
        } else if let Some(status) = error.status() {
            TranslationError::RemoteServiceError(format!("HTTP {}", status))
        } else {
            TranslationError::NetworkError(error.to_string())
        }
    }
}

/// 错误结果类型别名
pub type TranslationResult<T> = Result<T, TranslationError>;

/// 错误处理助手函数
pub mod helpers {
    use super::*;

    /// 记录并返回错误
    pub fn log_error<T>(error: TranslationError) -> TranslationResult<T> {
        match error.severity() {
            ErrorSeverity::Info => tracing::info!("翻译信息: {}", error),
            ErrorSeverity::Warning => tracing::warn!("翻译警告: {}", error),
            ErrorSeverity::Error => tracing::error!("翻译错误: {}", error),
            ErrorSeverity::Critical => tracing::error!("翻译严重错误: {}", error),
        }

        Err(error)
    }

    /// 创建配置错误
    pub fn config_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::ConfigError(msg.to_string())
    }

    /// 创建输入验证错误
    pub fn validation_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::InvalidInput(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_errors_are_flagged() {
        assert!(TranslationError::UnknownEntityKind("trade".into()).is_caller_error());
        assert!(TranslationError::UnsupportedLanguage("fr".into()).is_caller_error());
        assert!(!TranslationError::InvalidInput("array".into()).is_caller_error());
        assert!(!TranslationError::NetworkError("reset".into()).is_caller_error());
    }

    #[test]
    fn test_category_and_severity() {
        let error = TranslationError::NetworkError("connection refused".into());
        assert_eq!(error.category(), ErrorCategory::Network);
        assert_eq!(error.severity(), ErrorSeverity::Warning);

        let error = TranslationError::ConfigError("bad url".into());
        assert_eq!(error.severity(), ErrorSeverity::Critical);
        assert!(ErrorSeverity::Critical > ErrorSeverity::Warning);
    }

    #[test]
    fn test_with_context_keeps_variant() {
        let error = TranslationError::InvalidInput("实体不是对象".into()).with_context("index 3");
        assert!(matches!(error, TranslationError::InvalidInput(_)));
        assert_eq!(error.to_string(), "输入无效: 实体不是对象 (上下文: index 3)");
    }

    #[test]
    fn test_log_error_returns_err() {
        let result: TranslationResult<()> =
            helpers::log_error(helpers::validation_error("empty payload"));
        assert!(matches!(result, Err(TranslationError::InvalidInput(_))));
    }
}
