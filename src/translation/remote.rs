//! 远程翻译服务
//!
//! 远程翻译是尽力而为的增强，不是数据服务的硬依赖：任何失败
//! （网络错误、非成功状态码、响应缺少译文字段）都只记录日志，
//! 然后原样返回输入文本。每次调用只尝试一次，不重试。

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::translation::config::{constants, TranslationConfig};
use crate::translation::error::{TranslationError, TranslationResult};
use crate::translation::language::TargetLanguage;

/// 远程翻译器
///
/// 实现必须是不会失败的：无法翻译时返回原文。
#[async_trait]
pub trait RemoteTranslator: Send + Sync {
    async fn translate(&self, text: &str, language: TargetLanguage) -> String;
}

/// 恒等翻译器
///
/// 关闭远程翻译时使用，`DictionaryThenRemote` 字段因此退化为只查词典。
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTranslator;

#[async_trait]
impl RemoteTranslator for PassthroughTranslator {
    async fn translate(&self, text: &str, _language: TargetLanguage) -> String {
        text.to_string()
    }
}

/// 远程翻译统计信息
#[derive(Debug, Default)]
pub struct RemoteStats {
    /// 实际发出的请求数
    pub requests_sent: AtomicUsize,
    /// 降级为原文的请求数
    pub failures: AtomicUsize,
}

impl RemoteStats {
    pub fn requests_sent(&self) -> usize {
        self.requests_sent.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Deserialize)]
struct RemoteResponse {
    #[serde(rename = "destination-text")]
    destination_text: Option<String>,
}

/// 基于 HTTP 的远程翻译器
///
/// 请求格式：`GET {api_url}?sl={source}&dl={locale}&text={text}`，
/// 响应为 JSON，译文位于 `destination-text` 字段。
#[derive(Debug, Clone)]
pub struct HttpRemoteTranslator {
    client: reqwest::Client,
    api_url: String,
    source_locale: String,
    stats: Arc<RemoteStats>,
}

impl HttpRemoteTranslator {
    pub fn new(config: &TranslationConfig) -> TranslationResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TranslationError::ConfigError(format!("创建HTTP客户端失败: {}", e)))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            source_locale: config.source_locale.clone(),
            stats: Arc::new(RemoteStats::default()),
        })
    }

    pub fn stats(&self) -> Arc<RemoteStats> {
        Arc::clone(&self.stats)
    }

    async fn request(&self, text: &str, locale: &str) -> TranslationResult<String> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("sl", self.source_locale.as_str()),
                ("dl", locale),
                ("text", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslationError::RemoteServiceError(format!("HTTP {}", status)));
        }

        let body: RemoteResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::ParseError(format!("响应不是有效的JSON: {}", e)))?;
        match body.destination_text {
            Some(translated) if !translated.is_empty() => Ok(translated),
            _ => Err(TranslationError::ParseError(format!(
                "响应缺少 {} 字段",
                constants::RESPONSE_TEXT_FIELD
            ))),
        }
    }
}

#[async_trait]
impl RemoteTranslator for HttpRemoteTranslator {
    async fn translate(&self, text: &str, language: TargetLanguage) -> String {
        if text.is_empty() || language.is_source() {
            return text.to_string();
        }

        let locale = language.remote_locale();
        self.stats.requests_sent.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("调用翻译API: {}, 文本长度: {}", locale, text.len());

        match self.request(text, locale).await {
            Ok(translated) => {
                tracing::debug!(
                    "翻译成功: {} → {}",
                    preview(text),
                    preview(&translated)
                );
                translated
            }
            Err(e) => {
                self.stats.failures.fetch_add(1, Ordering::Relaxed);
                tracing::warn!("翻译API失败，保留原文: {}", e);
                text.to_string()
            }
        }
    }
}

/// 日志用的文本预览（按字符截断）
fn preview(text: &str) -> String {
    const LIMIT: usize = 50;
    if text.chars().count() <= LIMIT {
        text.to_string()
    } else {
        let head: String = text.chars().take(LIMIT).collect();
        format!("{}...", head)
    }
}
