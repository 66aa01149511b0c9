//! 翻译服务
//!
//! 进程启动时构建一次的门面：持有只读的词典、策略表和远程翻译器，
//! 对外提供单实体、批量和整个响应载荷三种入口，并汇总统计信息。
//!
//! ## 使用示例
//!
//! ```rust,no_run
//! use bond_gateway::translation::{EntityKind, TargetLanguage, TranslationConfig, TranslationService};
//!
//! # async fn example(payload: serde_json::Value) -> Result<(), Box<dyn std::error::Error>> {
//! let service = TranslationService::new(TranslationConfig::default())?;
//! let translated = service
//!     .translate_response(&payload, EntityKind::BondEmission, TargetLanguage::TraditionalChinese)
//!     .await?;
//! println!("{}", translated);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use serde_json::Value;

use crate::translation::{
    config::{constants, TranslationConfig},
    core::batch::{BatchConfig, BatchTranslator},
    core::engine::TranslationEngine,
    dictionary::TermDictionary,
    error::{helpers, TranslationResult},
    language::TargetLanguage,
    policy::{EntityKind, PolicyTable},
    remote::{HttpRemoteTranslator, PassthroughTranslator, RemoteStats, RemoteTranslator},
};

/// 统一的翻译服务
pub struct TranslationService {
    batch: BatchTranslator,
    remote_stats: Option<Arc<RemoteStats>>,
}

impl TranslationService {
    /// 根据配置创建翻译服务
    ///
    /// 配置中的 `terms` 会合并进内置词典；关闭远程翻译时使用恒等翻译器。
    pub fn new(config: TranslationConfig) -> TranslationResult<Self> {
        config.validate()?;

        let dictionary = TermDictionary::builtin().with_terms(config.terms.clone());
        let policies = PolicyTable::builtin();

        let remote: Arc<dyn RemoteTranslator>;
        let remote_stats: Option<Arc<RemoteStats>>;
        if config.remote_enabled {
            let translator = HttpRemoteTranslator::new(&config)?;
            remote_stats = Some(translator.stats());
            remote = Arc::new(translator);
        } else {
            tracing::info!("远程翻译已关闭，词典未命中的字段保留原文");
            remote_stats = None;
            remote = Arc::new(PassthroughTranslator);
        }

        tracing::info!(
            "翻译服务已初始化: 词典 {} 条，并发上限 {}",
            dictionary.len(),
            config.max_concurrent_entities
        );

        let mut service = Self::from_parts(
            dictionary,
            policies,
            remote,
            BatchConfig::from(&config),
        );
        service.remote_stats = remote_stats;
        Ok(service)
    }

    /// 由现成的组件组装服务（测试或自定义远程翻译器时使用）
    pub fn from_parts(
        dictionary: TermDictionary,
        policies: PolicyTable,
        remote: Arc<dyn RemoteTranslator>,
        batch_config: BatchConfig,
    ) -> Self {
        let engine = Arc::new(TranslationEngine::new(
            Arc::new(dictionary),
            Arc::new(policies),
            remote,
        ));

        Self {
            batch: BatchTranslator::new(engine, batch_config),
            remote_stats: None,
        }
    }

    /// 翻译单个实体
    pub async fn translate_entity(
        &self,
        entity: &Value,
        kind: EntityKind,
        language: TargetLanguage,
    ) -> TranslationResult<Value> {
        self.batch.engine().translate(entity, kind, language).await
    }

    /// 翻译实体列表（保持顺序，单个失败被隔离）
    pub async fn translate_entities(
        &self,
        entities: &[Value],
        kind: EntityKind,
        language: TargetLanguage,
    ) -> TranslationResult<Vec<Value>> {
        self.batch.translate_all(entities, kind, language).await
    }

    /// 翻译整个上游响应载荷
    ///
    /// - `{ "items": [...] }` 信封：批量翻译 `items`，其他字段不变
    /// - 顶层数组：批量翻译
    /// - 其他对象：按单个实体翻译
    ///
    /// 对象结果会写入语言标记字段 `lang`。
    pub async fn translate_response(
        &self,
        payload: &Value,
        kind: EntityKind,
        language: TargetLanguage,
    ) -> TranslationResult<Value> {
        let mut translated = match payload {
            Value::Array(items) => Value::Array(self.translate_entities(items, kind, language).await?),
            Value::Object(envelope) => match envelope.get(constants::ITEMS_FIELD) {
                Some(Value::Array(items)) => {
                    let items = self.translate_entities(items, kind, language).await?;
                    let mut envelope = envelope.clone();
                    envelope.insert(constants::ITEMS_FIELD.to_string(), Value::Array(items));
                    Value::Object(envelope)
                }
                _ => self.translate_entity(payload, kind, language).await?,
            },
            _ => payload.clone(),
        };

        if let Value::Object(object) = &mut translated {
            object.insert(
                constants::LANGUAGE_MARKER_FIELD.to_string(),
                Value::String(language.code().to_string()),
            );
        }

        Ok(translated)
    }

    /// 解析字符串形式的实体类型和语言代码后翻译响应
    ///
    /// 供 HTTP 层直接传入查询参数使用；未知的类型或语言代码会返回错误。
    pub async fn translate_response_with_codes(
        &self,
        payload: &Value,
        kind: &str,
        language: &str,
    ) -> TranslationResult<Value> {
        let kind: EntityKind = match kind.parse() {
            Ok(kind) => kind,
            Err(e) => return helpers::log_error(e),
        };
        let language: TargetLanguage = match language.parse() {
            Ok(language) => language,
            Err(e) => return helpers::log_error(e),
        };
        self.translate_response(payload, kind, language).await
    }

    /// 获取统计快照
    pub fn stats(&self) -> ServiceStatsSnapshot {
        let engine = self.batch.engine().get_stats();
        let batch = self.batch.get_stats();

        ServiceStatsSnapshot {
            entities_translated: engine.entities_translated(),
            dictionary_hits: engine.dictionary_hits(),
            dictionary_misses: engine.dictionary_misses(),
            remote_requests: engine.remote_requests(),
            remote_failures: self
                .remote_stats
                .as_ref()
                .map_or(0, |stats| stats.failures()),
            batches_processed: batch.batches_processed(),
            entity_failures: batch.entity_failures(),
        }
    }
}

/// 翻译服务统计数据的不可变快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceStatsSnapshot {
    pub entities_translated: usize,
    pub dictionary_hits: usize,
    pub dictionary_misses: usize,
    /// 交给远程翻译器的字段数
    pub remote_requests: usize,
    /// 降级为原文的远程请求数（仅 HTTP 翻译器统计）
    pub remote_failures: usize,
    pub batches_processed: usize,
    pub entity_failures: usize,
}

impl ServiceStatsSnapshot {
    /// 词典命中率
    pub fn dictionary_hit_rate(&self) -> f64 {
        let total = self.dictionary_hits + self.dictionary_misses;
        if total == 0 {
            0.0
        } else {
            self.dictionary_hits as f64 / total as f64
        }
    }
}
