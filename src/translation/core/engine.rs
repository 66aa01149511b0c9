//! 翻译引擎核心实现
//!
//! 对单个实体按字段策略逐字段解析：
//!
//! 1. 目标语言为源语言时直接返回副本，不做任何查询
//! 2. 查询实体类型的字段策略（未知类型立即报错）
//! 3. 每个可翻译字段先查词典，命中即写入，不再调用远程服务
//! 4. 未命中且允许远程的字段并发调用远程翻译，全部完成后才返回
//!
//! 输入实体永远不会被修改，返回的是同结构的新实体。

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::future::join_all;
use serde_json::Value;

use crate::translation::{
    dictionary::TermDictionary,
    error::{helpers, TranslationResult},
    language::TargetLanguage,
    policy::{EntityKind, PolicyTable},
    remote::RemoteTranslator,
};

/// 翻译引擎
///
/// 所有依赖都是只读的，通过 `Arc` 共享，因此引擎可以被多个批次并发使用。
pub struct TranslationEngine {
    dictionary: Arc<TermDictionary>,
    policies: Arc<PolicyTable>,
    remote: Arc<dyn RemoteTranslator>,
    stats: EngineStats,
}

impl TranslationEngine {
    pub fn new(
        dictionary: Arc<TermDictionary>,
        policies: Arc<PolicyTable>,
        remote: Arc<dyn RemoteTranslator>,
    ) -> Self {
        Self {
            dictionary,
            policies,
            remote,
            stats: EngineStats::default(),
        }
    }

    /// 翻译单个实体
    ///
    /// # 错误
    /// - `UnknownEntityKind`: 策略表中没有该实体类型
    /// - `InvalidInput`: 实体不是 JSON 对象
    pub async fn translate(
        &self,
        entity: &Value,
        kind: EntityKind,
        language: TargetLanguage,
    ) -> TranslationResult<Value> {
        if language.is_source() {
            return Ok(entity.clone());
        }

        let policy = self.policies.fields_for(kind)?;
        let source = entity.as_object().ok_or_else(|| {
            helpers::validation_error(format!(
                "{} 实体必须是JSON对象，实际为 {}",
                kind,
                json_type_name(entity)
            ))
        })?;

        let mut translated = source.clone();
        let mut pending: Vec<(&str, &str)> = Vec::new();

        for rule in policy.rules() {
            let text = match source.get(&rule.field) {
                Some(Value::String(text)) if !text.is_empty() => text.as_str(),
                _ => continue,
            };

            if let Some(term) = self.dictionary.lookup(text, language) {
                self.stats.dictionary_hits.fetch_add(1, Ordering::Relaxed);
                translated.insert(rule.field.clone(), Value::String(term.to_string()));
                continue;
            }

            self.stats.dictionary_misses.fetch_add(1, Ordering::Relaxed);
            if rule.mode.allows_remote() {
                pending.push((rule.field.as_str(), text));
            } else {
                tracing::debug!("词典未命中，字段 {} 保留原文", rule.field);
            }
        }

        if !pending.is_empty() {
            self.stats
                .remote_requests
                .fetch_add(pending.len(), Ordering::Relaxed);
            tracing::debug!("{} 实体有 {} 个字段需要远程翻译", kind, pending.len());

            let results = join_all(
                pending
                    .iter()
                    .map(|(_, text)| self.remote.translate(text, language)),
            )
            .await;

            for ((field, _), value) in pending.into_iter().zip(results) {
                translated.insert(field.to_string(), Value::String(value));
            }
        }

        self.stats.entities_translated.fetch_add(1, Ordering::Relaxed);
        Ok(Value::Object(translated))
    }

    pub fn policies(&self) -> &PolicyTable {
        &self.policies
    }

    pub fn dictionary(&self) -> &TermDictionary {
        &self.dictionary
    }

    pub fn get_stats(&self) -> &EngineStats {
        &self.stats
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// 翻译引擎统计信息（线程安全版本）
#[derive(Debug, Default)]
pub struct EngineStats {
    /// 完成翻译的实体数（不含源语言快速路径）
    pub entities_translated: AtomicUsize,
    pub dictionary_hits: AtomicUsize,
    pub dictionary_misses: AtomicUsize,
    /// 交给远程翻译器的字段数
    pub remote_requests: AtomicUsize,
}

impl EngineStats {
    pub fn entities_translated(&self) -> usize {
        self.entities_translated.load(Ordering::Relaxed)
    }

    pub fn dictionary_hits(&self) -> usize {
        self.dictionary_hits.load(Ordering::Relaxed)
    }

    pub fn dictionary_misses(&self) -> usize {
        self.dictionary_misses.load(Ordering::Relaxed)
    }

    pub fn remote_requests(&self) -> usize {
        self.remote_requests.load(Ordering::Relaxed)
    }
}
