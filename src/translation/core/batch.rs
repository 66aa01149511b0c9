//! 批量实体翻译
//!
//! 对一组实体逐个调用翻译引擎：
//! - 输出顺序与输入一致（按位置收集结果，而不是按完成顺序）
//! - 信号量限制同时翻译的实体数，避免压垮远程翻译服务
//! - 单个实体失败时用其原值替代，整个批次仍然成功
//! - 实体之间不去重，每个实体独立解析

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use serde_json::Value;
use tokio::sync::Semaphore;

use crate::translation::{
    config::{constants, TranslationConfig},
    core::engine::TranslationEngine,
    error::{TranslationError, TranslationResult},
    language::TargetLanguage,
    policy::EntityKind,
};

/// 批处理配置
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// 同时翻译的实体上限
    pub max_concurrent_entities: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrent_entities: constants::DEFAULT_MAX_CONCURRENT_ENTITIES,
        }
    }
}

impl From<&TranslationConfig> for BatchConfig {
    fn from(config: &TranslationConfig) -> Self {
        Self {
            max_concurrent_entities: config.max_concurrent_entities.max(1),
        }
    }
}

/// 批量翻译器
pub struct BatchTranslator {
    engine: Arc<TranslationEngine>,
    semaphore: Arc<Semaphore>,
    config: BatchConfig,
    stats: BatchStats,
}

impl BatchTranslator {
    pub fn new(engine: Arc<TranslationEngine>, config: BatchConfig) -> Self {
        let permits = config.max_concurrent_entities.max(1);
        Self {
            engine,
            semaphore: Arc::new(Semaphore::new(permits)),
            config,
            stats: BatchStats::default(),
        }
    }

    /// 翻译一组实体
    ///
    /// 只有调用方错误（未知实体类型）会让整个调用失败，而且在任何翻译开始前就返回。
    pub async fn translate_all(
        &self,
        entities: &[Value],
        kind: EntityKind,
        language: TargetLanguage,
    ) -> TranslationResult<Vec<Value>> {
        if language.is_source() {
            return Ok(entities.to_vec());
        }

        self.engine.policies().fields_for(kind)?;

        if entities.is_empty() {
            return Ok(Vec::new());
        }

        let start_time = Instant::now();
        tracing::debug!(
            "开始批量翻译 {} 个 {} 实体，并发上限 {}",
            entities.len(),
            kind,
            self.config.max_concurrent_entities
        );

        let tasks = entities
            .iter()
            .enumerate()
            .map(|(index, entity)| self.translate_isolated(index, entity, kind, language));
        let results = join_all(tasks).await;

        let mut output = Vec::with_capacity(results.len());
        let mut failed = 0;
        for result in results {
            let (value, isolated) = result?;
            if isolated {
                failed += 1;
            }
            output.push(value);
        }

        self.stats.batches_processed.fetch_add(1, Ordering::Relaxed);
        tracing::info!(
            "批量翻译完成: {} 个实体，隔离失败 {}，耗时 {:?}",
            output.len(),
            failed,
            start_time.elapsed()
        );

        Ok(output)
    }

    /// 翻译单个实体，失败时返回原值
    ///
    /// 第二个返回值表示是否发生了隔离失败；调用方错误仍然向上传播。
    async fn translate_isolated(
        &self,
        index: usize,
        entity: &Value,
        kind: EntityKind,
        language: TargetLanguage,
    ) -> TranslationResult<(Value, bool)> {
        let _permit = self.semaphore.acquire().await.map_err(|e| {
            TranslationError::InternalError(format!("获取并发许可失败: {}", e))
        })?;

        match self.engine.translate(entity, kind, language).await {
            Ok(translated) => Ok((translated, false)),
            Err(e) if e.is_caller_error() => Err(e),
            Err(e) => {
                self.stats.entity_failures.fetch_add(1, Ordering::Relaxed);
                let e = e.with_context(format!("实体 {}", index));
                tracing::warn!("翻译失败，保留原值: {}", e);
                Ok((entity.clone(), true))
            }
        }
    }

    pub fn engine(&self) -> &Arc<TranslationEngine> {
        &self.engine
    }

    pub fn get_stats(&self) -> &BatchStats {
        &self.stats
    }
}

/// 批处理统计信息
#[derive(Debug, Default)]
pub struct BatchStats {
    pub batches_processed: AtomicUsize,
    /// 被原值替代的实体数
    pub entity_failures: AtomicUsize,
}

impl BatchStats {
    pub fn batches_processed(&self) -> usize {
        self.batches_processed.load(Ordering::Relaxed)
    }

    pub fn entity_failures(&self) -> usize {
        self.entity_failures.load(Ordering::Relaxed)
    }
}
