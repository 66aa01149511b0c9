// 集成测试公共模块
//
// 提供测试辅助工具和共享功能

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use bond_gateway::translation::{
    BatchConfig, PolicyTable, RemoteTranslator, TargetLanguage, TermDictionary,
    TranslationService,
};

/// 可观测的模拟远程翻译器
///
/// 记录调用次数、调用文本和同时进行中的调用峰值。
#[derive(Default)]
pub struct MockTranslator {
    translations: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    default_delay: Duration,
    failing: bool,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl MockTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 远程服务不可用：按约定返回原文
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn with_translation(mut self, source: &str, target: &str) -> Self {
        self.translations.insert(source.to_string(), target.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.default_delay = delay;
        self
    }

    /// 为指定文本设置单独的延迟
    pub fn with_delay_for(mut self, text: &str, delay: Duration) -> Self {
        self.delays.insert(text.to_string(), delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteTranslator for MockTranslator {
    async fn translate(&self, text: &str, language: TargetLanguage) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(text.to_string());

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);

        let delay = self.delays.get(text).copied().unwrap_or(self.default_delay);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing {
            return text.to_string();
        }
        match self.translations.get(text) {
            Some(translated) => translated.clone(),
            None => format!("[{}] {}", language.remote_locale(), text),
        }
    }
}

/// 测试环境：服务加上可观测的模拟翻译器
pub struct TestEnvironment {
    pub service: TranslationService,
    pub remote: Arc<MockTranslator>,
}

impl TestEnvironment {
    pub fn new(remote: MockTranslator) -> Self {
        Self::with_batch_config(remote, BatchConfig::default())
    }

    pub fn with_batch_config(remote: MockTranslator, batch_config: BatchConfig) -> Self {
        Self::with_parts(remote, PolicyTable::builtin(), batch_config)
    }

    pub fn with_parts(
        remote: MockTranslator,
        policies: PolicyTable,
        batch_config: BatchConfig,
    ) -> Self {
        let remote = Arc::new(remote);
        let service = TranslationService::from_parts(
            TermDictionary::builtin(),
            policies,
            remote.clone(),
            batch_config,
        );
        Self { service, remote }
    }

    pub fn default() -> Self {
        Self::new(MockTranslator::new())
    }
}

/// 测试数据生成器
pub struct TestDataGenerator;

impl TestDataGenerator {
    /// 一条典型的债券发行记录
    pub fn bond_emission(branch: &str) -> Value {
        json!({
            "id": 1042,
            "isin_code": "US912828ZT58",
            "emitent_branch_name_eng": branch,
            "emitent_type_name_eng": "corporate",
            "emitent_country_name_eng": "USA",
            "status_name_eng": "outstanding",
            "currency_name": "USD",
            "kind_name_eng": "International bonds",
            "type_name_eng": "Coupon bonds"
        })
    }

    /// 一条典型的发行人记录
    pub fn issuer(branch: &str, profile: &str) -> Value {
        json!({
            "id": 77,
            "name_eng": "Example Holdings",
            "branch_name_eng": branch,
            "profile_eng": profile,
            "country_name_eng": "Japan"
        })
    }

    /// 产业字段各不相同的债券记录
    pub fn bond_emissions(branches: &[&str]) -> Vec<Value> {
        branches
            .iter()
            .enumerate()
            .map(|(index, branch)| {
                let mut entity = Self::bond_emission(branch);
                entity["id"] = json!(index);
                entity
            })
            .collect()
    }

    /// Cbonds 风格的响应信封
    pub fn envelope(items: Vec<Value>) -> Value {
        let count = items.len();
        json!({
            "count": count,
            "total": count,
            "limit": 10,
            "offset": 0,
            "items": items
        })
    }
}

/// 断言辅助工具
pub struct AssertionHelper;

impl AssertionHelper {
    /// 断言除指定字段外，两个对象的其余字段完全相同
    pub fn assert_unchanged_except(original: &Value, translated: &Value, fields: &[&str]) {
        let original = original.as_object().expect("original should be an object");
        let translated = translated.as_object().expect("translated should be an object");

        assert_eq!(
            original.keys().collect::<Vec<_>>(),
            translated.keys().collect::<Vec<_>>(),
            "field set and order should be preserved"
        );

        for (key, value) in original {
            if fields.contains(&key.as_str()) {
                continue;
            }
            assert_eq!(&translated[key], value, "field {} should be unchanged", key);
        }
    }
}
