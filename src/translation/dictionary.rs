//! 金融术语词典
//!
//! 英文规范术语到中文（繁体）术语的精确匹配映射。词典在启动时构建一次，
//! 之后只读共享；查询不做大小写折叠，也不去除空白。

use std::collections::HashMap;

use crate::translation::language::TargetLanguage;

/// 内置术语表
const FINANCIAL_TERMS: &[(&str, &str)] = &[
    // 公司类型
    ("corporate", "企業"),
    ("municipal", "市政"),
    ("sovereign", "主權"),
    ("supranational", "超國家"),
    // 产业类别
    ("IT equipment", "資訊科技設備"),
    ("Banking", "銀行業"),
    ("Oil & Gas", "石油天然氣"),
    ("Telecommunications", "電信業"),
    ("Utilities", "公用事業"),
    ("Healthcare", "醫療保健"),
    ("Consumer Goods", "消費品"),
    ("Industrial", "工業"),
    ("Real Estate", "房地產"),
    ("Financial Services", "金融服務"),
    // 债券类型
    ("International bonds", "國際債券"),
    ("Corporate bonds", "企業債券"),
    ("Government bonds", "政府債券"),
    ("Municipal bonds", "市政債券"),
    ("Senior Unsecured", "高級無擔保"),
    ("Subordinated", "次級"),
    ("Secured", "有擔保"),
    ("Unsecured", "無擔保"),
    // 状态
    ("outstanding", "流通中"),
    ("matured", "已到期"),
    ("defaulted", "違約"),
    ("cancelled", "已取消"),
    // 国家
    ("USA", "美國"),
    ("China", "中國"),
    ("Japan", "日本"),
    ("Germany", "德國"),
    ("United Kingdom", "英國"),
    ("France", "法國"),
    ("Canada", "加拿大"),
    ("Australia", "澳洲"),
    ("Russia", "俄羅斯"),
    // 货币
    ("USD", "美元"),
    ("EUR", "歐元"),
    ("GBP", "英鎊"),
    ("JPY", "日圓"),
    ("CNY", "人民幣"),
    ("HKD", "港幣"),
    ("TWD", "台幣"),
    // 其他
    ("Not specified", "未指定"),
    ("Public", "公開"),
    ("Private", "私募"),
    ("Open subscription", "公開認購"),
    ("Coupon bonds", "附息債券"),
    ("Zero coupon", "零息債券"),
    ("Floating rate", "浮動利率"),
    ("Fixed rate", "固定利率"),
];

/// 术语词典
///
/// 同一张中文表服务于所有中文变体；目标为源语言时查询永远未命中。
#[derive(Debug, Clone, Default)]
pub struct TermDictionary {
    terms: HashMap<String, String>,
}

impl TermDictionary {
    /// 空词典
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用内置金融术语表构建词典
    pub fn builtin() -> Self {
        Self::new().with_terms(
            FINANCIAL_TERMS
                .iter()
                .map(|(source, target)| (source.to_string(), target.to_string())),
        )
    }

    /// 追加或覆盖术语
    ///
    /// 只在启动阶段使用（例如合并配置文件中的 `[terms]`）。
    pub fn with_terms<I>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.terms.extend(terms);
        self
    }

    /// 查询术语
    ///
    /// 未命中是正常结果，不是错误。
    pub fn lookup(&self, text: &str, language: TargetLanguage) -> Option<&str> {
        if !language.is_chinese() {
            return None;
        }
        self.terms.get(text).map(String::as_str)
    }

    pub fn contains(&self, text: &str) -> bool {
        self.terms.contains_key(text)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
