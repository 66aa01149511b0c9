//! 目标语言
//!
//! 调用方传入的语言代码（如 `eng`、`zh`、`cht`）在这里解析为枚举，
//! 并映射到远程翻译服务使用的区域代码。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::translation::error::TranslationError;

/// 翻译目标语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TargetLanguage {
    /// 源语言（英文），翻译是恒等变换
    English,
    /// 简体中文
    SimplifiedChinese,
    /// 繁体中文
    TraditionalChinese,
}

impl TargetLanguage {
    /// 是否为源语言
    ///
    /// 源语言意味着不做任何查询或远程调用，原样返回实体。
    pub fn is_source(self) -> bool {
        matches!(self, TargetLanguage::English)
    }

    /// 是否为中文（任意变体）
    pub fn is_chinese(self) -> bool {
        matches!(
            self,
            TargetLanguage::SimplifiedChinese | TargetLanguage::TraditionalChinese
        )
    }

    /// 面向调用方的规范代码，也用作响应中的语言标记
    pub fn code(self) -> &'static str {
        match self {
            TargetLanguage::English => "eng",
            TargetLanguage::SimplifiedChinese => "zh",
            TargetLanguage::TraditionalChinese => "cht",
        }
    }

    /// 远程翻译服务期望的区域代码
    pub fn remote_locale(self) -> &'static str {
        match self {
            TargetLanguage::English => "en",
            TargetLanguage::SimplifiedChinese => "zh-cn",
            // 服务端区分大小写
            TargetLanguage::TraditionalChinese => "zh-TW",
        }
    }
}

impl FromStr for TargetLanguage {
    type Err = TranslationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "eng" | "en" => Ok(TargetLanguage::English),
            "zh" | "zh-cn" | "chs" | "zh-hans" => Ok(TargetLanguage::SimplifiedChinese),
            "cht" | "zh-tw" | "zh-hant" => Ok(TargetLanguage::TraditionalChinese),
            _ => Err(TranslationError::UnsupportedLanguage(value.to_string())),
        }
    }
}

impl TryFrom<String> for TargetLanguage {
    type Error = TranslationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TargetLanguage> for String {
    fn from(language: TargetLanguage) -> Self {
        language.code().to_string()
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("eng", TargetLanguage::English)]
    #[case("EN", TargetLanguage::English)]
    #[case("zh", TargetLanguage::SimplifiedChinese)]
    #[case("zh-CN", TargetLanguage::SimplifiedChinese)]
    #[case("chs", TargetLanguage::SimplifiedChinese)]
    #[case("cht", TargetLanguage::TraditionalChinese)]
    #[case("zh-tw", TargetLanguage::TraditionalChinese)]
    #[case(" zh-Hant ", TargetLanguage::TraditionalChinese)]
    fn test_parse_aliases(#[case] code: &str, #[case] expected: TargetLanguage) {
        assert_eq!(code.parse::<TargetLanguage>().unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("fr")]
    #[case("zh-xx")]
    fn test_parse_rejects_unknown(#[case] code: &str) {
        let error = code.parse::<TargetLanguage>().unwrap_err();
        assert!(matches!(error, TranslationError::UnsupportedLanguage(_)));
    }

    #[test]
    fn test_remote_locale_mapping() {
        assert_eq!(TargetLanguage::English.remote_locale(), "en");
        assert_eq!(TargetLanguage::SimplifiedChinese.remote_locale(), "zh-cn");
        assert_eq!(TargetLanguage::TraditionalChinese.remote_locale(), "zh-TW");
    }

    #[test]
    fn test_source_and_chinese_flags() {
        assert!(TargetLanguage::English.is_source());
        assert!(!TargetLanguage::English.is_chinese());
        assert!(TargetLanguage::SimplifiedChinese.is_chinese());
        assert!(!TargetLanguage::TraditionalChinese.is_source());
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&TargetLanguage::TraditionalChinese).unwrap();
        assert_eq!(json, "\"cht\"");
        let parsed: TargetLanguage = serde_json::from_str("\"zh-cn\"").unwrap();
        assert_eq!(parsed, TargetLanguage::SimplifiedChinese);
        assert!(serde_json::from_str::<TargetLanguage>("\"de\"").is_err());
    }
}
