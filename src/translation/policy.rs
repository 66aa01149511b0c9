//! 字段翻译策略
//!
//! 声明式的白名单：实体类型 → 可翻译字段 → 解析模式。
//! 引擎只读取这张表，调整翻译范围不需要改动引擎逻辑。

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::translation::error::{TranslationError, TranslationResult};

/// 实体类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// 债券发行记录（`get_emissions`）
    BondEmission,
    /// 发行人 / 公司记录（`get_emitents`）
    Issuer,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::BondEmission => "bond-emission",
            EntityKind::Issuer => "issuer",
        }
    }
}

impl FromStr for EntityKind {
    type Err = TranslationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "bond-emission" | "bond_emission" | "bond" | "emission" => Ok(EntityKind::BondEmission),
            "issuer" | "emitent" | "company" => Ok(EntityKind::Issuer),
            _ => Err(TranslationError::UnknownEntityKind(value.to_string())),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 字段解析模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionMode {
    /// 只查词典；未命中保持原值，绝不发送到远程服务
    DictionaryOnly,
    /// 先查词典，未命中再调用远程翻译
    DictionaryThenRemote,
}

impl ResolutionMode {
    pub fn allows_remote(self) -> bool {
        matches!(self, ResolutionMode::DictionaryThenRemote)
    }
}

/// 单个可翻译字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    pub field: String,
    pub mode: ResolutionMode,
}

impl FieldRule {
    pub fn new(field: impl Into<String>, mode: ResolutionMode) -> Self {
        Self {
            field: field.into(),
            mode,
        }
    }

    pub fn dictionary_only(field: impl Into<String>) -> Self {
        Self::new(field, ResolutionMode::DictionaryOnly)
    }

    pub fn dictionary_then_remote(field: impl Into<String>) -> Self {
        Self::new(field, ResolutionMode::DictionaryThenRemote)
    }
}

/// 某一实体类型的有序字段集合
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPolicy {
    rules: Vec<FieldRule>,
}

impl FieldPolicy {
    /// 按声明顺序构建；重复字段只保留第一次声明
    pub fn new(rules: impl IntoIterator<Item = FieldRule>) -> Self {
        let mut policy = Self::default();
        for rule in rules {
            if policy.mode_of(&rule.field).is_none() {
                policy.rules.push(rule);
            }
        }
        policy
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    pub fn mode_of(&self, field: &str) -> Option<ResolutionMode> {
        self.rules
            .iter()
            .find(|rule| rule.field == field)
            .map(|rule| rule.mode)
    }

    pub fn is_eligible(&self, field: &str) -> bool {
        self.mode_of(field).is_some()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// 策略表
#[derive(Debug, Clone, Default)]
pub struct PolicyTable {
    policies: HashMap<EntityKind, FieldPolicy>,
}

impl PolicyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 内置的统一策略表
    ///
    /// 债券的 `kind_name_eng`、`type_name_eng` 不在白名单内，保持英文。
    pub fn builtin() -> Self {
        Self::new()
            .with_policy(
                EntityKind::BondEmission,
                FieldPolicy::new([
                    FieldRule::dictionary_then_remote("emitent_branch_name_eng"),
                    FieldRule::dictionary_only("emitent_type_name_eng"),
                    FieldRule::dictionary_only("emitent_country_name_eng"),
                    FieldRule::dictionary_only("status_name_eng"),
                    FieldRule::dictionary_only("currency_name"),
                    FieldRule::dictionary_only("bond_rank_name_eng"),
                    FieldRule::dictionary_only("coupon_type_name_eng"),
                    FieldRule::dictionary_only("placing_type_name_eng"),
                    FieldRule::dictionary_only("private_offering_name_eng"),
                ]),
            )
            .with_policy(
                EntityKind::Issuer,
                FieldPolicy::new([
                    FieldRule::dictionary_then_remote("branch_name_eng"),
                    FieldRule::dictionary_then_remote("profile_eng"),
                    FieldRule::dictionary_only("country_name_eng"),
                    FieldRule::dictionary_only("type_name_eng"),
                    FieldRule::dictionary_only("reg_form_name_eng"),
                ]),
            )
    }

    pub fn with_policy(mut self, kind: EntityKind, policy: FieldPolicy) -> Self {
        self.policies.insert(kind, policy);
        self
    }

    /// 查询实体类型的字段策略
    ///
    /// 表中没有该类型时返回 `UnknownEntityKind`。
    pub fn fields_for(&self, kind: EntityKind) -> TranslationResult<&FieldPolicy> {
        self.policies
            .get(&kind)
            .ok_or_else(|| TranslationError::UnknownEntityKind(kind.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_parsing() {
        assert_eq!("bond-emission".parse::<EntityKind>().unwrap(), EntityKind::BondEmission);
        assert_eq!("Bond".parse::<EntityKind>().unwrap(), EntityKind::BondEmission);
        assert_eq!("issuer".parse::<EntityKind>().unwrap(), EntityKind::Issuer);
        assert_eq!("emitent".parse::<EntityKind>().unwrap(), EntityKind::Issuer);

        let error = "tradings".parse::<EntityKind>().unwrap_err();
        assert!(matches!(error, TranslationError::UnknownEntityKind(ref kind) if kind == "tradings"));
    }

    #[test]
    fn test_builtin_bond_policy() {
        let table = PolicyTable::builtin();
        let policy = table.fields_for(EntityKind::BondEmission).unwrap();

        assert_eq!(policy.rules()[0].field, "emitent_branch_name_eng");
        assert_eq!(
            policy.mode_of("emitent_branch_name_eng"),
            Some(ResolutionMode::DictionaryThenRemote)
        );
        assert_eq!(policy.mode_of("currency_name"), Some(ResolutionMode::DictionaryOnly));
        assert_eq!(policy.mode_of("status_name_eng"), Some(ResolutionMode::DictionaryOnly));
        assert_eq!(policy.mode_of("bond_rank_name_eng"), Some(ResolutionMode::DictionaryOnly));
        assert_eq!(policy.mode_of("coupon_type_name_eng"), Some(ResolutionMode::DictionaryOnly));
        assert_eq!(policy.mode_of("placing_type_name_eng"), Some(ResolutionMode::DictionaryOnly));
        assert_eq!(
            policy.mode_of("private_offering_name_eng"),
            Some(ResolutionMode::DictionaryOnly)
        );
        assert!(!policy.is_eligible("kind_name_eng"));
        assert!(!policy.is_eligible("type_name_eng"));
        assert_eq!(policy.len(), 9);

        // 只有行业字段允许远程翻译
        let remote: Vec<&str> = policy
            .rules()
            .iter()
            .filter(|rule| rule.mode.allows_remote())
            .map(|rule| rule.field.as_str())
            .collect();
        assert_eq!(remote, ["emitent_branch_name_eng"]);
    }

    #[test]
    fn test_builtin_issuer_policy() {
        let table = PolicyTable::builtin();
        let policy = table.fields_for(EntityKind::Issuer).unwrap();

        assert!(policy.mode_of("profile_eng").unwrap().allows_remote());
        assert!(policy.mode_of("branch_name_eng").unwrap().allows_remote());
        assert!(!policy.mode_of("country_name_eng").unwrap().allows_remote());
        assert_eq!(policy.mode_of("type_name_eng"), Some(ResolutionMode::DictionaryOnly));
        assert_eq!(policy.mode_of("reg_form_name_eng"), Some(ResolutionMode::DictionaryOnly));
        assert_eq!(policy.len(), 5);
    }

    #[test]
    fn test_missing_kind_fails_loudly() {
        let table = PolicyTable::new().with_policy(EntityKind::Issuer, FieldPolicy::default());
        let error = table.fields_for(EntityKind::BondEmission).unwrap_err();
        assert!(matches!(error, TranslationError::UnknownEntityKind(_)));
        assert!(table.fields_for(EntityKind::Issuer).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_fields_keep_first_declaration() {
        let policy = FieldPolicy::new([
            FieldRule::dictionary_only("currency_name"),
            FieldRule::dictionary_then_remote("currency_name"),
        ]);
        assert_eq!(policy.len(), 1);
        assert_eq!(policy.mode_of("currency_name"), Some(ResolutionMode::DictionaryOnly));
    }
}
