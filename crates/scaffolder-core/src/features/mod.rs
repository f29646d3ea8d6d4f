//! Feature flags and their resolution
//!
//! A template declares its features as a [`FeatureGraph`]: an ordered set of
//! flags, each with a prompt, a default, and the conditions on earlier flags
//! under which it is worth asking about. [`FeatureResolver`] combines explicit
//! command-line values, prompt answers, and defaults into [`FeatureFlags`].

pub mod resolver;

use std::collections::BTreeMap;

pub use resolver::{
    resolve, AnswerSheet, Choice, Condition, FeatureGraph, FeatureResolver, FlagKind, FlagSpec,
    Initial, PromptPolicy, Prompter,
};

/// A resolved value for one flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    Bool(bool),
    Choice(String),
    List(Vec<String>),
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        FlagValue::Bool(value)
    }
}

impl From<&str> for FlagValue {
    fn from(value: &str) -> Self {
        FlagValue::Choice(value.to_string())
    }
}

impl From<String> for FlagValue {
    fn from(value: String) -> Self {
        FlagValue::Choice(value)
    }
}

impl From<Vec<String>> for FlagValue {
    fn from(value: Vec<String>) -> Self {
        FlagValue::List(value)
    }
}

/// Flag name to value mapping
///
/// Accessors return the type's zero value (`false`, `None`, empty list) for
/// flags that are absent or hold a different kind of value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    values: BTreeMap<String, FlagValue>,
}

impl FeatureFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FlagValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder-style [`FeatureFlags::set`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FlagValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FlagValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlagValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn bool(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(FlagValue::Bool(true)))
    }

    pub fn choice(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(FlagValue::Choice(value)) => Some(value),
            _ => None,
        }
    }

    pub fn list(&self, name: &str) -> &[String] {
        match self.values.get(name) {
            Some(FlagValue::List(values)) => values,
            _ => &[],
        }
    }
}

impl<K: Into<String>, V: Into<FlagValue>> FromIterator<(K, V)> for FeatureFlags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut flags = FeatureFlags::new();
        for (name, value) in iter {
            flags.set(name, value);
        }
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_fall_back_to_zero_values() {
        let flags = FeatureFlags::new().with("router", true);
        assert!(flags.bool("router"));
        assert!(!flags.bool("ssr"));
        assert_eq!(flags.choice("slui-preset"), None);
        assert!(flags.list("slui-features").is_empty());
    }

    #[test]
    fn test_mismatched_kind_reads_as_zero() {
        let flags = FeatureFlags::new().with("router", "yes");
        assert!(!flags.bool("router"));
        assert_eq!(flags.choice("router"), Some("yes"));
    }

    #[test]
    fn test_collect_from_pairs() {
        let flags: FeatureFlags = [("core", true), ("vitest", false)].into_iter().collect();
        assert_eq!(flags.len(), 2);
        assert!(flags.bool("core"));
        assert!(flags.contains("vitest"));
    }
}
