//! Flag graph and precedence resolution

use super::{FeatureFlags, FlagValue};
use crate::error::{Result, ScaffoldError};

/// One selectable option of a select or multi-select flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub value: &'static str,
    pub hint: &'static str,
}

/// How a flag is asked for and what values it accepts
#[derive(Debug, Clone, Copy)]
pub enum FlagKind {
    Toggle,
    Select(&'static [Choice]),
    MultiSelect(&'static [Choice]),
}

/// Built-in default for a flag
#[derive(Debug, Clone, Copy)]
pub enum Initial {
    Bool(bool),
    Choice(&'static str),
    List(&'static [&'static str]),
}

impl Initial {
    fn value(&self) -> FlagValue {
        match self {
            Initial::Bool(b) => FlagValue::Bool(*b),
            Initial::Choice(c) => FlagValue::Choice(c.to_string()),
            Initial::List(items) => FlagValue::List(items.iter().map(|s| s.to_string()).collect()),
        }
    }
}

/// A requirement on an already-resolved flag
#[derive(Debug, Clone, Copy)]
pub enum Condition {
    Is(&'static str, bool),
    Equals(&'static str, &'static str),
}

impl Condition {
    pub fn flag(&self) -> &'static str {
        match self {
            Condition::Is(flag, _) | Condition::Equals(flag, _) => flag,
        }
    }

    pub fn holds(&self, flags: &FeatureFlags) -> bool {
        match self {
            Condition::Is(flag, expected) => flags.bool(flag) == *expected,
            Condition::Equals(flag, expected) => flags.choice(flag) == Some(*expected),
        }
    }
}

/// A node of the feature graph
#[derive(Debug, Clone)]
pub struct FlagSpec {
    pub name: &'static str,
    pub message: &'static str,
    pub kind: FlagKind,
    pub initial: Initial,
    /// Conditions on earlier flags that must all hold for the prompt to be shown
    pub when: Vec<Condition>,
}

impl FlagSpec {
    pub fn toggle(name: &'static str, message: &'static str, initial: bool) -> Self {
        Self {
            name,
            message,
            kind: FlagKind::Toggle,
            initial: Initial::Bool(initial),
            when: Vec::new(),
        }
    }

    pub fn select(
        name: &'static str,
        message: &'static str,
        choices: &'static [Choice],
        initial: &'static str,
    ) -> Self {
        Self {
            name,
            message,
            kind: FlagKind::Select(choices),
            initial: Initial::Choice(initial),
            when: Vec::new(),
        }
    }

    pub fn multi_select(
        name: &'static str,
        message: &'static str,
        choices: &'static [Choice],
        initial: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            message,
            kind: FlagKind::MultiSelect(choices),
            initial: Initial::List(initial),
            when: Vec::new(),
        }
    }

    /// Only prompt when `condition` holds
    pub fn when(mut self, condition: Condition) -> Self {
        self.when.push(condition);
        self
    }

    pub fn default_value(&self) -> FlagValue {
        self.initial.value()
    }

    /// Whether the prompt makes sense given the flags resolved so far
    pub fn applies(&self, resolved: &FeatureFlags) -> bool {
        self.when.iter().all(|c| c.holds(resolved))
    }

    /// Check that a value fits this flag's kind and declared choices
    pub fn validate(&self, value: FlagValue) -> Result<FlagValue> {
        match self.rejection(&value) {
            Some(reason) => Err(ScaffoldError::InvalidFlag {
                flag: self.name.to_string(),
                reason,
            }),
            None => Ok(value),
        }
    }

    fn rejection(&self, value: &FlagValue) -> Option<String> {
        match (&self.kind, value) {
            (FlagKind::Toggle, FlagValue::Bool(_)) => None,
            (FlagKind::Select(choices), FlagValue::Choice(v)) => unknown_option(choices, [v]),
            (FlagKind::MultiSelect(choices), FlagValue::List(items)) => {
                unknown_option(choices, items).or_else(|| duplicate_option(items))
            }
            (kind, value) => Some(format!("{:?} does not fit a {:?} flag", value, kind)),
        }
    }
}

/// First value outside the declared choices
fn unknown_option<'a>(
    choices: &[Choice],
    values: impl IntoIterator<Item = &'a String>,
) -> Option<String> {
    let value = values
        .into_iter()
        .find(|v| !choices.iter().any(|c| c.value == v.as_str()))?;
    let expected: Vec<&str> = choices.iter().map(|c| c.value).collect();
    Some(format!(
        "unknown option '{}' (expected one of: {})",
        value,
        expected.join(", ")
    ))
}

/// First value that repeats an earlier one
fn duplicate_option(values: &[String]) -> Option<String> {
    values
        .iter()
        .enumerate()
        .find(|&(i, v)| values[..i].contains(v))
        .map(|(_, v)| format!("duplicate option '{}'", v))
}

/// Ordered set of flags for one template
///
/// Conditions may only refer to flags declared earlier in the graph.
#[derive(Debug, Clone)]
pub struct FeatureGraph {
    specs: Vec<FlagSpec>,
}

impl FeatureGraph {
    pub fn new(specs: Vec<FlagSpec>) -> Self {
        debug_assert!(
            Self::conditions_refer_back(&specs),
            "feature graph conditions must refer to earlier flags"
        );
        Self { specs }
    }

    fn conditions_refer_back(specs: &[FlagSpec]) -> bool {
        specs.iter().enumerate().all(|(i, spec)| {
            let declared = |name: &str| specs[..i].iter().any(|s| s.name == name);
            spec.when.iter().all(|c| declared(c.flag()))
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &FlagSpec> {
        self.specs.iter()
    }

    pub fn get(&self, name: &str) -> Option<&FlagSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.specs.iter().map(|s| s.name).collect()
    }
}

/// When prompts are shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PromptPolicy {
    /// An explicit flag only replaces its own prompt
    #[default]
    PerFlag,
    /// Any explicit flag turns off every prompt; unset flags take defaults
    SuppressAllOnExplicit,
    /// Never prompt
    NonInteractive,
}

impl PromptPolicy {
    fn prompting_enabled(&self, explicit: &FeatureFlags) -> bool {
        match self {
            PromptPolicy::PerFlag => true,
            PromptPolicy::SuppressAllOnExplicit => explicit.is_empty(),
            PromptPolicy::NonInteractive => false,
        }
    }
}

/// Source of interactive answers
pub trait Prompter {
    /// Ask for one flag. `Ok(None)` means no answer was given and the default
    /// applies; operator cancellation is `Err(ScaffoldError::OperatorCancelled)`.
    fn ask(
        &mut self,
        spec: &FlagSpec,
        initial: &FlagValue,
        resolved: &FeatureFlags,
    ) -> Result<Option<FlagValue>>;
}

/// Pre-recorded answers, looked up by flag name
#[derive(Debug, Clone, Default)]
pub struct AnswerSheet(pub FeatureFlags);

impl Prompter for AnswerSheet {
    fn ask(
        &mut self,
        spec: &FlagSpec,
        _initial: &FlagValue,
        _resolved: &FeatureFlags,
    ) -> Result<Option<FlagValue>> {
        Ok(self.0.get(spec.name).cloned())
    }
}

/// Combines explicit flags, prompt answers, and defaults
#[derive(Debug, Clone)]
pub struct FeatureResolver {
    graph: FeatureGraph,
    policy: PromptPolicy,
}

impl FeatureResolver {
    pub fn new(graph: FeatureGraph, policy: PromptPolicy) -> Self {
        Self { graph, policy }
    }

    /// Resolve every flag in graph order: explicit value, then prompt answer
    /// (when the policy and the flag's conditions allow), then default.
    pub fn resolve(
        &self,
        explicit: &FeatureFlags,
        prompter: &mut dyn Prompter,
    ) -> Result<FeatureFlags> {
        for (name, _) in explicit.iter() {
            if self.graph.get(name).is_none() {
                return Err(ScaffoldError::InvalidFlag {
                    flag: name.to_string(),
                    reason: format!(
                        "not a feature of this template (expected one of: {})",
                        self.graph.names().join(", ")
                    ),
                });
            }
        }

        let prompting = self.policy.prompting_enabled(explicit);
        let mut resolved = FeatureFlags::new();

        for spec in self.graph.iter() {
            let value = match explicit.get(spec.name) {
                Some(value) => value.clone(),
                None => {
                    let initial = spec.default_value();
                    let answer = if prompting && spec.applies(&resolved) {
                        prompter.ask(spec, &initial, &resolved)?
                    } else {
                        None
                    };
                    answer.unwrap_or(initial)
                }
            };
            resolved.set(spec.name, spec.validate(value)?);
        }

        Ok(resolved)
    }
}

/// Resolve with pre-supplied interactive answers under the per-flag policy
pub fn resolve(
    graph: &FeatureGraph,
    explicit: &FeatureFlags,
    interactive: &FeatureFlags,
) -> Result<FeatureFlags> {
    FeatureResolver::new(graph.clone(), PromptPolicy::PerFlag)
        .resolve(explicit, &mut AnswerSheet(interactive.clone()))
}
