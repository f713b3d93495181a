//! # Triage Rules
//!
//! The rule catalog: an ordered, immutable list of declarative triage rules.
//!
//! This crate is policy data, not engine logic:
//! - domain types for rules, match clauses and effects
//! - catalog construction with validation of the rule shape
//! - the standard triage policy
//! - a strict YAML wire format so policy can be edited without recompiling
//!
//! Matching a rule against a symptom record lives in `triage-core`.

pub mod catalog;
pub mod rule;
pub mod standard;
mod wire;

pub use catalog::RuleCatalog;
pub use rule::{Effects, MatchClause, Rule, RuleKind};
pub use standard::FALLBACK_RULE_ID;

/// Errors returned while building or loading a rule catalog.
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("translation error: {0}")]
    Translation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("rule catalog is empty")]
    EmptyCatalog,

    #[error("invalid rule '{id}': {reason}")]
    InvalidRule { id: String, reason: String },

    #[error("duplicate rule id: {0}")]
    DuplicateRuleId(String),

    #[error("rule catalog has no fallback rule")]
    MissingFallback,

    #[error("rule catalog has more than one fallback rule: {0:?}")]
    MultipleFallbacks(Vec<String>),

    #[error("fallback rule '{0}' must match with an empty any_symptoms set and nothing else")]
    ConstrainedFallback(String),

    #[error("rule '{0}' matches every input; only the fallback rule may")]
    UnconstrainedRule(String),
}

/// Type alias for Results that can fail with a [`RulesError`].
pub type RulesResult<T> = Result<T, RulesError>;
