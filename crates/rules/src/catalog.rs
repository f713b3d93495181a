//! The ordered, immutable rule catalog.
//!
//! A catalog is built once at process start and shared read-only afterwards (typically behind an
//! `Arc`). Validation happens here, at construction time, so evaluation never has to deal with a
//! malformed rule.

use crate::rule::{MatchClause, Rule};
use crate::{standard, wire, RulesError, RulesResult};
use std::collections::HashSet;
use std::path::Path;

/// Ordered collection of triage rules containing exactly one fallback rule.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleCatalog {
    rules: Vec<Rule>,
}

impl RuleCatalog {
    /// Validate `rules` and build a catalog that preserves their order.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError`] if:
    /// - `rules` is empty,
    /// - a rule has an empty id or description, or an empty suggestion,
    /// - two rules share an id,
    /// - a numeric bound or severity delta is not finite, or a min bound exceeds its max,
    /// - there is not exactly one fallback rule, or the fallback's match is anything other than
    ///   an empty `any_symptoms` set,
    /// - a standard rule has a match clause that accepts every input.
    pub fn new(rules: Vec<Rule>) -> RulesResult<Self> {
        if rules.is_empty() {
            return Err(RulesError::EmptyCatalog);
        }

        let mut seen = HashSet::new();
        for rule in &rules {
            validate_rule(rule)?;
            if !rule.is_fallback() && rule.match_clause.is_unconstrained() {
                return Err(RulesError::UnconstrainedRule(rule.id.clone()));
            }
            if !seen.insert(rule.id.as_str()) {
                return Err(RulesError::DuplicateRuleId(rule.id.clone()));
            }
        }

        let fallbacks: Vec<&Rule> = rules.iter().filter(|r| r.is_fallback()).collect();
        match fallbacks.as_slice() {
            [] => return Err(RulesError::MissingFallback),
            [fallback] => {
                if !fallback.match_clause.is_fallback_marker() {
                    return Err(RulesError::ConstrainedFallback(fallback.id.clone()));
                }
            }
            many => {
                return Err(RulesError::MultipleFallbacks(
                    many.iter().map(|r| r.id.clone()).collect(),
                ))
            }
        }

        Ok(Self { rules })
    }

    /// The built-in triage policy.
    pub fn standard() -> Self {
        // Checked by the standard module's tests; no need to re-validate on every start.
        Self {
            rules: standard::rules(),
        }
    }

    /// Parse and validate a catalog from its YAML wire form.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::Translation`] naming the failing path when the YAML does not match
    /// the wire schema, or any validation error from [`RuleCatalog::new`].
    pub fn parse_yaml(yaml_text: &str) -> RulesResult<Self> {
        Self::new(wire::parse(yaml_text)?)
    }

    /// Render the catalog as YAML. Parsing the output yields an equal catalog.
    pub fn render_yaml(&self) -> RulesResult<String> {
        wire::render(&self.rules)
    }

    /// Read a YAML catalog from disk.
    pub fn load(path: &Path) -> RulesResult<Self> {
        let yaml_text = std::fs::read_to_string(path)?;
        let catalog = Self::parse_yaml(&yaml_text)?;
        tracing::info!(
            "loaded {} triage rules from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// The catalog's single fallback rule.
    pub fn fallback(&self) -> Option<&Rule> {
        self.rules.iter().find(|r| r.is_fallback())
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> IntoIterator for &'a RuleCatalog {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

fn validate_rule(rule: &Rule) -> RulesResult<()> {
    let invalid = |reason: &str| RulesError::InvalidRule {
        id: rule.id.clone(),
        reason: reason.to_string(),
    };

    if rule.id.trim().is_empty() {
        return Err(invalid("id cannot be empty"));
    }
    if rule.description.trim().is_empty() {
        return Err(invalid("description cannot be empty"));
    }
    if !rule.effects.severity_delta.is_finite() {
        return Err(invalid("severity_delta must be a finite number"));
    }
    if rule.effects.suggestions.iter().any(|s| s.trim().is_empty()) {
        return Err(invalid("suggestions cannot be empty strings"));
    }

    validate_bounds(&rule.match_clause).map_err(invalid)
}

fn validate_bounds(clause: &MatchClause) -> Result<(), &'static str> {
    for temp in [clause.min_temp, clause.max_temp].into_iter().flatten() {
        if !temp.is_finite() {
            return Err("temperature bounds must be finite numbers");
        }
    }
    if let (Some(min), Some(max)) = (clause.min_temp, clause.max_temp) {
        if min > max {
            return Err("min_temp is greater than max_temp");
        }
    }
    if let (Some(min), Some(max)) = (clause.min_duration_days, clause.max_duration_days) {
        if min > max {
            return Err("min_duration_days is greater than max_duration_days");
        }
    }
    Ok(())
}
