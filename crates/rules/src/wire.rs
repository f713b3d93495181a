//! YAML wire format for rule catalogs.
//!
//! Responsibilities:
//! - Define a strict wire model (`deny_unknown_fields`) for catalog files
//! - Translate between wire structs and the rule domain types
//! - Report schema mismatches with the path of the failing field
//!
//! Catalog validation is not done here; callers pass the translated rules to
//! [`RuleCatalog::new`](crate::RuleCatalog::new).

use crate::rule::{Effects, MatchClause, Rule, RuleKind};
use crate::{RulesError, RulesResult};
use serde::{Deserialize, Serialize};
use triage_types::{Symptom, UrgencyFlag};

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
struct CatalogWire {
    rules: Vec<RuleWire>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
struct RuleWire {
    id: String,
    description: String,
    #[serde(default, skip_serializing_if = "is_false")]
    fallback: bool,
    #[serde(rename = "match", default)]
    match_clause: MatchWire,
    #[serde(default)]
    effects: EffectsWire,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
struct MatchWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    any_symptoms: Option<Vec<Symptom>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    all_symptoms: Option<Vec<Symptom>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min_temp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_temp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min_duration_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_duration_days: Option<u32>,
    #[serde(default, skip_serializing_if = "is_false")]
    requires_temperature: bool,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
struct EffectsWire {
    #[serde(default)]
    severity_delta: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    flags: Vec<UrgencyFlag>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

// ============================================================================
// Translation
// ============================================================================

/// Parse catalog YAML into rules, in file order.
pub(crate) fn parse(yaml_text: &str) -> RulesResult<Vec<Rule>> {
    let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

    let wire = match serde_path_to_error::deserialize::<_, CatalogWire>(deserializer) {
        Ok(parsed) => parsed,
        Err(err) => {
            let path = err.path().to_string();
            let source = err.into_inner();
            let path = if path.is_empty() || path == "." {
                "<root>"
            } else {
                path.as_str()
            };
            return Err(RulesError::Translation(format!(
                "Rule catalog schema mismatch at {path}: {source}"
            )));
        }
    };

    Ok(wire.rules.into_iter().map(wire_to_domain).collect())
}

/// Render rules as catalog YAML.
pub(crate) fn render(rules: &[Rule]) -> RulesResult<String> {
    let wire = CatalogWire {
        rules: rules.iter().map(domain_to_wire).collect(),
    };
    serde_yaml::to_string(&wire)
        .map_err(|e| RulesError::Translation(format!("Failed to serialize rule catalog: {e}")))
}

/// A rule whose only clause is an empty `any_symptoms` set is the fallback, with or without
/// `fallback: true`.
fn wire_to_domain(wire: RuleWire) -> Rule {
    let m = wire.match_clause;
    let match_clause = MatchClause {
        any_symptoms: m.any_symptoms,
        all_symptoms: m.all_symptoms,
        min_temp: m.min_temp,
        max_temp: m.max_temp,
        min_duration_days: m.min_duration_days,
        max_duration_days: m.max_duration_days,
        requires_temperature: m.requires_temperature,
    };
    let kind = if wire.fallback || match_clause.is_fallback_marker() {
        RuleKind::Fallback
    } else {
        RuleKind::Standard
    };

    Rule {
        id: wire.id,
        description: wire.description,
        kind,
        match_clause,
        effects: Effects {
            severity_delta: wire.effects.severity_delta,
            suggestions: wire.effects.suggestions,
            flags: wire.effects.flags,
        },
    }
}

fn domain_to_wire(rule: &Rule) -> RuleWire {
    let m = &rule.match_clause;
    RuleWire {
        id: rule.id.clone(),
        description: rule.description.clone(),
        fallback: rule.is_fallback(),
        match_clause: MatchWire {
            any_symptoms: m.any_symptoms.clone(),
            all_symptoms: m.all_symptoms.clone(),
            min_temp: m.min_temp,
            max_temp: m.max_temp,
            min_duration_days: m.min_duration_days,
            max_duration_days: m.max_duration_days,
            requires_temperature: m.requires_temperature,
        },
        effects: EffectsWire {
            severity_delta: rule.effects.severity_delta,
            suggestions: rule.effects.suggestions.clone(),
            flags: rule.effects.flags.clone(),
        },
    }
}
