//! Rule domain types.
//!
//! A [`Rule`] pairs a [`MatchClause`] (the predicate) with [`Effects`] (what it contributes to an
//! assessment when the predicate holds). All clause fields are optional; an absent clause imposes
//! no constraint.

use triage_types::{Symptom, UrgencyFlag};

/// Whether a rule is evaluated normally or acts as the catalog's fallback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RuleKind {
    #[default]
    Standard,
    /// Contributes only when no earlier rule has produced a suggestion.
    Fallback,
}

/// Predicate half of a rule.
///
/// Every clause that is present must hold. Temperature bounds are only checked when a
/// temperature was measured; they are skipped, not failed, otherwise.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatchClause {
    /// At least one of these must be reported. Empty means no constraint.
    pub any_symptoms: Option<Vec<Symptom>>,
    /// All of these must be reported. Empty means no constraint.
    pub all_symptoms: Option<Vec<Symptom>>,
    /// Inclusive lower bound in degrees Celsius.
    pub min_temp: Option<f64>,
    /// Inclusive upper bound in degrees Celsius.
    pub max_temp: Option<f64>,
    pub min_duration_days: Option<u32>,
    pub max_duration_days: Option<u32>,
    /// Only holds when a temperature was measured.
    pub requires_temperature: bool,
}

impl MatchClause {
    /// The vacuous clause used by the fallback rule: an empty `any_symptoms` set and nothing else.
    pub fn unconstrained() -> Self {
        Self {
            any_symptoms: Some(Vec::new()),
            ..Self::default()
        }
    }

    pub fn any_of(symptoms: impl Into<Vec<Symptom>>) -> Self {
        Self {
            any_symptoms: Some(symptoms.into()),
            ..Self::default()
        }
    }

    pub fn all_of(symptoms: impl Into<Vec<Symptom>>) -> Self {
        Self {
            all_symptoms: Some(symptoms.into()),
            ..Self::default()
        }
    }

    pub fn with_min_temp(mut self, celsius: f64) -> Self {
        self.min_temp = Some(celsius);
        self
    }

    pub fn with_max_temp(mut self, celsius: f64) -> Self {
        self.max_temp = Some(celsius);
        self
    }

    pub fn with_min_duration_days(mut self, days: u32) -> Self {
        self.min_duration_days = Some(days);
        self
    }

    pub fn with_max_duration_days(mut self, days: u32) -> Self {
        self.max_duration_days = Some(days);
        self
    }

    pub fn requiring_temperature(mut self) -> Self {
        self.requires_temperature = true;
        self
    }

    /// Returns true when no clause can reject an input.
    pub fn is_unconstrained(&self) -> bool {
        let empty = |set: &Option<Vec<Symptom>>| set.as_ref().map_or(true, Vec::is_empty);

        empty(&self.any_symptoms)
            && empty(&self.all_symptoms)
            && self.min_temp.is_none()
            && self.max_temp.is_none()
            && self.min_duration_days.is_none()
            && self.max_duration_days.is_none()
            && !self.requires_temperature
    }

    /// Returns true for the fallback's marker clause: an empty `any_symptoms` set and no other
    /// clause.
    pub fn is_fallback_marker(&self) -> bool {
        *self == Self::unconstrained()
    }
}

/// Effect half of a rule, folded into the running assessment when the rule fires.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Effects {
    pub severity_delta: f64,
    pub suggestions: Vec<String>,
    pub flags: Vec<UrgencyFlag>,
}

impl Effects {
    pub fn new(severity_delta: f64) -> Self {
        Self {
            severity_delta,
            ..Self::default()
        }
    }

    pub fn suggest<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestions.extend(suggestions.into_iter().map(Into::into));
        self
    }

    pub fn flag(mut self, flag: UrgencyFlag) -> Self {
        self.flags.push(flag);
        self
    }
}

/// One piece of triage policy.
#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    pub id: String,
    pub description: String,
    pub kind: RuleKind,
    pub match_clause: MatchClause,
    pub effects: Effects,
}

impl Rule {
    pub fn standard(
        id: impl Into<String>,
        description: impl Into<String>,
        match_clause: MatchClause,
        effects: Effects,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            kind: RuleKind::Standard,
            match_clause,
            effects,
        }
    }

    pub fn fallback(id: impl Into<String>, description: impl Into<String>, effects: Effects) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            kind: RuleKind::Fallback,
            match_clause: MatchClause::unconstrained(),
            effects,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.kind == RuleKind::Fallback
    }
}
