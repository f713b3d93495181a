//! Filtering, searching and sorting of stored symptom logs.

use crate::log::SymptomLog;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use triage_types::{Symptom, UrgencyFlag};

/// Field a log listing is ordered by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    CreatedAt,
    SeverityScore,
    DurationDays,
    Temperature,
}

impl SortField {
    /// Name used in query strings and stored records.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "createdAt",
            SortField::SeverityScore => "severity_score",
            SortField::DurationDays => "durationDays",
            SortField::Temperature => "temperature",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "createdAt" | "created_at" => Ok(SortField::CreatedAt),
            "severity_score" | "severityScore" => Ok(SortField::SeverityScore),
            "durationDays" | "duration_days" => Ok(SortField::DurationDays),
            "temperature" => Ok(SortField::Temperature),
            other => Err(format!("unsupported sort field: {other}")),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortOrder::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortOrder::Desc)
        } else {
            Err(format!("unsupported sort order: {s}"))
        }
    }
}

/// Which stored logs to return, and in what order.
///
/// Every populated criterion must hold. `symptoms` and `flags` match a log carrying any of the
/// listed values. Bounds are inclusive.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LogQuery {
    pub patient_id: Option<String>,
    /// Case-insensitive text matched against patient, symptoms, notes, next steps and flags.
    pub search: Option<String>,
    pub severity_min: Option<u8>,
    pub severity_max: Option<u8>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub symptoms: Vec<Symptom>,
    pub flags: Vec<UrgencyFlag>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl LogQuery {
    /// All logs of one patient, newest first.
    pub fn for_patient(patient_id: impl Into<String>) -> Self {
        Self {
            patient_id: Some(patient_id.into()),
            ..Self::default()
        }
    }

    pub fn matches(&self, log: &SymptomLog) -> bool {
        if let Some(patient_id) = &self.patient_id {
            if log.patient_id.as_str() != patient_id {
                return false;
            }
        }

        let score = log.assessment.severity_score;
        if self.severity_min.is_some_and(|min| score < min)
            || self.severity_max.is_some_and(|max| score > max)
        {
            return false;
        }

        if self.date_from.is_some_and(|from| log.created_at < from)
            || self.date_to.is_some_and(|to| log.created_at > to)
        {
            return false;
        }

        if !self.symptoms.is_empty() && !self.symptoms.iter().any(|s| log.symptoms.contains(s)) {
            return false;
        }

        if !self.flags.is_empty() && !self.flags.iter().any(|f| log.assessment.flags.contains(f)) {
            return false;
        }

        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => search_matches(log, &needle.to_lowercase()),
            _ => true,
        }
    }

    /// Keep the matching logs and order them.
    pub fn apply(&self, logs: Vec<SymptomLog>) -> Vec<SymptomLog> {
        let mut selected: Vec<SymptomLog> = logs.into_iter().filter(|l| self.matches(l)).collect();
        selected.sort_by(|a, b| self.compare(a, b));
        selected
    }

    fn compare(&self, a: &SymptomLog, b: &SymptomLog) -> Ordering {
        let ordering = match self.sort_by {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::SeverityScore => a
                .assessment
                .severity_score
                .cmp(&b.assessment.severity_score),
            SortField::DurationDays => a.duration_days.cmp(&b.duration_days),
            SortField::Temperature => compare_temperature(a.temperature, b.temperature),
        };

        match self.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Unmeasured temperatures sort below every reading.
fn compare_temperature(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
    }
}

fn search_matches(log: &SymptomLog, needle: &str) -> bool {
    let contains = |haystack: &str| haystack.to_lowercase().contains(needle);

    contains(log.patient_id.as_str())
        || log.symptoms.iter().any(|s| contains(s.as_str()))
        || contains(&log.notes)
        || log
            .assessment
            .suggested_next_steps
            .iter()
            .any(|step| contains(step))
        || log.assessment.flags.iter().any(|f| contains(f.as_str()))
}
