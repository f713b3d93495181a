//! Request and response bodies for the REST API.
//!
//! Symptoms and flags travel as their display names (`"chest pain"`, `"EMERGENCY"`); unknown
//! names are rejected with `400 Bad Request` rather than a body-parse failure.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use triage_core::constants::{MAX_DURATION_DAYS, MAX_TEMPERATURE_C, MIN_TEMPERATURE_C};
use triage_core::{
    Assessment, LogQuery, PatientRef, SortField, SortOrder, Symptom, SymptomInput, SymptomLog,
    SymptomSubmission, UrgencyFlag,
};
use triage_rules::Rule;
use utoipa::{IntoParams, ToSchema};

#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct RuleSummary {
    pub id: String,
    pub description: String,
    pub fallback: bool,
    pub severity_delta: f64,
    pub suggestions: Vec<String>,
    pub flags: Vec<String>,
}

impl From<&Rule> for RuleSummary {
    fn from(rule: &Rule) -> Self {
        Self {
            id: rule.id.clone(),
            description: rule.description.clone(),
            fallback: rule.is_fallback(),
            severity_delta: rule.effects.severity_delta,
            suggestions: rule.effects.suggestions.clone(),
            flags: flag_names(&rule.effects.flags),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct RulesRes {
    pub rules: Vec<RuleSummary>,
}

/// A symptom record to evaluate without storing it.
#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateReq {
    /// Degrees Celsius; omit or send `null` when not measured.
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub duration_days: u32,
}

impl EvaluateReq {
    pub fn into_input(self) -> Result<SymptomInput, String> {
        Ok(SymptomInput::new(
            self.temperature,
            parse_symptoms(&self.symptoms)?,
            self.duration_days,
        ))
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct AssessmentRes {
    pub severity_score: u8,
    pub suggested_next_steps: Vec<String>,
    pub flags: Vec<String>,
    pub explanation: Vec<String>,
}

impl From<Assessment> for AssessmentRes {
    fn from(assessment: Assessment) -> Self {
        Self {
            severity_score: assessment.severity_score,
            flags: flag_names(&assessment.flags),
            suggested_next_steps: assessment.suggested_next_steps,
            explanation: assessment.explanation,
        }
    }
}

/// A symptom record to validate, assess and store.
///
/// Fields are taken as raw JSON so that a value of the wrong shape is reported as a field
/// error rather than a body-parse failure.
#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitSymptomsReq {
    #[serde(default)]
    #[schema(value_type = String)]
    pub patient_id: Option<Value>,
    /// Degrees Celsius; omit or send `null` when not measured.
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub temperature: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Vec<String>)]
    pub symptoms: Option<Value>,
    #[serde(default)]
    #[schema(value_type = u32)]
    pub duration_days: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Value>,
}

impl SubmitSymptomsReq {
    /// Check the shape of every field. Ranges are left to the core validator.
    pub fn into_submission(self) -> Result<SymptomSubmission, String> {
        let patient_id = match self.patient_id {
            Some(Value::String(id)) => PatientRef::new(id).ok(),
            _ => None,
        }
        .ok_or_else(|| "a valid patientId is required".to_string())?;

        let temperature = match self.temperature {
            None => None,
            Some(Value::Number(n)) => n.as_f64(),
            Some(_) => {
                return Err(format!(
                    "temperature must be between {MIN_TEMPERATURE_C}-{MAX_TEMPERATURE_C}°C"
                ))
            }
        };

        let symptoms = match self.symptoms {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(name) => Symptom::from_str(name).map_err(|e| e.to_string()),
                    other => Err(format!("unknown symptom: {other}")),
                })
                .collect::<Result<Vec<_>, _>>()?,
            _ => return Err("at least one symptom is required".into()),
        };

        let duration_days = match self.duration_days {
            Some(Value::Number(n)) => n.as_u64().and_then(|d| u32::try_from(d).ok()),
            _ => None,
        }
        .ok_or_else(|| format!("duration must be between 0-{MAX_DURATION_DAYS} days"))?;

        let notes = match self.notes {
            None => String::new(),
            Some(Value::String(notes)) => notes,
            Some(_) => return Err("notes must be text".into()),
        };

        Ok(SymptomSubmission {
            patient_id,
            temperature,
            symptoms,
            duration_days,
            notes,
        })
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SymptomLogRes {
    pub id: String,
    pub patient_id: String,
    pub temperature: Option<f64>,
    pub symptoms: Vec<String>,
    pub duration_days: u32,
    pub notes: String,
    #[serde(rename = "severity_score")]
    pub severity_score: u8,
    #[serde(rename = "suggested_next_steps")]
    pub suggested_next_steps: Vec<String>,
    pub flags: Vec<String>,
    pub explanation: Vec<String>,
    pub created_at: String,
}

impl From<SymptomLog> for SymptomLogRes {
    fn from(log: SymptomLog) -> Self {
        Self {
            id: log.id.simple().to_string(),
            patient_id: log.patient_id.into_string(),
            temperature: log.temperature,
            symptoms: log.symptoms.iter().map(|s| s.as_str().to_string()).collect(),
            duration_days: log.duration_days,
            notes: log.notes,
            severity_score: log.assessment.severity_score,
            flags: flag_names(&log.assessment.flags),
            suggested_next_steps: log.assessment.suggested_next_steps,
            explanation: log.assessment.explanation,
            created_at: log.created_at.to_rfc3339(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SubmitSymptomsRes {
    pub log: SymptomLogRes,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct LogsRes {
    pub logs: Vec<SymptomLogRes>,
}

/// The filters a filtered listing was run with, after parsing.
#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppliedFilters {
    pub patient_id: Option<String>,
    pub search: Option<String>,
    pub severity_min: Option<u8>,
    pub severity_max: Option<u8>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub symptoms: Vec<String>,
    pub flags: Vec<String>,
    pub sort_by: String,
    pub sort_order: String,
}

impl From<&LogQuery> for AppliedFilters {
    fn from(query: &LogQuery) -> Self {
        Self {
            patient_id: query.patient_id.clone(),
            search: query.search.clone(),
            severity_min: query.severity_min,
            severity_max: query.severity_max,
            date_from: query.date_from.map(|d| d.to_rfc3339()),
            date_to: query.date_to.map(|d| d.to_rfc3339()),
            symptoms: query.symptoms.iter().map(|s| s.as_str().to_string()).collect(),
            flags: flag_names(&query.flags),
            sort_by: query.sort_by.to_string(),
            sort_order: query.sort_order.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct FilteredLogsRes {
    pub logs: Vec<SymptomLogRes>,
    pub total: usize,
    pub filters: AppliedFilters,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LogsParams {
    /// Only logs for this patient.
    pub patient_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FilteredLogsParams {
    pub patient_id: Option<String>,
    /// Case-insensitive text search.
    pub search: Option<String>,
    /// One of `createdAt`, `severity_score`, `durationDays`, `temperature`.
    pub sort_by: Option<String>,
    /// `asc` or `desc`.
    pub sort_order: Option<String>,
    pub severity_min: Option<u8>,
    pub severity_max: Option<u8>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`.
    pub date_from: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD` (inclusive of the whole day).
    pub date_to: Option<String>,
    /// Comma-separated symptom names.
    pub symptoms: Option<String>,
    /// Comma-separated urgency flags.
    pub flags: Option<String>,
}

impl FilteredLogsParams {
    pub fn into_query(self) -> Result<LogQuery, String> {
        let sort_by = match non_blank(self.sort_by) {
            Some(s) => SortField::from_str(&s)?,
            None => SortField::default(),
        };
        let sort_order = match non_blank(self.sort_order) {
            Some(s) => SortOrder::from_str(&s)?,
            None => SortOrder::default(),
        };

        if let (Some(min), Some(max)) = (self.severity_min, self.severity_max) {
            if min > max {
                return Err("severityMin cannot exceed severityMax".into());
            }
        }

        let date_from = non_blank(self.date_from)
            .map(|d| parse_date(&d, false))
            .transpose()?;
        let date_to = non_blank(self.date_to)
            .map(|d| parse_date(&d, true))
            .transpose()?;

        Ok(LogQuery {
            patient_id: non_blank(self.patient_id),
            search: non_blank(self.search),
            severity_min: self.severity_min,
            severity_max: self.severity_max,
            date_from,
            date_to,
            symptoms: parse_csv::<Symptom>(self.symptoms.as_deref())?,
            flags: parse_csv::<UrgencyFlag>(self.flags.as_deref())?,
            sort_by,
            sort_order,
        })
    }
}

fn flag_names(flags: &[UrgencyFlag]) -> Vec<String> {
    flags.iter().map(|f| f.as_str().to_string()).collect()
}

fn parse_symptoms(names: &[String]) -> Result<Vec<Symptom>, String> {
    names
        .iter()
        .map(|name| Symptom::from_str(name).map_err(|e| e.to_string()))
        .collect()
}

fn parse_csv<T>(value: Option<&str>) -> Result<Vec<T>, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<T>().map_err(|e| e.to_string()))
        .collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse an RFC 3339 timestamp or a calendar date. A bare date covers the whole day, so an
/// upper bound is taken at the last millisecond of it.
fn parse_date(value: &str, end_of_day: bool) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("invalid date: {value} (expected RFC 3339 or YYYY-MM-DD)"))?;
    let time = if end_of_day {
        NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
    } else {
        NaiveTime::from_hms_opt(0, 0, 0)
    }
    .ok_or_else(|| format!("invalid date: {value}"))?;

    Ok(date.and_time(time).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_filter_params() {
        let params = FilteredLogsParams {
            patient_id: Some(" p-1 ".into()),
            search: Some("".into()),
            sort_by: Some("severity_score".into()),
            sort_order: Some("asc".into()),
            severity_min: Some(2),
            severity_max: Some(8),
            date_from: Some("2025-03-01".into()),
            date_to: Some("2025-03-02T12:00:00+01:00".into()),
            symptoms: Some("fever, chest pain".into()),
            flags: Some("EMERGENCY".into()),
        };

        let query = params.into_query().expect("valid params");
        assert_eq!(query.patient_id.as_deref(), Some("p-1"));
        assert_eq!(query.search, None);
        assert_eq!(query.sort_by, SortField::SeverityScore);
        assert_eq!(query.sort_order, SortOrder::Asc);
        assert_eq!(
            query.date_from,
            Some(Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            query.date_to,
            Some(Utc.with_ymd_and_hms(2025, 3, 2, 11, 0, 0).unwrap())
        );
        assert_eq!(query.symptoms, vec![Symptom::Fever, Symptom::ChestPain]);
        assert_eq!(query.flags, vec![UrgencyFlag::Emergency]);
    }

    #[test]
    fn bare_upper_date_covers_the_whole_day() {
        let to = parse_date("2025-03-02", true).unwrap();
        assert_eq!(to.to_rfc3339(), "2025-03-02T23:59:59.999+00:00");
    }

    #[test]
    fn rejects_bad_filter_params() {
        let bad_sort = FilteredLogsParams {
            sort_by: Some("password".into()),
            ..FilteredLogsParams::default()
        };
        assert!(bad_sort.into_query().is_err());

        let bad_date = FilteredLogsParams {
            date_from: Some("yesterday".into()),
            ..FilteredLogsParams::default()
        };
        assert!(bad_date.into_query().unwrap_err().contains("invalid date"));

        let bad_symptom = FilteredLogsParams {
            symptoms: Some("fever,sneezing".into()),
            ..FilteredLogsParams::default()
        };
        assert!(bad_symptom.into_query().is_err());

        let inverted = FilteredLogsParams {
            severity_min: Some(7),
            severity_max: Some(3),
            ..FilteredLogsParams::default()
        };
        assert!(inverted.into_query().is_err());
    }

    fn submission_req(body: serde_json::Value) -> SubmitSymptomsReq {
        serde_json::from_value(body).expect("any JSON object is a request body")
    }

    #[test]
    fn submission_request_accepts_well_formed_fields() {
        let submission = submission_req(serde_json::json!({
            "patientId": "p-1",
            "temperature": null,
            "symptoms": ["Fever", "cough"],
            "durationDays": 3,
        }))
        .into_submission()
        .expect("valid submission");

        assert_eq!(submission.patient_id.as_str(), "p-1");
        assert_eq!(submission.temperature, None);
        assert_eq!(submission.symptoms, vec![Symptom::Fever, Symptom::Cough]);
        assert_eq!(submission.duration_days, 3);
        assert!(submission.notes.is_empty());
    }

    #[test]
    fn submission_request_reports_the_failing_field() {
        let base = serde_json::json!({
            "patientId": "p-1",
            "temperature": 37.0,
            "symptoms": ["fever"],
            "durationDays": 2,
            "notes": "",
        });
        let with = |key: &str, value: serde_json::Value| {
            let mut body = base.clone();
            body[key] = value;
            submission_req(body).into_submission().unwrap_err()
        };
        let without = |key: &str| {
            let mut body = base.clone();
            body.as_object_mut().unwrap().remove(key);
            submission_req(body).into_submission().unwrap_err()
        };

        assert!(without("patientId").contains("patientId"));
        assert!(with("patientId", serde_json::json!(42)).contains("patientId"));
        assert!(with("temperature", serde_json::json!("hot")).contains("temperature"));
        assert!(without("symptoms").contains("symptom"));
        assert!(with("symptoms", serde_json::json!([7])).contains("unknown symptom"));
        assert!(without("durationDays").contains("duration"));
        assert!(with("durationDays", serde_json::json!(-1)).contains("duration"));
        assert!(with("durationDays", serde_json::json!(1.5)).contains("duration"));
        assert!(with("notes", serde_json::json!(["a"])).contains("notes"));
    }

    #[test]
    fn evaluate_request_rejects_unknown_symptoms() {
        let req = EvaluateReq {
            temperature: None,
            symptoms: vec!["Fever".into(), "sneezing".into()],
            duration_days: 1,
        };
        assert!(req.into_input().is_err());
    }
}
