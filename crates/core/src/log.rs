//! Symptom submissions and the logs persisted for them.

use crate::input::{Assessment, SymptomInput};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use triage_types::{PatientRef, Symptom};
use uuid::Uuid;

/// A patient's self-reported symptom record, as received from a caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomSubmission {
    /// Reference to the patient in the caller's account system.
    pub patient_id: PatientRef,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub symptoms: Vec<Symptom>,
    #[serde(default)]
    pub duration_days: u32,
    #[serde(default)]
    pub notes: String,
}

impl SymptomSubmission {
    /// The evaluator's view of this submission.
    pub fn to_input(&self) -> SymptomInput {
        SymptomInput::new(
            self.temperature,
            self.symptoms.iter().copied(),
            self.duration_days,
        )
    }
}

/// A stored submission together with the assessment produced for it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomLog {
    pub id: Uuid,
    pub patient_id: PatientRef,
    pub temperature: Option<f64>,
    pub symptoms: Vec<Symptom>,
    pub duration_days: u32,
    pub notes: String,
    #[serde(flatten)]
    pub assessment: Assessment,
    pub created_at: DateTime<Utc>,
}

impl SymptomLog {
    /// Build a new log for `submission`, stamped now with a fresh id.
    pub fn new(submission: SymptomSubmission, assessment: Assessment) -> Self {
        Self::with_timestamp(submission, assessment, Utc::now())
    }

    pub fn with_timestamp(
        submission: SymptomSubmission,
        assessment: Assessment,
        created_at: DateTime<Utc>,
    ) -> Self {
        let input = submission.to_input();
        Self {
            id: Uuid::new_v4(),
            patient_id: submission.patient_id,
            temperature: submission.temperature,
            symptoms: input.symptoms.into_iter().collect(),
            duration_days: submission.duration_days,
            notes: submission.notes,
            assessment,
            created_at,
        }
    }
}
