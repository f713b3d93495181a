//! Input validation utilities.
//!
//! Boundary checks applied to symptom submissions before they reach the evaluator. The
//! evaluator itself trusts its input; anything out of range is rejected here.

use crate::constants::{
    MAX_DURATION_DAYS, MAX_NOTES_CHARS, MAX_PATIENT_REF_LEN, MAX_TEMPERATURE_C, MIN_TEMPERATURE_C,
};
use crate::log::SymptomSubmission;
use crate::{TriageError, TriageResult};

/// Validates a submission against the intake contract.
///
/// # Errors
///
/// Returns a `TriageError::InvalidInput` if:
/// - the patient reference is not a safe identifier,
/// - the temperature is outside 30-45°C or not a finite number,
/// - no symptom is reported,
/// - the duration exceeds 365 days,
/// - the notes exceed 500 characters.
pub fn validate_submission(submission: &SymptomSubmission) -> TriageResult<()> {
    validate_patient_reference(submission.patient_id.as_str())?;

    if let Some(temperature) = submission.temperature {
        if !temperature.is_finite()
            || !(MIN_TEMPERATURE_C..=MAX_TEMPERATURE_C).contains(&temperature)
        {
            return Err(TriageError::InvalidInput(format!(
                "temperature must be between {MIN_TEMPERATURE_C}-{MAX_TEMPERATURE_C}°C"
            )));
        }
    }

    if submission.symptoms.is_empty() {
        return Err(TriageError::InvalidInput(
            "at least one symptom is required".into(),
        ));
    }

    if submission.duration_days > MAX_DURATION_DAYS {
        return Err(TriageError::InvalidInput(format!(
            "duration must be between 0-{MAX_DURATION_DAYS} days"
        )));
    }

    if submission.notes.chars().count() > MAX_NOTES_CHARS {
        return Err(TriageError::InvalidInput(format!(
            "notes cannot exceed {MAX_NOTES_CHARS} characters"
        )));
    }

    Ok(())
}

/// Validates that a patient reference is a plain identifier.
///
/// Accepts ASCII letters, digits, '.', '-' and '_', up to 64 characters.
pub fn validate_patient_reference(patient_id: &str) -> TriageResult<()> {
    if patient_id.trim().is_empty() {
        return Err(TriageError::InvalidInput(
            "patient reference cannot be empty".into(),
        ));
    }

    if patient_id.len() > MAX_PATIENT_REF_LEN {
        return Err(TriageError::InvalidInput(format!(
            "patient reference exceeds maximum length of {MAX_PATIENT_REF_LEN} characters"
        )));
    }

    let ok = patient_id
        .bytes()
        .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'.' | b'-' | b'_'));

    if !ok {
        return Err(TriageError::InvalidInput(
            "patient reference contains invalid characters (only alphanumeric, '.', '-', '_' allowed)"
                .into(),
        ));
    }

    Ok(())
}
