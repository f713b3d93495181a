//! # Triage Types
//!
//! Small, validated value types shared across the triage workspace:
//! - [`Symptom`]: the fixed symptom vocabulary patients report against
//! - [`UrgencyFlag`]: the fixed vocabulary of urgency markers attached by rules
//! - [`PatientRef`]: trimmed, non-blank reference to the patient a log belongs to
//!
//! Parsing into these types is the point where out-of-vocabulary input is rejected.

mod patient_ref;
mod vocabulary;

pub use patient_ref::{PatientRef, PatientRefError};
pub use vocabulary::{Symptom, UrgencyFlag, VocabularyError};
