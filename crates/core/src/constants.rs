//! Constants used throughout the triage core crate.
//!
//! Storage names and the boundary ranges submissions are validated against live here so the
//! API, CLI and tests agree on them.

/// Default directory for triage data when no explicit directory is configured.
pub const DEFAULT_DATA_DIR: &str = "triage_data";

/// Directory name, under the data directory, holding one JSON file per symptom log.
pub const SYMPTOM_LOGS_DIR_NAME: &str = "symptom_logs";

/// Highest severity score an assessment can carry. The lowest is 0.
pub const MAX_SEVERITY: u8 = 10;

/// Lowest accepted body temperature in degrees Celsius.
pub const MIN_TEMPERATURE_C: f64 = 30.0;

/// Highest accepted body temperature in degrees Celsius.
pub const MAX_TEMPERATURE_C: f64 = 45.0;

/// Longest accepted symptom duration in days.
pub const MAX_DURATION_DAYS: u32 = 365;

/// Longest accepted free-text note, counted in characters.
pub const MAX_NOTES_CHARS: usize = 500;

/// Longest accepted patient reference.
pub const MAX_PATIENT_REF_LEN: usize = 64;
