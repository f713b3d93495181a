//! # Triage Core
//!
//! Core business logic for the symptom triage service.
//!
//! This crate contains the evaluator and pure data operations:
//! - Evaluation of symptom records against a rule catalog
//! - Validation of symptom submissions
//! - Symptom log storage as JSON files under the configured data directory
//! - Filtering, searching and sorting of stored logs
//!
//! **No API concerns**: HTTP servers and command-line handling belong in `api-rest` and `cli`.

pub mod config;
pub mod constants;
pub mod error;
pub mod evaluator;
pub mod input;
pub mod log;
pub mod query;
pub mod repositories;
pub mod service;
pub mod validation;

pub use config::{rules_file_from_env_value, CoreConfig};
pub use error::{TriageError, TriageResult};
pub use evaluator::{evaluate, TriageEvaluator};
pub use input::{Assessment, SymptomInput};
pub use log::{SymptomLog, SymptomSubmission};
pub use query::{LogQuery, SortField, SortOrder};
pub use repositories::symptom_logs::SymptomLogRepository;
pub use service::TriageService;

pub use triage_rules::RuleCatalog;
pub use triage_types::{PatientRef, Symptom, UrgencyFlag};
