//! Repository management modules.
//!
//! Storage for records produced by the triage service. Each repository owns one directory
//! under the configured data directory.

pub mod symptom_logs;
