//! Symptom log storage.
//!
//! Every log is one pretty-printed JSON document named after its id:
//!
//! ```text
//! symptom_logs/
//!   <uuid>.json
//! ```
//!
//! Writes go to a temporary sibling first and are renamed into place, so a reader never sees a
//! half-written log. Files that fail to parse are skipped when listing.

use crate::config::CoreConfig;
use crate::log::SymptomLog;
use crate::query::LogQuery;
use crate::{TriageError, TriageResult};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct SymptomLogRepository {
    logs_dir: PathBuf,
}

impl SymptomLogRepository {
    pub fn new(cfg: &CoreConfig) -> Self {
        Self {
            logs_dir: cfg.symptom_logs_dir(),
        }
    }

    pub fn logs_dir(&self) -> &Path {
        &self.logs_dir
    }

    /// Persist `log`, returning the path it was written to.
    ///
    /// # Errors
    ///
    /// Returns a `TriageError` if:
    /// - the logs directory cannot be created (`StorageDirCreation`),
    /// - the log cannot be serialised (`Serialization`),
    /// - the file cannot be written or moved into place (`FileWrite`).
    pub fn save(&self, log: &SymptomLog) -> TriageResult<PathBuf> {
        fs::create_dir_all(&self.logs_dir).map_err(TriageError::StorageDirCreation)?;

        let json = serde_json::to_string_pretty(log).map_err(TriageError::Serialization)?;

        let file_name = format!("{}.json", log.id.simple());
        let path = self.logs_dir.join(&file_name);
        let tmp_path = self.logs_dir.join(format!("{file_name}.tmp"));

        fs::write(&tmp_path, json).map_err(TriageError::FileWrite)?;
        fs::rename(&tmp_path, &path).map_err(TriageError::FileWrite)?;

        tracing::debug!("saved symptom log {} to {}", log.id, path.display());
        Ok(path)
    }

    /// All stored logs, optionally for one patient, newest first.
    ///
    /// A logs directory that does not exist yet holds no logs.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::FileRead` if the logs directory exists but cannot be read.
    pub fn list(&self, patient_id: Option<&str>) -> TriageResult<Vec<SymptomLog>> {
        let query = LogQuery {
            patient_id: patient_id.map(str::to_owned),
            ..LogQuery::default()
        };
        self.query(&query)
    }

    /// Stored logs selected and ordered by `query`.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::FileRead` if the logs directory exists but cannot be read.
    pub fn query(&self, query: &LogQuery) -> TriageResult<Vec<SymptomLog>> {
        Ok(query.apply(self.load_all()?))
    }

    fn load_all(&self) -> TriageResult<Vec<SymptomLog>> {
        let entries = match fs::read_dir(&self.logs_dir) {
            Ok(it) => it,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(TriageError::FileRead(e)),
        };

        let mut logs = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            match read_log(&path) {
                Ok(log) => logs.push(log),
                Err(e) => {
                    tracing::warn!("failed to parse symptom log {}: {}", path.display(), e);
                }
            }
        }

        Ok(logs)
    }
}

fn read_log(path: &Path) -> TriageResult<SymptomLog> {
    let contents = fs::read_to_string(path).map_err(TriageError::FileRead)?;
    serde_json::from_str(&contents).map_err(TriageError::Deserialization)
}
