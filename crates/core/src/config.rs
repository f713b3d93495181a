//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into core services, so request
//! handling never reads process-wide environment variables.

use crate::constants::SYMPTOM_LOGS_DIR_NAME;
use crate::{TriageError, TriageResult};
use std::path::{Path, PathBuf};
use triage_rules::RuleCatalog;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
    rules_file: Option<PathBuf>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::InvalidInput` if `data_dir` is empty.
    pub fn new(data_dir: PathBuf, rules_file: Option<PathBuf>) -> TriageResult<Self> {
        if data_dir.as_os_str().is_empty() {
            return Err(TriageError::InvalidInput("data_dir cannot be empty".into()));
        }

        Ok(Self {
            data_dir,
            rules_file,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn symptom_logs_dir(&self) -> PathBuf {
        self.data_dir.join(SYMPTOM_LOGS_DIR_NAME)
    }

    pub fn rules_file(&self) -> Option<&Path> {
        self.rules_file.as_deref()
    }

    /// Build the rule catalog this process evaluates against.
    ///
    /// Uses the YAML file when one is configured, otherwise the standard catalog.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::Rules` if the configured file cannot be read, parsed or validated.
    pub fn load_catalog(&self) -> TriageResult<RuleCatalog> {
        match &self.rules_file {
            Some(path) => Ok(RuleCatalog::load(path)?),
            None => {
                let catalog = RuleCatalog::standard();
                tracing::info!("using standard catalog of {} triage rules", catalog.len());
                Ok(catalog)
            }
        }
    }
}

/// Parse the optional rules-file setting.
///
/// `None` or an empty/whitespace value selects the standard catalog.
pub fn rules_file_from_env_value(value: Option<String>) -> Option<PathBuf> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn rejects_empty_data_dir() {
        let err = CoreConfig::new(PathBuf::new(), None).expect_err("should reject empty path");
        assert!(matches!(err, TriageError::InvalidInput(msg) if msg.contains("data_dir")));
    }

    #[test]
    fn symptom_logs_live_under_data_dir() {
        let cfg = CoreConfig::new(PathBuf::from("/srv/triage"), None).expect("valid config");
        assert_eq!(
            cfg.symptom_logs_dir(),
            PathBuf::from("/srv/triage").join(SYMPTOM_LOGS_DIR_NAME)
        );
        assert!(cfg.rules_file().is_none());
    }

    #[test]
    fn blank_rules_file_selects_standard_catalog() {
        assert_eq!(rules_file_from_env_value(None), None);
        assert_eq!(rules_file_from_env_value(Some("   ".into())), None);
        assert_eq!(
            rules_file_from_env_value(Some(" rules.yaml ".into())),
            Some(PathBuf::from("rules.yaml"))
        );
    }

    #[test]
    fn load_catalog_defaults_to_standard() {
        let cfg = CoreConfig::new(PathBuf::from("data"), None).expect("valid config");
        let catalog = cfg.load_catalog().expect("standard catalog");
        assert_eq!(catalog, RuleCatalog::standard());
    }

    #[test]
    fn load_catalog_surfaces_bad_rules_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("rules.yaml");
        std::fs::write(&path, "rules: []\n").expect("write rules file");

        let cfg = CoreConfig::new(temp_dir.path().to_path_buf(), Some(path)).expect("config");
        let err = cfg.load_catalog().expect_err("empty catalog should fail");
        assert!(matches!(
            err,
            TriageError::Rules(triage_rules::RulesError::EmptyCatalog)
        ));
    }
}
