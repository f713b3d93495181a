//! The triage service.
//!
//! Ties the evaluator to log storage: a submission is validated, assessed and persisted in one
//! call. Stateless evaluation is available through [`TriageService::assess`].

use crate::config::CoreConfig;
use crate::evaluator::TriageEvaluator;
use crate::input::{Assessment, SymptomInput};
use crate::log::{SymptomLog, SymptomSubmission};
use crate::query::LogQuery;
use crate::repositories::symptom_logs::SymptomLogRepository;
use crate::validation::{validate_patient_reference, validate_submission};
use crate::TriageResult;
use std::sync::Arc;
use triage_rules::RuleCatalog;

#[derive(Clone, Debug)]
pub struct TriageService {
    evaluator: TriageEvaluator,
    logs: SymptomLogRepository,
}

impl TriageService {
    pub fn new(cfg: Arc<CoreConfig>, catalog: Arc<RuleCatalog>) -> Self {
        Self {
            evaluator: TriageEvaluator::new(catalog),
            logs: SymptomLogRepository::new(&cfg),
        }
    }

    pub fn catalog(&self) -> &RuleCatalog {
        self.evaluator.catalog()
    }

    pub fn assess(&self, input: &SymptomInput) -> Assessment {
        self.evaluator.evaluate(input)
    }

    /// Validate, assess and store one submission.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::InvalidInput` if the submission fails validation, or a storage
    /// error if the log cannot be written.
    pub fn submit(&self, submission: SymptomSubmission) -> TriageResult<SymptomLog> {
        validate_submission(&submission)?;

        let assessment = self.evaluator.evaluate(&submission.to_input());
        let log = SymptomLog::new(submission, assessment);
        self.logs.save(&log)?;

        if log.assessment.is_emergency() {
            tracing::warn!(
                "emergency triage result for patient {} (log {})",
                log.patient_id,
                log.id
            );
        } else {
            tracing::info!(
                "stored symptom log {} with severity {}",
                log.id,
                log.assessment.severity_score
            );
        }

        Ok(log)
    }

    /// Stored logs, optionally for one patient, newest first.
    pub fn list_logs(&self, patient_id: Option<&str>) -> TriageResult<Vec<SymptomLog>> {
        if let Some(patient_id) = patient_id {
            validate_patient_reference(patient_id)?;
        }
        self.logs.list(patient_id)
    }

    pub fn query_logs(&self, query: &LogQuery) -> TriageResult<Vec<SymptomLog>> {
        if let Some(patient_id) = query.patient_id.as_deref() {
            validate_patient_reference(patient_id)?;
        }
        self.logs.query(query)
    }
}
