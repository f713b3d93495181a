#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("rule catalog error: {0}")]
    Rules(#[from] triage_rules::RulesError),
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to write symptom log: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read symptom log: {0}")]
    FileRead(std::io::Error),
    #[error("failed to serialize symptom log: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize symptom log: {0}")]
    Deserialization(serde_json::Error),
}

pub type TriageResult<T> = std::result::Result<T, TriageError>;
