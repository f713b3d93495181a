//! Closed vocabularies used by submissions and rules.
//!
//! Both enums serialise to the exact strings used on the wire (`"chest pain"`, `"EMERGENCY"`),
//! so unknown values are rejected by serde before they reach the triage engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors raised when text does not name a vocabulary member.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VocabularyError {
    #[error("unknown symptom: {0}")]
    UnknownSymptom(String),
    #[error("unknown urgency flag: {0}")]
    UnknownFlag(String),
}

/// A self-reported symptom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symptom {
    #[serde(rename = "fever")]
    Fever,
    #[serde(rename = "cough")]
    Cough,
    #[serde(rename = "headache")]
    Headache,
    #[serde(rename = "chest pain")]
    ChestPain,
    #[serde(rename = "shortness of breath")]
    ShortnessOfBreath,
    #[serde(rename = "nausea")]
    Nausea,
    #[serde(rename = "fatigue")]
    Fatigue,
    #[serde(rename = "sore throat")]
    SoreThroat,
}

impl Symptom {
    /// Every symptom, in vocabulary order.
    pub const ALL: [Symptom; 8] = [
        Symptom::Fever,
        Symptom::Cough,
        Symptom::Headache,
        Symptom::ChestPain,
        Symptom::ShortnessOfBreath,
        Symptom::Nausea,
        Symptom::Fatigue,
        Symptom::SoreThroat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Symptom::Fever => "fever",
            Symptom::Cough => "cough",
            Symptom::Headache => "headache",
            Symptom::ChestPain => "chest pain",
            Symptom::ShortnessOfBreath => "shortness of breath",
            Symptom::Nausea => "nausea",
            Symptom::Fatigue => "fatigue",
            Symptom::SoreThroat => "sore throat",
        }
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Symptom {
    type Err = VocabularyError;

    /// Matching ignores surrounding whitespace and ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Symptom::ALL
            .into_iter()
            .find(|symptom| symptom.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| VocabularyError::UnknownSymptom(wanted.to_string()))
    }
}

/// A categorical urgency marker attached by high-risk rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UrgencyFlag {
    /// Seek emergency care now.
    Emergency,
    /// Needs prompt attention.
    Attention,
    /// Should be reviewed by a clinician.
    Review,
}

impl UrgencyFlag {
    pub const ALL: [UrgencyFlag; 3] = [
        UrgencyFlag::Emergency,
        UrgencyFlag::Attention,
        UrgencyFlag::Review,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyFlag::Emergency => "EMERGENCY",
            UrgencyFlag::Attention => "ATTENTION",
            UrgencyFlag::Review => "REVIEW",
        }
    }
}

impl fmt::Display for UrgencyFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UrgencyFlag {
    type Err = VocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        UrgencyFlag::ALL
            .into_iter()
            .find(|flag| flag.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| VocabularyError::UnknownFlag(wanted.to_string()))
    }
}
