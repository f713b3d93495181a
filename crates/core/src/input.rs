//! Evaluator input and output records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use triage_types::{Symptom, UrgencyFlag};

/// One normalised symptom record, as handed to the evaluator.
///
/// Missing fields deserialise to "not measured", "no symptoms" and "0 days" respectively.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomInput {
    /// Degrees Celsius; `None` when not measured.
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub symptoms: BTreeSet<Symptom>,
    #[serde(default)]
    pub duration_days: u32,
}

impl SymptomInput {
    pub fn new(
        temperature: Option<f64>,
        symptoms: impl IntoIterator<Item = Symptom>,
        duration_days: u32,
    ) -> Self {
        Self {
            temperature,
            symptoms: symptoms.into_iter().collect(),
            duration_days,
        }
    }

    pub fn has_symptom(&self, symptom: Symptom) -> bool {
        self.symptoms.contains(&symptom)
    }
}

/// The structured triage result for one symptom record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    /// 0 to 10 inclusive.
    pub severity_score: u8,
    /// Unique, in order of first suggestion.
    pub suggested_next_steps: Vec<String>,
    /// Unique, in order of first occurrence.
    pub flags: Vec<UrgencyFlag>,
    /// Description of every rule that fired, in catalog order.
    pub explanation: Vec<String>,
}

impl Assessment {
    pub fn has_flag(&self, flag: UrgencyFlag) -> bool {
        self.flags.contains(&flag)
    }

    pub fn is_emergency(&self) -> bool {
        self.has_flag(UrgencyFlag::Emergency)
    }
}
