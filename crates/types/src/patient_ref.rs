use std::fmt;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum PatientRefError {
    #[error("patient reference cannot be blank")]
    Blank,
}

/// Opaque reference to the patient a symptom log belongs to.
///
/// Stored trimmed. Which characters are allowed is a boundary concern checked by the core
/// validation, so this type only rules out blank references.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatientRef(String);

impl PatientRef {
    /// # Errors
    ///
    /// Returns `PatientRefError::Blank` if nothing is left after trimming.
    pub fn new(reference: impl AsRef<str>) -> Result<Self, PatientRefError> {
        match reference.as_ref().trim() {
            "" => Err(PatientRefError::Blank),
            trimmed => Ok(Self(trimmed.to_owned())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PatientRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PatientRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for PatientRef {
    type Err = PatientRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// Stored logs carry the reference as a bare JSON string.
impl serde::Serialize for PatientRef {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for PatientRef {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        PatientRef::new(raw).map_err(serde::de::Error::custom)
    }
}
