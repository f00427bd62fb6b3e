use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::DischargeError;

/// Top-level sections a consultation record must carry in strict mode
pub const REQUIRED_SECTIONS: [&str; 2] = ["patient", "consultation"];

/// Consultation data as read from the input file.
///
/// No schema is imposed beyond the optional section check; the value is
/// passed to the model as-is, with its original key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsultationData(JsonValue);

impl ConsultationData {
    pub fn new(value: JsonValue) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &JsonValue {
        &self.0
    }

    /// Check that every entry of [`REQUIRED_SECTIONS`] is present at the top level
    pub fn require_sections(&self) -> Result<(), DischargeError> {
        let object = self.0.as_object().ok_or(DischargeError::NotAnObject)?;

        for section in REQUIRED_SECTIONS {
            if !object.contains_key(section) {
                return Err(DischargeError::MissingSection(section.to_string()));
            }
        }
        Ok(())
    }

    /// Two-space indented rendering embedded in the prompt
    pub fn to_pretty_json(&self) -> Result<String, DischargeError> {
        Ok(serde_json::to_string_pretty(&self.0)?)
    }
}
