use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::DischargeError;

/// Output envelope: `{"discharge_note": "<text>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DischargeNote {
    pub discharge_note: String,
}

impl DischargeNote {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            discharge_note: text.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.discharge_note
    }

    /// Serialize with four-space indentation
    pub fn to_json(&self) -> Result<String, DischargeError> {
        let mut buf = Vec::new();
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        self.serialize(&mut ser)?;
        // serde_json only ever emits valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Artifact left behind when the model writes a bracketed time frame
/// such as "in [x] to [y] days" and the brackets are stripped.
const BROKEN_TIME_FRAME: &str = "in  to";

/// Tidy up raw model output.
///
/// Surrounding whitespace is trimmed. If the model left placeholder
/// brackets in the text they are removed, along with the broken time
/// frame they typically leave behind.
pub fn clean_note(raw: &str) -> String {
    let note = raw.trim();

    if !note.contains(['[', ']']) {
        return note.to_string();
    }

    note.replace(['[', ']'], "")
        .replace(BROKEN_TIME_FRAME, "as needed")
        .trim()
        .to_string()
}
