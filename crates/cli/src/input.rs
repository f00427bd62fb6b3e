//! Consultation file validation and loading

use std::path::Path;

use discharge_core::{ConsultationData, DischargeError};

/// Validate that `path` exists, has a `.json` extension, and parses as JSON.
///
/// Returns the parsed record so callers do not read the file twice.
pub fn load_consultation(path: &Path) -> Result<ConsultationData, DischargeError> {
    if !path.exists() {
        return Err(DischargeError::FileNotFound(path.to_path_buf()));
    }

    if !path.to_string_lossy().to_lowercase().ends_with(".json") {
        return Err(DischargeError::NotJsonFile(path.to_path_buf()));
    }

    let content = std::fs::read(path).map_err(|source| DischargeError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let data: ConsultationData =
        serde_json::from_slice(&content).map_err(|source| DischargeError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::info!(path = %path.display(), "Loaded consultation data");
    Ok(data)
}
