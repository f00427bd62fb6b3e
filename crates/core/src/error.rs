use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning a consultation file into a discharge note
#[derive(Debug, Error)]
pub enum DischargeError {
    #[error("The file '{}' does not exist.", .0.display())]
    FileNotFound(PathBuf),

    #[error("Input file must be a .json file.")]
    NotJsonFile(PathBuf),

    #[error("The file '{}' contains invalid JSON.", .path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Consultation data must be a JSON object")]
    NotAnObject,

    #[error("Missing required section: {0}")]
    MissingSection(String),

    #[error("API key not found. Please set {0} in .env file")]
    MissingApiKey(String),

    #[error("API key in {0} is malformed (contains whitespace or control characters)")]
    MalformedApiKey(String),

    #[error("API request failed: {0}")]
    Api(String),

    #[error("Failed to access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize discharge note: {0}")]
    Serialize(#[from] serde_json::Error),
}
