use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the slip analysis host
///
/// The parsing core never produces these: unreadable slips degrade to
/// placeholders instead. Errors only come from externally supplied inputs
/// (configuration, data files, probabilities handed in by a collaborator).
#[derive(Error, Debug)]
pub enum SlipError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Static data errors
    #[error("Data file {path}: {reason}")]
    DataFile { path: PathBuf, reason: String },

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Pricing errors
    #[error("Odds are unknown for this bet")]
    UnknownOdds,

    #[error("Probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),
}

/// Result type alias for SlipError
pub type Result<T> = std::result::Result<T, SlipError>;

impl SlipError {
    pub fn data_file(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        SlipError::DataFile {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
