//! Error types for the PAHM progress engine.

use thiserror::Error;

/// Result alias used across pahm_core
pub type Result<T> = std::result::Result<T, PahmError>;

#[derive(Error, Debug)]
pub enum PahmError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Unknown T-level: {0}")]
    UnknownLevel(String),

    #[error("Unknown PAHM stage: {0} (expected 1-6)")]
    UnknownStage(u8),

    #[error("Record store error: {0}")]
    Store(String),

    #[error("Computation error: {0}")]
    Computation(String),
}

impl PahmError {
    /// Short machine-readable kind, used in structured log fields
    pub fn kind(&self) -> &'static str {
        match self {
            PahmError::Io(_) => "io",
            PahmError::Json(_) => "json",
            PahmError::ConfigParse(_) => "config_parse",
            PahmError::UnknownLevel(_) => "unknown_level",
            PahmError::UnknownStage(_) => "unknown_stage",
            PahmError::Store(_) => "store",
            PahmError::Computation(_) => "computation",
        }
    }
}
