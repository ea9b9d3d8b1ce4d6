use thiserror::Error;

use crate::core::types::EventType;

#[derive(Error, Debug)]
pub enum DreadError {
    #[error("Insufficient training data: {samples} samples, need at least {required}")]
    InsufficientData { samples: usize, required: usize },

    #[error("Unrecognized event: {0}")]
    UnrecognizedEvent(EventType),

    #[error("Out-of-order sample: expected tick {expected}, got {got}")]
    OutOfOrderSample { expected: u64, got: u64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Regression error: {0}")]
    Regression(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, DreadError>;
