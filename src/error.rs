use std::path::PathBuf;

use thiserror::Error;

use crate::word_bank::Tier;

/// Construction-time misconfiguration. Raised once when a session is built,
/// never while it runs.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("stability bounds must satisfy min < max (got min={min}, max={max})")]
    InvalidBounds { min: f64, max: f64 },

    #[error("{field} must be within stability bounds [{min}, {max}] (got {value})")]
    OutOfBounds {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must be a finite, non-negative number (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("combo threshold must be at least 1")]
    ZeroComboThreshold,

    #[error("tick interval must be at least 1ms")]
    ZeroTickInterval,

    #[error("{tier} word set is empty")]
    EmptyWordSet { tier: Tier },

    #[error("{tier} word set has a blank entry at index {index}")]
    BlankWord { tier: Tier, index: usize },

    #[error("word list '{name}' is not embedded")]
    MissingWordList { name: String },

    #[error("word list '{name}' could not be parsed: {reason}")]
    MalformedWordList { name: String, reason: String },
}

/// Failures reading or writing the on-disk config and best score files.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
