//! Error types for scene construction and settings loading

use thiserror::Error;

/// Failure to build a [`Scene`](crate::sim::Scene).
///
/// Both variants are fatal to the scene being built. The caller can retry
/// with relaxed settings (fewer or smaller circles).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// Ranges, count or palette do not fit the viewport
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
    /// Non-overlapping placement ran out of retries
    #[error("placed {placed} of {requested} circles before running out of {attempts} attempts")]
    PlacementExhausted {
        placed: usize,
        requested: usize,
        attempts: u32,
    },
}

impl SceneError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        SceneError::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

/// Failure to read a settings file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error while reading the file
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid settings JSON
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
