//! Error taxonomy for the decision engine and its collaborators.
//!
//! Everything inside the engine is deterministic: the same inputs always
//! produce the same error. Nothing here is retried; the HTTP layer decides
//! how each variant is reported (see `routes::predict`).

use thiserror::Error;

// ---

/// Errors surfaced by a single evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    // ---
    /// A required field is missing or outside its domain.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The scaler, classifier or label decoder could not produce output.
    #[error("classifier unavailable: {0}")]
    ClassifierUnavailable(String),
}

impl EngineError {
    // ---
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::ClassifierUnavailable(msg.into())
    }
}

/// Errors raised while acquiring or validating model artifacts.
#[derive(Debug, Error)]
pub enum ArtifactError {
    // ---
    #[error("failed to read artifact file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse artifact from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to fetch artifact from '{url}': {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed artifact: {0}")]
    Shape(String),

    #[error("no artifact source succeeded ({})", .attempts.join("; "))]
    AllSourcesFailed { attempts: Vec<String> },
}
