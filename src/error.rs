//! Error types for the buildmarines crate

use thiserror::Error;

/// Main error type for the buildmarines crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("learning rate {value} must be within [0.0, 1.0] and finite")]
    InvalidLearningRate { value: f64 },

    #[error("discount factor {value} must be within [0.0, 1.0] and finite")]
    InvalidDiscountFactor { value: f64 },

    #[error("exploration rate {value} must be within [0.0, 1.0] and finite")]
    InvalidExplorationRate { value: f64 },

    #[error("action catalog must not be empty")]
    EmptyActionCatalog,

    #[error("action index {index} is out of range (catalog has {count} actions)")]
    InvalidActionIndex { index: usize, count: usize },

    #[error("screen layer must have non-zero dimensions, got {width}x{height}")]
    InvalidScreenDimensions { width: usize, height: usize },

    #[error("training requires at least one episode")]
    NoEpisodes,

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
