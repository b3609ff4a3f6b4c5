//! Error types for imgproc-core

use thiserror::Error;

/// Result type alias using imgproc-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in imgproc-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP failure from the API or the storage endpoint
    #[error("Transport error: {0}")]
    Transport(String),

    /// User input rejected before any network call
    #[error("{0}")]
    Validation(String),

    /// Requested record is absent from the fetched collection
    #[error("Image not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// User-facing failure category stored in a failed view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Network, HTTP, or response decoding failure.
    Transport,
    /// Input rejected locally.
    Validation,
    /// Client-derived absence from a fetched collection.
    NotFound,
}

impl Error {
    /// Classify this error for display in a failed view state.
    pub const fn failure_kind(&self) -> FailureKind {
        match self {
            Self::Validation(_) | Self::InvalidInput(_) => FailureKind::Validation,
            Self::NotFound(_) => FailureKind::NotFound,
            Self::Transport(_) | Self::Config(_) | Self::Io(_) | Self::Serialization(_) => {
                FailureKind::Transport
            }
        }
    }
}
