use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] imgproc_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Unknown route: {0}")]
    UnknownRoute(String),
    #[error(
        "API base URL is not configured. Pass --api-url, set IMGPROC_API_URL, or run `imgproc config init --api-url <URL>`."
    )]
    NotConfigured,
}
