//! Client configuration.
//!
//! A single API base URL (plus an optional request timeout) resolved once at
//! startup and handed to [`crate::api::ImageApiClient`]. Nothing here is
//! process-global; front ends resolve the values (the variable names below
//! included) and pass a `ClientConfig` down.

use std::time::Duration;

use crate::error::{Error, Result};

/// Environment variable holding the API base URL.
pub const API_URL_ENV: &str = "IMGPROC_API_URL";
/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_SECS_ENV: &str = "IMGPROC_TIMEOUT_SECS";

/// Connection settings for the image processing backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_base_url: String,
    request_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Builds a config for an explicit API base URL.
    pub fn new(api_base_url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            api_base_url: normalize_base_url(api_base_url.as_ref())?,
            request_timeout: None,
        })
    }

    /// Sets a per-request timeout applied by the HTTP transport.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Returns the normalized base URL (no trailing slash).
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub const fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// Joins an API route (`/images`) onto the base URL.
    pub fn endpoint(&self, route: &str) -> String {
        format!("{}/{}", self.api_base_url, route.trim_start_matches('/'))
    }
}

/// Parse an optional timeout given in whole seconds. Zero disables the timeout.
pub fn parse_timeout_secs(raw: Option<&str>) -> Result<Option<Duration>> {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };
    let secs = raw
        .parse::<u64>()
        .map_err(|_| Error::Config(format!("timeout must be a whole number of seconds, got '{raw}'")))?;
    Ok((secs > 0).then(|| Duration::from_secs(secs)))
}

/// Normalize optional text by trimming whitespace and removing empties.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Check if a string starts with `http://` or `https://`.
pub fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let base = raw.trim().trim_end_matches('/').to_string();
    if base.is_empty() {
        return Err(Error::Config("API base URL must not be empty".to_string()));
    }
    if !is_http_url(&base) {
        return Err(Error::Config(
            "API base URL must include http:// or https://".to_string(),
        ));
    }
    Ok(base)
}
