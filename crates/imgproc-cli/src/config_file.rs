//! Persistent CLI configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use imgproc_core::config::{normalize_text_option, parse_timeout_secs, API_URL_ENV, TIMEOUT_SECS_ENV};
use imgproc_core::ClientConfig;
use serde::{Deserialize, Serialize};

use crate::error::CliError;

const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliConfigFile {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

const fn default_config_version() -> u32 {
    1
}

impl Default for CliConfigFile {
    fn default() -> Self {
        Self {
            version: default_config_version(),
            api_base_url: None,
            request_timeout_secs: None,
        }
    }
}

pub fn default_config_path() -> Result<PathBuf, CliError> {
    dirs::config_dir()
        .map(|dir| dir.join("imgproc").join(CONFIG_FILE_NAME))
        .ok_or_else(|| CliError::Config("Failed to resolve CLI config directory".to_string()))
}

impl CliConfigFile {
    pub fn load() -> Result<Self, CliError> {
        Self::load_from_path(&default_config_path()?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|error| {
            CliError::Config(format!("Failed to read config at {}: {}", path.display(), error))
        })?;
        let mut config = serde_json::from_str::<Self>(&raw).map_err(|error| {
            CliError::Config(format!("Failed to parse config at {}: {}", path.display(), error))
        })?;
        config.normalize();
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, CliError> {
        let path = default_config_path()?;
        self.save_to_path(&path)?;
        Ok(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), CliError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                CliError::Config(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    error
                ))
            })?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        let serialized = serde_json::to_string_pretty(&normalized)?;
        std::fs::write(path, serialized).map_err(|error| {
            CliError::Config(format!("Failed to write config at {}: {}", path.display(), error))
        })
    }

    fn normalize(&mut self) {
        self.api_base_url = normalize_text_option(self.api_base_url.take())
            .map(|url| url.trim_end_matches('/').to_string());
    }
}

/// Explicit overrides collected from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Resolve the client configuration: flags, then environment, then file.
///
/// This is the only place `IMGPROC_API_URL` and `IMGPROC_TIMEOUT_SECS` are read.
pub fn resolve_client_config(
    overrides: &ConfigOverrides,
    lookup: impl Fn(&str) -> Option<String>,
    file: &CliConfigFile,
) -> Result<ClientConfig, CliError> {
    let url = normalize_text_option(overrides.api_url.clone())
        .or_else(|| normalize_text_option(lookup(API_URL_ENV)))
        .or_else(|| normalize_text_option(file.api_base_url.clone()))
        .ok_or(CliError::NotConfigured)?;

    let env_timeout = normalize_text_option(lookup(TIMEOUT_SECS_ENV));
    let timeout = match (overrides.timeout_secs, env_timeout) {
        (Some(secs), _) => secs_to_timeout(secs),
        (None, Some(raw)) => parse_timeout_secs(Some(raw.as_str()))?,
        (None, None) => file.request_timeout_secs.and_then(secs_to_timeout),
    };

    Ok(ClientConfig::new(url)?.with_request_timeout(timeout))
}

fn secs_to_timeout(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
