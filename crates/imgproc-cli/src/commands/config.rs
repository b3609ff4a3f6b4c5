use std::env;
use std::path::{Path, PathBuf};

use imgproc_core::ClientConfig;
use serde::Serialize;

use crate::cli::ConfigCommands;
use crate::commands::common::print_json;
use crate::config_file::{
    default_config_path, resolve_client_config, CliConfigFile, ConfigOverrides,
};
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct ResolvedConfig {
    pub api_base_url: String,
    pub request_timeout_secs: Option<u64>,
    pub config_path: PathBuf,
}

pub fn run_config(command: &ConfigCommands, overrides: &ConfigOverrides) -> Result<(), CliError> {
    let path = default_config_path()?;
    match command {
        ConfigCommands::Init => {
            let saved = run_config_init(overrides, &path)?;
            println!("Saved {} to {}", saved.api_base_url.unwrap_or_default(), path.display());
            Ok(())
        }
        ConfigCommands::Show => {
            let file = CliConfigFile::load_from_path(&path)?;
            let config = resolve_client_config(overrides, |name| env::var(name).ok(), &file)?;
            print_json(&resolved_config(&config, path))
        }
    }
}

/// Writes the flag values over the existing file at `path`.
pub fn run_config_init(
    overrides: &ConfigOverrides,
    path: &Path,
) -> Result<CliConfigFile, CliError> {
    let Some(url) = overrides.api_url.as_deref() else {
        return Err(CliError::Config("`config init` requires --api-url".to_string()));
    };
    let validated = ClientConfig::new(url)?;

    let mut file = CliConfigFile::load_from_path(path)?;
    file.api_base_url = Some(validated.api_base_url().to_string());
    if let Some(secs) = overrides.timeout_secs {
        file.request_timeout_secs = (secs > 0).then_some(secs);
    }
    file.save_to_path(path)?;
    tracing::info!(path = %path.display(), "config saved");
    Ok(file)
}

pub fn resolved_config(config: &ClientConfig, config_path: PathBuf) -> ResolvedConfig {
    ResolvedConfig {
        api_base_url: config.api_base_url().to_string(),
        request_timeout_secs: config.request_timeout().map(|timeout| timeout.as_secs()),
        config_path,
    }
}
