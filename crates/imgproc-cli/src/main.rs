//! imgproc CLI - Upload images and browse processed results
//!
//! Drives the gallery, detail and upload views from the terminal.

mod cli;
mod commands;
mod config_file;
mod error;

use clap::Parser;
use imgproc_core::ImageId;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::common::{build_api, CommandStatus};
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::gallery::run_gallery;
use crate::commands::open::{parse_route, run_route};
use crate::commands::show::run_show;
use crate::commands::upload::run_upload;
use crate::config_file::ConfigOverrides;
use crate::error::CliError;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    match run().await {
        Ok(CommandStatus::Success) => {}
        Ok(CommandStatus::ViewFailed) => std::process::exit(1),
        Err(error) => {
            eprintln!("Error: {error}");
            std::process::exit(1);
        }
    }
}

async fn run() -> Result<CommandStatus, CliError> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let overrides = ConfigOverrides {
        api_url: cli.api_url,
        timeout_secs: cli.timeout_secs,
    };

    match cli.command {
        Commands::Gallery { json } => run_gallery(build_api(&overrides)?, json).await,
        Commands::Show { id, json } => {
            let id = id.trim();
            if id.is_empty() {
                return Err(CliError::Core(imgproc_core::Error::InvalidInput(
                    "Image ID cannot be empty".to_string(),
                )));
            }
            run_show(build_api(&overrides)?, ImageId::new(id), json).await
        }
        Commands::Upload {
            path,
            content_type,
            preview,
            json,
        } => {
            run_upload(
                build_api(&overrides)?,
                &path,
                content_type.as_deref(),
                preview,
                json,
            )
            .await
        }
        Commands::Open { route, json } => {
            let route = parse_route(&route)?;
            run_route(build_api(&overrides)?, route, json).await
        }
        Commands::Completions { shell, output } => {
            run_completions(shell, output.as_deref())?;
            Ok(CommandStatus::Success)
        }
        Commands::Config { command } => {
            run_config(&command, &overrides)?;
            Ok(CommandStatus::Success)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "imgproc=debug"
    } else {
        "imgproc=info"
    };
    let filter = EnvFilter::from_default_env();
    let filter = match default_directive.parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
