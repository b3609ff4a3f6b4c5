use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "imgproc")]
#[command(about = "Upload images and browse processed results from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL (overrides IMGPROC_API_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds (0 disables)
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the gallery of processed images
    #[command(alias = "list")]
    Gallery {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one image's metadata
    Show {
        /// Image ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Upload an image for processing
    Upload {
        /// Path to the image file
        path: PathBuf,
        /// Declared MIME type (guessed from the extension when omitted)
        #[arg(long, value_name = "MIME")]
        content_type: Option<String>,
        /// Print the local preview data URI before uploading
        #[arg(long)]
        preview: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Open a navigation path such as `/`, `/upload` or `/image/<id>`
    Open {
        /// Route path
        route: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Manage the persisted CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Save `--api-url` (and `--timeout-secs`) to the config file
    Init,
    /// Print the resolved configuration
    Show,
}
