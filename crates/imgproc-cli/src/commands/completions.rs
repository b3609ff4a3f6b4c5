use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::error::CliError;

const BIN_NAME: &str = "imgproc";

/// Writes the completion script for `shell` to `output_path`, or stdout.
pub fn run_completions(shell: Shell, output_path: Option<&Path>) -> Result<(), CliError> {
    match output_path {
        Some(path) => {
            let mut file = BufWriter::new(File::create(path)?);
            write_completions(shell, &mut file);
            file.flush()?;
            tracing::debug!(%shell, path = %path.display(), "completions written");
            println!("{}", path.display());
        }
        None => write_completions(shell, &mut io::stdout().lock()),
    }
    Ok(())
}

pub fn write_completions(shell: Shell, out: &mut impl Write) {
    generate(shell, &mut Cli::command(), BIN_NAME, out);
}
