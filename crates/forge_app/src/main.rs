mod platform;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use platform::app::{AppOptions, SessionInput};
use platform::logging::LogDestination;

/// Fill in the presentation form and submit it through the submission guard.
#[derive(Parser, Debug)]
#[command(name = "slide_forge")]
struct Cli {
    /// Text to turn into slides.
    #[arg(long, conflicts_with = "text_file")]
    text: Option<String>,
    /// Read the text from a file instead.
    #[arg(long)]
    text_file: Option<PathBuf>,
    /// Optional guidance for tone and structure.
    #[arg(long)]
    guidance: Option<String>,
    /// Template file to upload.
    #[arg(long)]
    template: Option<String>,
    /// Page configuration (RON).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write the effective configuration and exit.
    #[arg(long)]
    write_config: bool,
    #[arg(long, value_enum, default_value_t = LogDestination::Terminal)]
    log: LogDestination,
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let text = match (cli.text, cli.text_file) {
        (Some(text), _) => text,
        (None, Some(path)) => fs::read_to_string(&path)
            .with_context(|| format!("reading text from {}", path.display()))?,
        (None, None) => String::new(),
    };

    platform::run_app(AppOptions {
        config_path: cli.config,
        write_config: cli.write_config,
        log: cli.log,
        verbose: cli.verbose,
        input: SessionInput {
            text,
            guidance: cli.guidance,
            template: cli.template,
        },
    })
}
