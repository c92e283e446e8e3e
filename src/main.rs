//! MangaDex CLI - fetch manga data from the MangaDex API
//!
//! Runs one API call through the cached client and prints the decoded
//! record as JSON.

use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use mangadex::cli::{ChapterOutput, Cli, Command, StartupConfig};
use mangadex::MangaDexClient;

/// Sets up logging to stderr, honouring `RUST_LOG` when it is set
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints a record as pretty JSON on stdout
fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Runs the requested API call
async fn run(client: &MangaDexClient, command: &Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Manga { id } => {
            let manga = client.get_manga(*id).await?;
            print_json(&manga)?;
        }
        Command::Chapters { id, .. } => {
            let params = command.chapters_params().unwrap_or_default();
            let page = client.get_chapters(*id, &params).await?;
            print_json(&page)?;
        }
        Command::Covers { id } => {
            let covers = client.get_covers(*id).await?;
            print_json(&covers)?;
        }
        Command::Chapter { id } => {
            let chapter = client.get_chapter(id).await?;
            print_json(&ChapterOutput::new(&chapter))?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    init_tracing(config.log_level);

    let client = MangaDexClient::new(config.client);
    match run(&client, &config.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
