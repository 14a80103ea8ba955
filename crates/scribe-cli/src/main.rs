//! scribesync CLI - Command-line interface for the transcription pipeline
//!
//! Provides commands for:
//! - Watching the pipeline dashboard with live status notifications
//! - Viewing file status and per-task progress
//! - Approving, rejecting, deleting, and reprocessing uploads
//! - Viewing and editing transcripts

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{
    export::ExportCommand,
    review::{ApproveCommand, DeleteCommand, RejectCommand, RetryCommand},
    status::StatusCommand,
    text::TextCommand,
    watch::WatchCommand,
};
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "scribe", version, about = "Transcription pipeline client")]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Poll the dashboard continuously and announce status changes
    Watch(WatchCommand),
    /// Show the current file list or one file's details
    Status(StatusCommand),
    /// Approve a processed file
    Approve(ApproveCommand),
    /// Reject a processed file
    Reject(RejectCommand),
    /// Delete an uploaded file
    Delete(DeleteCommand),
    /// Requeue a failed file for processing
    Retry(RetryCommand),
    /// View or edit transcripts
    #[command(subcommand)]
    Text(TextCommand),
    /// Download the reviewed transcript as a document archive
    Export(ExportCommand),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Setup tracing
    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };
    let config_path = cli.config.as_deref();

    let result = match cli.command {
        Commands::Watch(cmd) => cmd.execute(format, config_path).await,
        Commands::Status(cmd) => cmd.execute(format, config_path).await,
        Commands::Approve(cmd) => cmd.execute(format, config_path).await,
        Commands::Reject(cmd) => cmd.execute(format, config_path).await,
        Commands::Delete(cmd) => cmd.execute(format, config_path).await,
        Commands::Retry(cmd) => cmd.execute(format, config_path).await,
        Commands::Text(cmd) => cmd.execute(format, config_path).await,
        Commands::Export(cmd) => cmd.execute(format, config_path).await,
    };

    // One rendering point for failures; a nonzero exit lets scripts react
    if let Err(err) = result {
        output::get_formatter(cli.json).error(&format!("{err:#}"));
        std::process::exit(1);
    }
}
