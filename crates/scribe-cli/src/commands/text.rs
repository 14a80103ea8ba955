//! Text command - transcript viewing and editing
//!
//! `scribe text show` prints the best available transcript (edited over
//! pipeline output over raw). `scribe text save` uploads an edited
//! transcript from a file or stdin.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use scribe_core::domain::FileId;

use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Subcommand)]
pub enum TextCommand {
    /// Print the transcript of a file
    Show(ShowTextCommand),
    /// Save an edited transcript
    Save(SaveTextCommand),
}

#[derive(Debug, Args)]
pub struct ShowTextCommand {
    /// File id
    pub id: String,
}

#[derive(Debug, Args)]
pub struct SaveTextCommand {
    /// File id
    pub id: String,
    /// Read the transcript from this file instead of stdin
    #[arg(long)]
    pub from: Option<String>,
}

impl TextCommand {
    pub async fn execute(&self, format: OutputFormat, config_path: Option<&str>) -> Result<()> {
        match self {
            TextCommand::Show(cmd) => cmd.execute(format, config_path).await,
            TextCommand::Save(cmd) => cmd.execute(format, config_path).await,
        }
    }
}

impl ShowTextCommand {
    pub async fn execute(&self, format: OutputFormat, config_path: Option<&str>) -> Result<()> {
        let formatter = get_formatter(matches!(format, OutputFormat::Json));
        let config = super::load_config(config_path)?;
        let store = super::build_store(&config)?;
        store.sync_files(false).await?;

        let id = FileId::new(self.id.as_str());
        let record = store.load_text(&id).await?;

        match format {
            OutputFormat::Json => formatter.print_json(&serde_json::json!({
                "id": record.id.as_str(),
                "name": record.name,
                "original_text": record.original_text,
                "processed_text": record.processed_text,
                "edited_text": record.edited_text,
            })),
            OutputFormat::Human => match record.review_text() {
                Some(text) => println!("{text}"),
                None => formatter.info("No transcript available yet"),
            },
        }
        Ok(())
    }
}

impl SaveTextCommand {
    pub async fn execute(&self, format: OutputFormat, config_path: Option<&str>) -> Result<()> {
        let formatter = get_formatter(matches!(format, OutputFormat::Json));
        let config = super::load_config(config_path)?;
        let store = super::build_store(&config)?;
        store.sync_files(false).await?;

        let text = match &self.from {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {path}"))?,
            None => {
                use std::io::Read;
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .context("Failed to read transcript from stdin")?;
                buffer
            }
        };

        let id = FileId::new(self.id.as_str());
        store.save_text(&id, text.trim_end()).await?;
        formatter.success(&format!("Transcript saved for {id}"));
        Ok(())
    }
}
