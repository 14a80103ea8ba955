//! Status command - One-shot dashboard view
//!
//! Runs a single sync pass against the backend and prints the file list
//! with per-status counts. With an id, asks the backend for that file's
//! authoritative status instead of trusting the listing alone.

use anyhow::{Context, Result};
use clap::Args;

use scribe_core::domain::FileId;

use crate::output::{get_formatter, record_json, record_line, OutputFormat};

#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Show details for one file id instead of the full list
    pub id: Option<String>,
}

impl StatusCommand {
    pub async fn execute(&self, format: OutputFormat, config_path: Option<&str>) -> Result<()> {
        let formatter = get_formatter(matches!(format, OutputFormat::Json));
        let config = super::load_config(config_path)?;
        let store = super::build_store(&config)?;

        store.sync_files(false).await.context("Sync failed")?;

        if let Some(ref id) = self.id {
            let id = FileId::new(id.as_str());
            let record = store.check_file_status(&id).await?;
            match format {
                OutputFormat::Json => formatter.print_json(&record_json(&record)),
                OutputFormat::Human => {
                    println!("{}", record_line(&record));
                    formatter.info(&format!("Type:     {}", record.file_type));
                    formatter.info(&format!("Subset:   {}", record.subset));
                    formatter.info(&format!("Uploaded: {}", record.uploaded_at.to_rfc3339()));
                    if let Some(uploader) = &record.uploader {
                        formatter.info(&format!("Uploader: {uploader}"));
                    }
                }
            }
            return Ok(());
        }

        let files = store.files().await;
        let stats = store.stats().await;

        match format {
            OutputFormat::Json => {
                let items: Vec<_> = files.iter().map(record_json).collect();
                formatter.print_json(&serde_json::json!({
                    "files": items,
                    "stats": stats,
                }));
            }
            OutputFormat::Human => {
                if files.is_empty() {
                    formatter.info("No files uploaded yet");
                    return Ok(());
                }
                for record in &files {
                    println!("{}", record_line(record));
                }
                println!();
                formatter.info(&format!(
                    "{} total: {} pending, {} processing, {} awaiting review, {} approved, {} rejected, {} unavailable",
                    stats.total,
                    stats.pending,
                    stats.processing,
                    stats.processed,
                    stats.approved,
                    stats.rejected,
                    stats.unavailable
                ));
            }
        }
        Ok(())
    }
}
