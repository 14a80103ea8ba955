//! Review commands - approve, reject, delete, retry
//!
//! Each command syncs once so the store holds the server's current view,
//! then applies the action through the store so local state and the
//! backend stay in step. Failures propagate to the process exit code so
//! scripts can detect them.

use anyhow::{bail, Result};
use clap::Args;

use scribe_core::domain::FileId;
use scribe_sync::store::FileStore;

use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Args)]
pub struct ApproveCommand {
    /// File id to approve
    pub id: String,
}

#[derive(Debug, Args)]
pub struct RejectCommand {
    /// File id to reject
    pub id: String,
}

#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// File id to delete
    pub id: String,
    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

#[derive(Debug, Args)]
pub struct RetryCommand {
    /// File id to requeue for processing
    pub id: String,
}

async fn synced_store(config_path: Option<&str>) -> Result<std::sync::Arc<FileStore>> {
    let config = super::load_config(config_path)?;
    let store = super::build_store(&config)?;
    store.sync_files(false).await?;
    Ok(store)
}

impl ApproveCommand {
    pub async fn execute(&self, format: OutputFormat, config_path: Option<&str>) -> Result<()> {
        let formatter = get_formatter(matches!(format, OutputFormat::Json));
        let store = synced_store(config_path).await?;
        let id = FileId::new(self.id.as_str());
        store.approve_file(&id).await?;
        formatter.success(&format!("Approved {id}"));
        Ok(())
    }
}

impl RejectCommand {
    pub async fn execute(&self, format: OutputFormat, config_path: Option<&str>) -> Result<()> {
        let formatter = get_formatter(matches!(format, OutputFormat::Json));
        let store = synced_store(config_path).await?;
        let id = FileId::new(self.id.as_str());
        store.reject_file(&id).await?;
        formatter.success(&format!("Rejected {id}"));
        Ok(())
    }
}

impl DeleteCommand {
    pub async fn execute(&self, format: OutputFormat, config_path: Option<&str>) -> Result<()> {
        let formatter = get_formatter(matches!(format, OutputFormat::Json));
        let store = synced_store(config_path).await?;
        let id = FileId::new(self.id.as_str());

        let Some(record) = store.get_file_by_id(&id).await else {
            bail!("No file with id {id}");
        };

        if !self.yes && !confirm(&format!("Delete '{}'? [y/N] ", record.name))? {
            formatter.info("Aborted");
            return Ok(());
        }

        store.delete_file(&id).await?;
        formatter.success(&format!("Deleted {}", record.name));
        Ok(())
    }
}

impl RetryCommand {
    pub async fn execute(&self, format: OutputFormat, config_path: Option<&str>) -> Result<()> {
        let formatter = get_formatter(matches!(format, OutputFormat::Json));
        let store = synced_store(config_path).await?;
        let id = FileId::new(self.id.as_str());
        store.retry_file(&id).await?;
        formatter.success(&format!("Reprocessing requested for {id}"));
        Ok(())
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    use std::io::Write;
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
