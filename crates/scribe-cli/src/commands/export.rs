//! Export command - download the reviewed transcript bundle
//!
//! Fetches the DOCX and PDF renditions of a file's reviewed transcript as
//! one ZIP archive and writes it to disk.

use anyhow::{Context, Result};
use clap::Args;

use scribe_core::domain::FileId;

use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Args)]
pub struct ExportCommand {
    /// File id to export
    pub id: String,
    /// Write the archive here instead of the server-suggested name
    #[arg(long)]
    pub out: Option<String>,
}

impl ExportCommand {
    pub async fn execute(&self, format: OutputFormat, config_path: Option<&str>) -> Result<()> {
        let formatter = get_formatter(matches!(format, OutputFormat::Json));
        let config = super::load_config(config_path)?;
        let store = super::build_store(&config)?;
        store.sync_files(false).await?;

        let id = FileId::new(self.id.as_str());
        let archive = store.export_file(&id).await?;

        let target = self.out.clone().unwrap_or(archive.file_name);
        std::fs::write(&target, &archive.bytes)
            .with_context(|| format!("Failed to write {target}"))?;

        formatter.success(&format!(
            "Exported {} ({} bytes) to {target}",
            id,
            archive.bytes.len()
        ));
        Ok(())
    }
}
