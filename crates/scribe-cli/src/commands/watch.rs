//! Watch command - continuous synchronization loop
//!
//! Runs the poll scheduler in the foreground, printing each noteworthy
//! transition as it happens, until interrupted with Ctrl-C.

use std::time::Duration;

use anyhow::Result;
use clap::Args;
use tracing::info;

use scribe_sync::scheduler::PollScheduler;

use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Args)]
pub struct WatchCommand {
    /// Override the poll interval in seconds
    #[arg(long)]
    pub interval: Option<u64>,
}

impl WatchCommand {
    pub async fn execute(&self, format: OutputFormat, config_path: Option<&str>) -> Result<()> {
        let formatter = get_formatter(matches!(format, OutputFormat::Json));
        let config = super::load_config(config_path)?;
        let store = super::build_store(&config)?;

        let interval = self.interval.unwrap_or(config.sync.poll_interval_secs);
        let scheduler = PollScheduler::new(store.clone(), Duration::from_secs(interval));

        formatter.info(&format!(
            "Watching {} every {interval}s, Ctrl-C to stop",
            config.api.base_url
        ));

        let loop_handle = tokio::spawn(async move { scheduler.run().await });

        tokio::signal::ctrl_c().await?;
        info!("Interrupt received");
        store.shutdown();
        loop_handle.await?;

        formatter.success("Stopped");
        Ok(())
    }
}
