//! CLI command implementations

pub mod export;
pub mod review;
pub mod status;
pub mod text;
pub mod watch;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use scribe_api::{ApiClient, BackendProvider};
use scribe_core::config::Config;
use scribe_sync::notifier::LogNotifier;
use scribe_sync::store::FileStore;

/// Loads configuration, honoring `--config` when given
pub fn load_config(path: Option<&str>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load(std::path::Path::new(path))
            .with_context(|| format!("Failed to load config from {path}"))?,
        None => Config::load_or_default(&Config::default_path()),
    };

    let problems = config.validate();
    if let Some(problem) = problems.first() {
        anyhow::bail!("Invalid configuration: {}: {}", problem.field, problem.message);
    }
    Ok(config)
}

/// Builds the sync store from configuration
///
/// The bearer token is read from the environment variable the config names;
/// an empty token is allowed and simply yields unauthenticated requests.
pub fn build_store(config: &Config) -> Result<Arc<FileStore>> {
    let token = std::env::var(&config.api.token_env).unwrap_or_default();
    let client = ApiClient::with_timeout(
        &config.api.base_url,
        token,
        Duration::from_secs(config.api.request_timeout_secs),
    )?;
    let backend = Arc::new(BackendProvider::new(client));

    Ok(Arc::new(FileStore::new(
        backend,
        Arc::new(LogNotifier),
        config.notifications.enabled,
        config.sync.progress_concurrency,
    )))
}
