//! Execute the configured sync with retry and fallback
//!
//! The primary operation fetches the configured remote source, wrapped in a
//! retry executor; the fallback reads the configured local file. Both are
//! composed through the flow controller, which surfaces whichever error ran
//! last if everything fails.

use std::time::Duration;

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

use failover_core::retry::TracingObserver;
use failover_core::{no_fallback, FlowController, RetryExecutor};

use crate::cli::RunArgs;
use crate::config::SyncConfig;

/// Failures of the sync operations themselves
///
/// The core passes these through unchanged; whichever operation ran last
/// supplies the error the user sees.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Remote fetch failed (connect, timeout, or HTTP error status)
    #[error("fetching {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Local fallback file could not be read
    #[error("reading fallback {path}: {source}")]
    FallbackRead {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub async fn run(args: RunArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = SyncConfig::load_and_validate(config_path)?;
    let spec = &config.spec;
    tracing::debug!(config = %config.config_path, context = %spec.context, "loaded configuration");

    let executor = RetryExecutor::new(spec.retry.clone())?
        .with_observer(TracingObserver::new(spec.context.clone()))
        .with_jitter(!args.no_jitter);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(spec.source.timeout_ms))
        .build()
        .context("building HTTP client")?;

    let primary = || async {
        executor
            .execute(|| {
                let client = client.clone();
                let url = spec.source.url.clone();
                async move { fetch(&client, &url).await }
            })
            .await
    };

    let fallback = spec.fallback.as_ref().map(|fb| {
        let path = fb.path.clone();
        move || async move { read_local(&path).await }
    });

    let controller = FlowController::new();
    let payload = match fallback {
        Some(op) => controller.execute(&spec.context, primary, Some(op)).await,
        None => controller.execute(&spec.context, primary, no_fallback()).await,
    }
    .with_context(|| format!("sync '{}' failed", spec.context))?;

    println!("{payload}");
    Ok(())
}

/// Fetch the remote source, treating HTTP error statuses as failures
async fn fetch(client: &reqwest::Client, url: &str) -> Result<String, SyncError> {
    let wrap = |source| SyncError::Fetch {
        url: url.to_string(),
        source,
    };

    let response = client.get(url).send().await.map_err(wrap)?;
    let response = response.error_for_status().map_err(wrap)?;
    response.text().await.map_err(wrap)
}

/// Read the local backup payload
async fn read_local(path: &Utf8Path) -> Result<String, SyncError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SyncError::FallbackRead {
            path: path.to_owned(),
            source,
        })
}
