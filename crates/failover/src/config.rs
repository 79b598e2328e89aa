//! Configuration file loading, parsing, and validation
//!
//! The sync operations themselves never see raw input: the loader validates
//! everything here, before any operation is constructed.

use camino::{Utf8Path, Utf8PathBuf};
use failover_core::{Error, Result, RetryConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use url::Url;

/// Configuration file names to search for
const CONFIG_FILE_NAMES: &[&str] = &["failover.yaml", "failover.yml"];

/// A configured sync: where to fetch from, where to fall back to, and how
/// hard to retry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SyncSpec {
    /// Label identifying this sync in log output
    #[serde(default = "default_context")]
    pub context: String,

    /// Remote source to fetch from
    pub source: SourceSpec,

    /// Local data to fall back to; omit to surface fetch failures directly
    #[serde(default)]
    pub fallback: Option<FallbackSpec>,

    /// Retry policy applied to the fetch
    #[serde(default)]
    pub retry: RetryConfig,
}

/// Remote source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SourceSpec {
    /// Endpoint to fetch from (http or https)
    pub url: String,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// Fallback settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FallbackSpec {
    /// Local file holding the backup payload
    pub path: Utf8PathBuf,
}

fn default_context() -> String {
    "sync".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

impl SyncSpec {
    /// Check field-level constraints, reporting every offending field
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.context.trim().is_empty() {
            errors.push("context: must not be empty".to_string());
        }

        match Url::parse(&self.source.url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(format!(
                "source.url: unsupported scheme '{}'",
                url.scheme()
            )),
            Err(e) => errors.push(format!("source.url: {e}")),
        }

        if self.source.timeout_ms == 0 {
            errors.push("source.timeout-ms: must be greater than zero".to_string());
        }

        if let Some(fallback) = &self.fallback {
            if fallback.path.as_str().is_empty() {
                errors.push("fallback.path: must not be empty".to_string());
            }
        }

        if let Err(e) = self.retry.validate() {
            errors.push(format!("retry: {e}"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(errors))
        }
    }
}

/// Loaded and validated sync configuration
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// The parsed sync spec
    pub spec: SyncSpec,

    /// Path to the configuration file
    pub config_path: Utf8PathBuf,
}

impl SyncConfig {
    /// Load configuration from the specified path or search for it
    pub fn load(path: Option<&Utf8Path>) -> Result<Self> {
        let (config_path, content) = if let Some(p) = path {
            let content = fs::read_to_string(p).map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::config_not_found(p.as_str())
                } else {
                    Error::Io(e)
                }
            })?;
            (p.to_owned(), content)
        } else {
            Self::find_config()?
        };

        // Parse YAML
        let spec: SyncSpec = serde_yaml_ng::from_str(&content)?;

        Ok(Self { spec, config_path })
    }

    /// Load and validate configuration
    pub fn load_and_validate(path: Option<&Utf8Path>) -> Result<Self> {
        let config = Self::load(path)?;
        config.spec.validate()?;
        Ok(config)
    }

    /// Find configuration file in current directory or parent directories
    fn find_config() -> Result<(Utf8PathBuf, String)> {
        let cwd = std::env::current_dir().map_err(Error::Io)?;
        let cwd = Utf8PathBuf::try_from(cwd)
            .map_err(|_| Error::invalid_config("Current directory path is not valid UTF-8"))?;

        let mut current = cwd.as_path();

        loop {
            for name in CONFIG_FILE_NAMES {
                let path = current.join(name);
                if path.exists() {
                    let content = fs::read_to_string(&path)?;
                    return Ok((path, content));
                }
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        Err(Error::config_not_found(
            "failover.yaml (searched current and parent directories)",
        ))
    }
}
