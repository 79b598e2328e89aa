//! Validate the configuration file

use anyhow::Result;
use camino::Utf8Path;

use crate::cli::ValidateArgs;
use crate::config::SyncConfig;

pub fn run(args: ValidateArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let path = args.file.as_deref().or(config_path);
    let config = SyncConfig::load_and_validate(path)?;
    let spec = &config.spec;

    println!("Configuration OK: {}", config.config_path);
    println!("  context:  {}", spec.context);
    println!(
        "  source:   {} (timeout {}ms)",
        spec.source.url, spec.source.timeout_ms
    );
    match &spec.fallback {
        Some(fallback) => println!("  fallback: {}", fallback.path),
        None => println!("  fallback: none configured"),
    }
    println!(
        "  retry:    {} attempts, {}ms..{}ms backoff",
        spec.retry.max_attempts, spec.retry.min_delay_ms, spec.retry.max_delay_ms
    );

    Ok(())
}
