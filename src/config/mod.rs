mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = ["./linkmeta.toml", "~/.config/linkmeta/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.fetch.timeout_secs == 0 {
        anyhow::bail!("Fetch timeout cannot be 0");
    }

    if config.fetch.backoff_min_ms > config.fetch.backoff_max_ms {
        anyhow::bail!(
            "Backoff window is inverted: min {}ms > max {}ms",
            config.fetch.backoff_min_ms,
            config.fetch.backoff_max_ms
        );
    }

    if config.fetch.user_agent.trim().is_empty() {
        anyhow::bail!("User agent cannot be empty");
    }

    if config.summary.endpoint.trim().is_empty() {
        anyhow::bail!("Summary endpoint cannot be empty");
    }

    if config.summary.min_chars >= config.summary.max_chars {
        anyhow::bail!(
            "Summary min_chars ({}) must be below max_chars ({})",
            config.summary.min_chars,
            config.summary.max_chars
        );
    }

    if config.summary.paragraph_count == 0 {
        anyhow::bail!("Summary paragraph_count cannot be 0");
    }

    if config.fetch.max_redirects == 0 {
        tracing::warn!("Redirects are disabled; redirecting sites will fail to resolve");
    }

    Ok(())
}
