//! Configuration loader
//!
//! Reads the optional TOML file, then applies environment overrides:
//!
//! - `VAULTGATE_MIN_DISPLAY_MS`
//! - `VAULTGATE_SETUP_CHECK_TIMEOUT_MS` (`0` disables the timeout)

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use tracing::debug;
use vg_core::config::timeout_from_millis;
use vg_core::BootstrapConfig;

pub const ENV_MIN_DISPLAY_MS: &str = "VAULTGATE_MIN_DISPLAY_MS";
pub const ENV_SETUP_CHECK_TIMEOUT_MS: &str = "VAULTGATE_SETUP_CHECK_TIMEOUT_MS";

/// Load configuration from a TOML file.
pub fn load_config(config_path: &Path) -> anyhow::Result<BootstrapConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    BootstrapConfig::from_toml(&toml_value)
        .with_context(|| format!("Invalid config file: {}", config_path.display()))
}

/// Like [`load_config`], but a missing file yields the defaults.
pub fn load_config_or_default(config_path: &Path) -> anyhow::Result<BootstrapConfig> {
    if !config_path.exists() {
        debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(BootstrapConfig::default());
    }
    load_config(config_path)
}

pub fn apply_env_overrides(config: BootstrapConfig) -> anyhow::Result<BootstrapConfig> {
    apply_overrides(config, |key| std::env::var(key).ok())
}

fn apply_overrides(
    mut config: BootstrapConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<BootstrapConfig> {
    if let Some(ms) = parse_millis(&lookup, ENV_MIN_DISPLAY_MS)? {
        config.min_display_duration = Duration::from_millis(ms);
    }
    if let Some(ms) = parse_millis(&lookup, ENV_SETUP_CHECK_TIMEOUT_MS)? {
        config.setup_check_timeout = timeout_from_millis(ms);
    }
    Ok(config)
}

fn parse_millis(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> anyhow::Result<Option<u64>> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .with_context(|| format!("{key} must be a number of milliseconds, got {raw:?}")),
    }
}
