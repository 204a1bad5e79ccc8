//! Config file loading

use crate::domain::Config;
use anyhow::{Context, Result};
use figment::providers::{Env, Serialized};
use figment::Figment;
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix for environment overrides, e.g. `PHASETOOL_REPO=/Volumes/munki_repo`.
pub const ENV_PREFIX: &str = "PHASETOOL_";

/// Load the file and environment layers.
///
/// An explicitly named file must exist and parse. An auto-discovered file that
/// fails to parse is ignored with a warning.
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let from_file = load_file_layer(config_path)?;
    apply_env(from_file)
}

fn load_file_layer(config_path: Option<&Path>) -> Result<Config> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(),
    };

    let Some(config_file) = discovered else {
        return Ok(Config::default());
    };

    let content = match fs::read_to_string(&config_file) {
        Ok(c) => c,
        Err(e) if !config_path_provided => {
            tracing::warn!("Failed reading config file {}: {}", config_file.display(), e);
            return Ok(Config::default());
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed reading config file: {}", config_file.display()))
        }
    };

    match parse_toml_config(&content, &config_file) {
        Ok(cfg) => {
            tracing::debug!("Loaded config from {}", config_file.display());
            Ok(cfg)
        }
        Err(e) if config_path_provided => Err(e),
        Err(e) => {
            tracing::warn!(
                "Failed to parse auto-discovered config {}: {:#}",
                config_file.display(),
                e
            );
            Ok(Config::default())
        }
    }
}

/// Parse TOML config, supporting a nested `[phasetool]` section.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let config_val = match raw.get("phasetool") {
        Some(nested) => nested.clone(),
        None => raw,
    };

    config_val.try_into().with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

/// Overlay `PHASETOOL_*` environment variables on `base`.
pub fn apply_env(base: Config) -> Result<Config> {
    Figment::from(Serialized::defaults(base))
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()
        .context("Invalid PHASETOOL_* environment configuration")
}

fn discover_config() -> Option<PathBuf> {
    let path = dirs::config_dir()?.join("phasetool").join("config.toml");
    path.is_file().then_some(path)
}
