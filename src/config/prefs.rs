//! Munki preferences lookup (`com.googlecode.munki.munkiimport.plist`)

use crate::domain::Config;
use crate::utils::expand_tilde;
use anyhow::{Context, Result};
use plist::Value;
use std::path::{Path, PathBuf};

const PREFS_RELATIVE: &str = "Library/Preferences/com.googlecode.munki.munkiimport.plist";
const PREF_REPO_PATH: &str = "repo_path";
const PREF_REPO_URL: &str = "repo_url";

/// `~/Library/Preferences/com.googlecode.munki.munkiimport.plist`, when a home dir is known.
pub fn default_prefs_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(PREFS_RELATIVE))
}

/// Fill `repo`/`repo_url` from munkiimport preferences when they are still unset.
///
/// An explicit `prefs_path` must be readable; the default location is optional.
pub fn apply_munki_prefs(mut config: Config, prefs_path: Option<&Path>) -> Result<Config> {
    if config.repo.is_some() && config.repo_url.is_some() {
        return Ok(config);
    }

    let explicit = prefs_path.is_some();
    let Some(path) = prefs_path.map(Path::to_path_buf).or_else(default_prefs_path) else {
        return Ok(config);
    };

    if !path.is_file() {
        if explicit {
            anyhow::bail!("Preferences file does not exist: {}", path.display());
        }
        tracing::debug!("No Munki preferences at {}", path.display());
        return Ok(config);
    }

    let prefs = match Value::from_file(&path) {
        Ok(Value::Dictionary(dict)) => dict,
        Ok(_) if explicit => anyhow::bail!("Preferences {} is not a dictionary", path.display()),
        Err(e) if explicit => {
            return Err(e).with_context(|| format!("Failed reading preferences {}", path.display()))
        }
        Ok(_) | Err(_) => {
            tracing::warn!("Ignoring unreadable Munki preferences {}", path.display());
            return Ok(config);
        }
    };

    if config.repo.is_none() {
        config.repo = prefs
            .get(PREF_REPO_PATH)
            .and_then(Value::as_string)
            .filter(|s| !s.trim().is_empty())
            .map(expand_tilde);
    }
    if config.repo_url.is_none() {
        config.repo_url = prefs
            .get(PREF_REPO_URL)
            .and_then(Value::as_string)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string);
    }
    Ok(config)
}
