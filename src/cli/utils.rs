//! Shared CLI utilities.

use super::GlobalArgs;
use crate::config::{apply_munki_prefs, load_config, merge_cli_with_config, CliOverrides};
use crate::domain::{BatchReport, Config};
use crate::pkginfo::{parse_install_date, PkgInfoError};
use crate::targets::resolve_targets;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::path::PathBuf;

/// Merge config file, environment, Munki preferences and CLI flags.
pub fn load_settings(global: &GlobalArgs) -> Result<Config> {
    let config = load_config(global.config.as_deref())?;
    let config = apply_munki_prefs(config, global.prefs.as_deref())?;
    let overrides = CliOverrides { repo: global.repo.clone(), repo_url: global.repo_url.clone() };
    Ok(merge_cli_with_config(config, &overrides))
}

/// Validate a date argument; empty means "remove the date".
pub fn parse_date_arg(date: &str) -> Result<Option<NaiveDateTime>> {
    Ok(parse_install_date(date)?)
}

pub fn resolve_target_args(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let targets = resolve_targets(paths)?;
    if targets.is_empty() {
        tracing::warn!("No pkginfo files given; nothing to do");
    }
    Ok(targets)
}

/// Print a one-line summary plus one line per skipped file.
pub fn print_batch_summary(report: &BatchReport) {
    let skipped: Vec<_> = report.skipped().collect();
    println!("Updated {} file(s), skipped {}", report.updated(), skipped.len());
    for (path, reason) in skipped {
        println!("  skipped {}: {}", path.display(), reason);
    }
}

/// Runs `batch` and prints its summary.
pub fn run_batch<F>(command: &str, batch: F) -> Result<()>
where
    F: FnOnce() -> std::result::Result<BatchReport, PkgInfoError>,
{
    let report = batch().with_context(|| format!("{} aborted while writing pkginfo files", command))?;
    print_batch_summary(&report);
    Ok(())
}
