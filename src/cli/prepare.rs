//! Prepare command: stage pkginfos for a testing phase

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::utils::{load_settings, parse_date_arg, resolve_target_args, run_batch};
use super::GlobalArgs;
use crate::batch::apply_to_targets;

#[derive(Args)]
pub struct PrepareArgs {
    /// force_install_after_date as yyyy-mm-ddThh:mm:ssZ (e.g. 2011-08-03T13:00:00Z), or '' to remove it
    #[arg(value_name = "DATE")]
    pub date: String,

    /// Catalog to assign, e.g. phase1
    #[arg(value_name = "PHASE")]
    pub phase: String,

    /// pkginfo files, or a single file listing one path per line ('#' comments allowed)
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,
}

pub fn run(args: PrepareArgs, global: &GlobalArgs) -> Result<()> {
    let date = parse_date_arg(&args.date)?;
    let config = load_settings(global)?;
    if !config.testing_catalogs.iter().any(|c| c == &args.phase) {
        tracing::warn!("'{}' is not one of the configured testing catalogs", args.phase);
    }
    let targets = resolve_target_args(&args.paths)?;

    run_batch("prepare", || {
        apply_to_targets(&targets, |pkginfo| {
            pkginfo.set_force_install_after_date(date);
            pkginfo.set_unattended_install(false);
            pkginfo.set_catalog(&args.phase);
        })
    })
}
