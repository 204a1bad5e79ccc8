//! Release command: move pkginfos to production

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::utils::{load_settings, parse_date_arg, resolve_target_args, run_batch};
use super::GlobalArgs;
use crate::batch::apply_to_targets;

#[derive(Args)]
pub struct ReleaseArgs {
    /// force_install_after_date as yyyy-mm-ddThh:mm:ssZ, or '' to remove it
    #[arg(value_name = "DATE")]
    pub date: String,

    /// pkginfo files, or a single file listing one path per line
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,
}

pub fn run(args: ReleaseArgs, global: &GlobalArgs) -> Result<()> {
    let date = parse_date_arg(&args.date)?;
    let config = load_settings(global)?;
    let targets = resolve_target_args(&args.paths)?;
    let production = config.production_catalog;

    run_batch("release", || {
        apply_to_targets(&targets, |pkginfo| {
            pkginfo.set_force_install_after_date(date);
            pkginfo.set_unattended_install(true);
            pkginfo.set_catalog(&production);
        })
    })
}
