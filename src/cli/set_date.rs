//! Set-date command: only touch force_install_after_date

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::utils::{parse_date_arg, resolve_target_args, run_batch};
use crate::batch::apply_to_targets;

#[derive(Args)]
pub struct SetDateArgs {
    /// Date as yyyy-mm-ddThh:mm:ssZ. For example, August 3rd 2011 at 1PM is
    /// 2011-08-03T13:00:00Z. Use '' to remove the key.
    #[arg(value_name = "DATE")]
    pub date: String,

    /// pkginfo files, or a single file listing one path per line
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,
}

pub fn run(args: SetDateArgs) -> Result<()> {
    let date = parse_date_arg(&args.date)?;
    let targets = resolve_target_args(&args.paths)?;

    run_batch("set-date", || {
        apply_to_targets(&targets, |pkginfo| pkginfo.set_force_install_after_date(date))
    })
}
