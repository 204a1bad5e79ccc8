//! Bulk command: set or remove any key

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::utils::{resolve_target_args, run_batch};
use crate::batch::apply_to_targets;
use crate::pkginfo::{parse_bulk_value, BulkValue};

#[derive(Args)]
pub struct BulkArgs {
    /// Key to change
    #[arg(value_name = "KEY")]
    pub key: String,

    /// New value ('-' removes the key). true/false, dates and integers are typed.
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,

    /// pkginfo files, or a single file listing one path per line
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,
}

pub fn run(args: BulkArgs) -> Result<()> {
    if args.key.trim().is_empty() {
        anyhow::bail!("Key must not be empty");
    }
    let value = parse_bulk_value(&args.value);
    let targets = resolve_target_args(&args.paths)?;

    run_batch("bulk", || {
        apply_to_targets(&targets, |pkginfo| match &value {
            BulkValue::Set(v) => pkginfo.set_key(&args.key, v.clone()),
            BulkValue::Remove => {
                if !pkginfo.remove_key(&args.key) {
                    tracing::debug!("Key '{}' was not present", args.key);
                }
            }
        })
    })
}
