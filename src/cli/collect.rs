//! Collect command: report on pkginfos currently in testing catalogs

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;
use std::path::PathBuf;

use super::utils::load_settings;
use super::GlobalArgs;
use crate::render::write_collect_outputs;
use crate::repo::{resolve_repo, select_backend};
use crate::scan::collect_testing_records;

#[derive(Args)]
pub struct CollectArgs {
    /// Directory to write the Markdown summary and path list into
    #[arg(value_name = "OUTPUT_DIR")]
    pub output: PathBuf,
}

pub fn run(args: CollectArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_settings(global)?;
    let backend = select_backend();
    let repo = resolve_repo(&config, backend.as_ref())?;

    let report = collect_testing_records(&repo, &config)
        .with_context(|| format!("Failed scanning repository {}", repo.display()))?;

    let outputs = write_collect_outputs(&args.output, &report.entries, Local::now().naive_local())?;

    println!("Found {} pkginfo(s) in testing catalogs", report.records_matched());
    println!("  summary: {}", outputs.markdown.display());
    println!("  paths:   {}", outputs.path_list.display());
    if !report.duplicates.is_empty() {
        println!("Duplicate name/version pairs kept under disambiguated keys:");
        for key in &report.duplicates {
            println!("  {}", key);
        }
    }
    if !report.skipped.is_empty() {
        println!("Skipped {} unreadable pkginfo file(s):", report.skipped.len());
        for skipped in &report.skipped {
            println!("  {}: {}", skipped.path.display(), skipped.reason);
        }
    }
    Ok(())
}
