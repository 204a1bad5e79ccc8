//! Repository scanning for records in testing catalogs

use crate::domain::Config;
use std::path::Path;

pub mod scanner;

pub use scanner::{PhaseEntry, PhaseScanner, ScanError, ScanReport, SkippedRecord};

/// Scan `repo_root` with the catalog settings from `config`.
pub fn collect_testing_records(repo_root: &Path, config: &Config) -> Result<ScanReport, ScanError> {
    PhaseScanner::new(repo_root.to_path_buf())
        .records_dir(config.records_dir.clone())
        .testing_catalogs(config.testing_catalogs.clone())
        .scan()
}
