//! Shared types, constants and configuration for phasetool.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File extensions recognized as pkginfo records (compared case-insensitively).
pub const RECORD_EXTENSIONS: &[&str] = &["plist", "pkginfo"];

/// Catalogs treated as non-production when collecting phase testing records.
pub const DEFAULT_TESTING_CATALOGS: &[&str] =
    &["development", "testing", "phase1", "phase2", "phase3"];

pub const DEFAULT_PRODUCTION_CATALOG: &str = "production";

/// Subdirectory of a Munki repo holding pkginfo files.
pub const DEFAULT_RECORDS_DIR: &str = "pkgsinfo";

/// Record names starting with this (case-insensitive) are drafts and never reported.
pub const PLACEHOLDER_PREFIX: &str = "placeholder";

pub const KEY_FORCE_INSTALL_AFTER_DATE: &str = "force_install_after_date";
pub const KEY_UNATTENDED_INSTALL: &str = "unattended_install";
pub const KEY_CATALOGS: &str = "catalogs";
pub const KEY_NAME: &str = "name";
pub const KEY_DISPLAY_NAME: &str = "display_name";
pub const KEY_VERSION: &str = "version";
pub const KEY_CATEGORY: &str = "category";
pub const KEY_DESCRIPTION: &str = "description";
pub const KEY_DEVELOPER: &str = "developer";
pub const KEY_INSTALLER_ITEM_LOCATION: &str = "installer_item_location";

/// Returns true when `path` ends in one of [`RECORD_EXTENSIONS`].
pub fn has_record_extension(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| RECORD_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}

/// Effective configuration after merging file, environment, Munki prefs and CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Local path of the Munki repository root.
    pub repo: Option<PathBuf>,
    /// Network share URL to mount when `repo` does not exist locally.
    pub repo_url: Option<String>,
    pub testing_catalogs: Vec<String>,
    pub production_catalog: String,
    pub records_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repo: None,
            repo_url: None,
            testing_catalogs: DEFAULT_TESTING_CATALOGS.iter().map(|s| s.to_string()).collect(),
            production_catalog: DEFAULT_PRODUCTION_CATALOG.to_string(),
            records_dir: DEFAULT_RECORDS_DIR.to_string(),
        }
    }
}

/// Why a file was left untouched during a batch edit or scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Missing,
    NotAFile,
    Unreadable(String),
    NotADictionary,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Missing => write!(f, "file does not exist"),
            SkipReason::NotAFile => write!(f, "not a regular file"),
            SkipReason::Unreadable(msg) => write!(f, "unreadable plist: {}", msg),
            SkipReason::NotADictionary => write!(f, "plist root is not a dictionary"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    Updated,
    Skipped(SkipReason),
}

/// Result of processing a single target file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub status: OutcomeStatus,
}

/// Per-file outcomes of a batch edit, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn updated(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status == OutcomeStatus::Updated).count()
    }

    pub fn skipped(&self) -> impl Iterator<Item = (&PathBuf, &SkipReason)> {
        self.outcomes.iter().filter_map(|o| match &o.status {
            OutcomeStatus::Skipped(reason) => Some((&o.path, reason)),
            OutcomeStatus::Updated => None,
        })
    }
}
