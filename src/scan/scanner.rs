//! Phase scanner: walks a Munki repo's pkgsinfo tree and collects testing records

use crate::domain::{
    has_record_extension, SkipReason, DEFAULT_RECORDS_DIR, DEFAULT_TESTING_CATALOGS,
    KEY_CATEGORY, KEY_DESCRIPTION, KEY_DEVELOPER, PLACEHOLDER_PREFIX,
};
use crate::pkginfo::{PkgInfo, PkgInfoError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("records directory does not exist: {0}")]
    MissingRecordsDir(PathBuf),
}

/// Fields of a matching record that reports need.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseEntry {
    pub name: String,
    pub display_name: String,
    pub version: String,
    /// Catalog names joined with `", "`.
    pub catalogs: String,
    pub category: String,
    pub description: String,
    pub developer: String,
    pub installer_item_location: String,
    pub path: PathBuf,
}

impl PhaseEntry {
    fn from_pkginfo(pkginfo: &PkgInfo, path: &Path) -> Self {
        let field = |value: Option<&str>| value.unwrap_or_default().to_string();
        Self {
            name: field(pkginfo.name()),
            display_name: field(pkginfo.display_name()),
            version: field(pkginfo.version()),
            catalogs: pkginfo.catalogs().join(", "),
            category: field(pkginfo.get_str(KEY_CATEGORY)),
            description: field(pkginfo.get_str(KEY_DESCRIPTION)),
            developer: field(pkginfo.get_str(KEY_DEVELOPER)),
            installer_item_location: field(pkginfo.installer_item_location()),
            path: path.to_path_buf(),
        }
    }

    /// Name shown in reports: `display_name`, falling back to `name`.
    pub fn label(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Everything a scan found, keyed by identity (`"{name} {version}"`).
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    pub entries: BTreeMap<String, PhaseEntry>,
    pub skipped: Vec<SkippedRecord>,
    /// Keys that had to be disambiguated because of a collision.
    pub duplicates: Vec<String>,
    pub files_visited: usize,
    pub records_parsed: usize,
}

impl ScanReport {
    pub fn records_matched(&self) -> usize {
        self.entries.len()
    }
}

/// Scanner over `<root>/<records_dir>`.
pub struct PhaseScanner {
    root_path: PathBuf,
    records_dir: String,
    testing_catalogs: Vec<String>,
}

impl PhaseScanner {
    pub fn new(root_path: PathBuf) -> Self {
        Self {
            root_path,
            records_dir: DEFAULT_RECORDS_DIR.to_string(),
            testing_catalogs: DEFAULT_TESTING_CATALOGS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Set the records subdirectory (default `pkgsinfo`)
    pub fn records_dir(mut self, dir: String) -> Self {
        self.records_dir = dir;
        self
    }

    /// Set the catalogs that count as testing
    pub fn testing_catalogs(mut self, catalogs: Vec<String>) -> Self {
        self.testing_catalogs = catalogs;
        self
    }

    fn is_testing(&self, pkginfo: &PkgInfo) -> bool {
        pkginfo.catalogs().iter().any(|c| self.testing_catalogs.iter().any(|t| t == c))
    }

    /// Walk the records directory and collect every testing, non-placeholder record.
    ///
    /// Entries are visited in file-name order, so "first seen" on a key
    /// collision is deterministic.
    pub fn scan(&self) -> Result<ScanReport, ScanError> {
        let records_root = self.root_path.join(&self.records_dir);
        if !records_root.is_dir() {
            return Err(ScanError::MissingRecordsDir(records_root));
        }

        let mut report = ScanReport::default();

        let walker = WalkDir::new(&records_root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()));

        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    tracing::warn!("Error walking {}: {}", records_root.display(), err);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            report.files_visited += 1;
            if !has_record_extension(path) {
                continue;
            }

            let pkginfo = match PkgInfo::read(path) {
                Ok(p) => p,
                Err(e) => {
                    let reason = match e {
                        PkgInfoError::NotADictionary(_) => SkipReason::NotADictionary,
                        other => SkipReason::Unreadable(other.to_string()),
                    };
                    tracing::warn!("Skipping {}: {}", path.display(), reason);
                    report.skipped.push(SkippedRecord { path: path.to_path_buf(), reason });
                    continue;
                }
            };
            report.records_parsed += 1;

            if !self.is_testing(&pkginfo) || is_placeholder(&pkginfo) {
                continue;
            }

            insert_entry(&mut report, PhaseEntry::from_pkginfo(&pkginfo, path));
        }

        tracing::debug!(
            "Scanned {} file(s) under {}: {} parsed, {} matched, {} skipped",
            report.files_visited,
            records_root.display(),
            report.records_parsed,
            report.records_matched(),
            report.skipped.len()
        );

        Ok(report)
    }
}

/// Insert under `"{name} {version}"`, disambiguating collisions with the
/// installer item location (then a counter). Every entry is kept.
fn insert_entry(report: &mut ScanReport, entry: PhaseEntry) {
    let base = format!("{} {}", entry.name, entry.version);
    if !report.entries.contains_key(&base) {
        report.entries.insert(base, entry);
        return;
    }

    let located = format!("{} {}", base, entry.installer_item_location);
    let mut key = located.clone();
    let mut n = 2;
    while report.entries.contains_key(&key) {
        key = format!("{} ({})", located, n);
        n += 1;
    }
    tracing::warn!(
        "Duplicate record '{}' at {}; keeping it as '{}'",
        base,
        entry.path.display(),
        key
    );
    report.duplicates.push(key.clone());
    report.entries.insert(key, entry);
}

fn is_placeholder(pkginfo: &PkgInfo) -> bool {
    pkginfo
        .name()
        .and_then(|name| name.get(..PLACEHOLDER_PREFIX.len()))
        .map(|prefix| prefix.eq_ignore_ascii_case(PLACEHOLDER_PREFIX))
        .unwrap_or(false)
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str().map(|s| s.starts_with('.')).unwrap_or(false)
}
