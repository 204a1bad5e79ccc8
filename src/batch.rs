//! Apply one mutation to every target pkginfo and collect per-file outcomes

use crate::domain::{BatchReport, FileOutcome, OutcomeStatus, SkipReason};
use crate::pkginfo::{PkgInfo, PkgInfoError};
use std::path::PathBuf;

/// Read, mutate and rewrite each target in order.
///
/// Missing and unparseable files are recorded as skipped and the batch
/// continues. A failed write aborts the batch.
pub fn apply_to_targets<F>(targets: &[PathBuf], mut mutate: F) -> Result<BatchReport, PkgInfoError>
where
    F: FnMut(&mut PkgInfo),
{
    let mut report = BatchReport::default();

    for path in targets {
        if !path.is_file() {
            let reason = if path.exists() { SkipReason::NotAFile } else { SkipReason::Missing };
            tracing::warn!("Skipping {}: {}", path.display(), reason);
            report.outcomes.push(skipped(path, reason));
            continue;
        }

        let mut pkginfo = match PkgInfo::read(path) {
            Ok(p) => p,
            Err(PkgInfoError::NotADictionary(_)) => {
                tracing::warn!("Skipping {}: plist root is not a dictionary", path.display());
                report.outcomes.push(skipped(path, SkipReason::NotADictionary));
                continue;
            }
            Err(e) => {
                tracing::warn!("Skipping {}", e);
                report.outcomes.push(skipped(path, SkipReason::Unreadable(e.to_string())));
                continue;
            }
        };

        mutate(&mut pkginfo);
        pkginfo.write(path)?;
        tracing::info!("Updated {}", path.display());
        report.outcomes.push(FileOutcome { path: path.clone(), status: OutcomeStatus::Updated });
    }

    Ok(report)
}

fn skipped(path: &std::path::Path, reason: SkipReason) -> FileOutcome {
    FileOutcome { path: path.to_path_buf(), status: OutcomeStatus::Skipped(reason) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plist::{Dictionary, Value};
    use std::fs;
    use tempfile::TempDir;

    fn write_record(path: &std::path::Path, name: &str) {
        let mut dict = Dictionary::new();
        dict.insert("name".to_string(), Value::String(name.to_string()));
        PkgInfo::new(dict).write(path).expect("write fixture");
    }

    #[test]
    fn updates_existing_and_skips_missing() {
        let tmp = TempDir::new().expect("tmp");
        let present = tmp.path().join("Crypt-1.0.pkginfo");
        let missing = tmp.path().join("Gone-1.0.pkginfo");
        write_record(&present, "Crypt");

        let targets = vec![missing.clone(), present.clone()];
        let report = apply_to_targets(&targets, |p| p.set_unattended_install(false))
            .expect("batch");

        assert_eq!(report.updated(), 1);
        assert_eq!(report.outcomes[0].status, OutcomeStatus::Skipped(SkipReason::Missing));
        assert_eq!(report.outcomes[1].status, OutcomeStatus::Updated);
        assert_eq!(PkgInfo::read(&present).expect("read").unattended_install(), Some(false));
    }

    #[test]
    fn directory_target_is_not_reported_as_missing() {
        let tmp = TempDir::new().expect("tmp");
        let dir = tmp.path().join("Crypt-1.0.pkginfo");
        fs::create_dir(&dir).expect("mkdir");

        let report = apply_to_targets(&[dir], |p| p.set_catalog("phase1")).expect("batch");

        assert_eq!(report.updated(), 0);
        assert_eq!(report.outcomes[0].status, OutcomeStatus::Skipped(SkipReason::NotAFile));
        assert_eq!(SkipReason::NotAFile.to_string(), "not a regular file");
    }

    #[test]
    fn unreadable_records_are_reported_not_fatal() {
        let tmp = TempDir::new().expect("tmp");
        let broken = tmp.path().join("Broken.pkginfo");
        let good = tmp.path().join("Good.pkginfo");
        fs::write(&broken, "<plist><dict><key>oops").expect("write broken");
        write_record(&good, "Good");

        let report = apply_to_targets(&[broken.clone(), good], |p| p.set_catalog("phase1"))
            .expect("batch");

        assert_eq!(report.updated(), 1);
        let skipped: Vec<_> = report.skipped().collect();
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].0, &broken);
        assert!(matches!(skipped[0].1, SkipReason::Unreadable(_)));
        // Broken files are left untouched.
        assert_eq!(fs::read_to_string(&broken).expect("reread"), "<plist><dict><key>oops");
    }

    #[test]
    fn same_target_listed_twice_is_processed_twice() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("Crypt-0.7.2.pkginfo");
        write_record(&path, "Crypt");

        let mut calls = 0;
        let report = apply_to_targets(&[path.clone(), path], |_| calls += 1).expect("batch");
        assert_eq!(calls, 2);
        assert_eq!(report.updated(), 2);
    }
}
