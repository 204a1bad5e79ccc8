//! Locating the Munki repository, mounting it when needed

use crate::domain::Config;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub mod mount;

pub use mount::{select_backend, CommandMount, MountBackend, MountError, UnavailableMount};

/// Resolve the repository root from `config`.
///
/// An existing `repo` path is returned as-is. When it is absent and a
/// `repo_url` is configured, the share is mounted at `repo` through `backend`.
/// Mount failures are fatal.
pub fn resolve_repo(config: &Config, backend: &dyn MountBackend) -> Result<PathBuf> {
    let Some(repo) = config.repo.as_ref() else {
        anyhow::bail!(
            "No repository configured: pass --repo or set repo_path in the munkiimport preferences"
        );
    };

    if repo.is_dir() {
        return Ok(repo.clone());
    }

    let Some(url) = config.repo_url.as_deref() else {
        anyhow::bail!("Repository {} does not exist and no --repo-url is configured", repo.display());
    };

    tracing::info!("Mounting {} at {} using {}", url, repo.display(), backend.name());
    backend
        .mount(url, repo)
        .with_context(|| format!("Failed to mount {} at {}", url, repo.display()))?;

    if !repo.is_dir() {
        anyhow::bail!("Mounted {} but {} is still not a directory", url, repo.display());
    }
    Ok(repo.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::Path;
    use tempfile::TempDir;

    /// Records calls and creates the mount point to simulate a successful mount.
    struct FakeMount {
        calls: RefCell<Vec<(String, PathBuf)>>,
    }

    impl MountBackend for FakeMount {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn mount(&self, url: &str, mount_point: &Path) -> Result<(), MountError> {
            self.calls.borrow_mut().push((url.to_string(), mount_point.to_path_buf()));
            std::fs::create_dir_all(mount_point).map_err(MountError::Io)
        }
    }

    fn config(repo: Option<PathBuf>, repo_url: Option<&str>) -> Config {
        Config { repo, repo_url: repo_url.map(str::to_string), ..Config::default() }
    }

    #[test]
    fn existing_repo_is_used_without_mounting() {
        let tmp = TempDir::new().expect("tmp");
        let backend = FakeMount { calls: RefCell::new(Vec::new()) };
        let repo = resolve_repo(&config(Some(tmp.path().to_path_buf()), Some("smb://x/y")), &backend)
            .expect("resolve");
        assert_eq!(repo, tmp.path());
        assert!(backend.calls.borrow().is_empty());
    }

    #[test]
    fn absent_repo_is_mounted_from_url() {
        let tmp = TempDir::new().expect("tmp");
        let mount_point = tmp.path().join("munki_repo");
        let backend = FakeMount { calls: RefCell::new(Vec::new()) };
        let repo = resolve_repo(
            &config(Some(mount_point.clone()), Some("smb://server/munki_repo")),
            &backend,
        )
        .expect("resolve");
        assert_eq!(repo, mount_point);
        assert_eq!(
            backend.calls.borrow().as_slice(),
            &[("smb://server/munki_repo".to_string(), mount_point)]
        );
    }

    #[test]
    fn mount_failure_is_fatal() {
        let tmp = TempDir::new().expect("tmp");
        let result = resolve_repo(
            &config(Some(tmp.path().join("missing")), Some("smb://server/share")),
            &UnavailableMount,
        );
        let err = result.expect_err("mount should fail");
        assert!(format!("{:#}", err).contains("no mount helper"));
    }

    #[test]
    fn missing_repo_without_url_is_an_error() {
        let tmp = TempDir::new().expect("tmp");
        assert!(resolve_repo(&config(Some(tmp.path().join("missing")), None), &UnavailableMount)
            .is_err());
        assert!(resolve_repo(&config(None, None), &UnavailableMount).is_err());
    }
}
