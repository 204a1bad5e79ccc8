//! Network share mounting.
//!
//! The backend is chosen once at startup: [`CommandMount`] when a mount helper
//! is installed, [`UnavailableMount`] otherwise.

use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MountError {
    #[error("no mount helper is available on this system")]
    Unavailable,
    #[error("unsupported repository URL '{0}' (expected smb://, afp:// or nfs://)")]
    UnsupportedUrl(String),
    #[error("no helper installed for {0}:// shares")]
    MissingHelper(String),
    #[error("{helper} exited with {status}: {stderr}")]
    Failed { helper: String, status: std::process::ExitStatus, stderr: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Something that can mount a share URL at a local directory.
pub trait MountBackend {
    fn name(&self) -> &'static str;

    fn mount(&self, url: &str, mount_point: &Path) -> Result<(), MountError>;
}

/// Mounts by running the platform helper for the URL scheme.
#[derive(Debug, Clone, Default)]
pub struct CommandMount {
    smb: Option<PathBuf>,
    afp: Option<PathBuf>,
    nfs: Option<PathBuf>,
}

impl CommandMount {
    /// Locate helpers on `PATH`; `None` when none is installed.
    pub fn detect() -> Option<Self> {
        let found = Self {
            smb: which::which("mount_smbfs").ok(),
            afp: which::which("mount_afp").ok(),
            nfs: which::which("mount_nfs").ok(),
        };
        if found.smb.is_none() && found.afp.is_none() && found.nfs.is_none() {
            None
        } else {
            Some(found)
        }
    }

    fn helper_for(&self, scheme: &str) -> Option<&PathBuf> {
        match scheme {
            "smb" | "cifs" => self.smb.as_ref(),
            "afp" => self.afp.as_ref(),
            "nfs" => self.nfs.as_ref(),
            _ => None,
        }
    }
}

impl MountBackend for CommandMount {
    fn name(&self) -> &'static str {
        "command"
    }

    fn mount(&self, url: &str, mount_point: &Path) -> Result<(), MountError> {
        let (scheme, source) = helper_source(url)?;
        let helper =
            self.helper_for(&scheme).ok_or_else(|| MountError::MissingHelper(scheme.clone()))?;

        std::fs::create_dir_all(mount_point)?;
        tracing::debug!("Running {} {} {}", helper.display(), source, mount_point.display());
        let output = Command::new(helper).arg(&source).arg(mount_point).output()?;
        if !output.status.success() {
            return Err(MountError::Failed {
                helper: helper.display().to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

/// Backend used when no helper is installed; every mount fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableMount;

impl MountBackend for UnavailableMount {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    fn mount(&self, _url: &str, _mount_point: &Path) -> Result<(), MountError> {
        Err(MountError::Unavailable)
    }
}

pub fn select_backend() -> Box<dyn MountBackend> {
    match CommandMount::detect() {
        Some(backend) => Box::new(backend),
        None => {
            tracing::debug!("No mount helper found; network repositories cannot be mounted");
            Box::new(UnavailableMount)
        }
    }
}

/// Split a share URL into its scheme and the source argument the helper expects.
fn helper_source(url: &str) -> Result<(String, String), MountError> {
    let (scheme, rest) =
        url.split_once("://").ok_or_else(|| MountError::UnsupportedUrl(url.to_string()))?;
    let scheme = scheme.to_ascii_lowercase();
    if rest.is_empty() {
        return Err(MountError::UnsupportedUrl(url.to_string()));
    }
    let source = match scheme.as_str() {
        "smb" | "cifs" => format!("//{}", rest),
        "afp" => format!("afp://{}", rest),
        "nfs" => match rest.split_once('/') {
            Some((host, export)) => format!("{}:/{}", host, export),
            None => return Err(MountError::UnsupportedUrl(url.to_string())),
        },
        _ => return Err(MountError::UnsupportedUrl(url.to_string())),
    };
    Ok((scheme, source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helper_source_per_scheme() {
        assert_eq!(
            helper_source("smb://user@server/munki_repo").unwrap(),
            ("smb".to_string(), "//user@server/munki_repo".to_string())
        );
        assert_eq!(
            helper_source("AFP://server/repo").unwrap(),
            ("afp".to_string(), "afp://server/repo".to_string())
        );
        assert_eq!(
            helper_source("nfs://server/exports/munki").unwrap(),
            ("nfs".to_string(), "server:/exports/munki".to_string())
        );
    }

    #[test]
    fn helper_source_rejects_unknown_urls() {
        assert!(matches!(helper_source("/Volumes/repo"), Err(MountError::UnsupportedUrl(_))));
        assert!(matches!(helper_source("http://server/repo"), Err(MountError::UnsupportedUrl(_))));
        assert!(matches!(helper_source("smb://"), Err(MountError::UnsupportedUrl(_))));
    }

    #[test]
    fn missing_helper_for_scheme() {
        let backend = CommandMount { smb: Some(PathBuf::from("/sbin/mount_smbfs")), ..Default::default() };
        let err = backend.mount("afp://server/repo", Path::new("/nonexistent")).unwrap_err();
        assert!(matches!(err, MountError::MissingHelper(scheme) if scheme == "afp"));
    }

    #[test]
    fn unavailable_backend_always_fails() {
        assert!(matches!(
            UnavailableMount.mount("smb://server/repo", Path::new("/tmp/x")),
            Err(MountError::Unavailable)
        ));
    }
}
