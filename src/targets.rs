//! Target path resolution: literal pkginfo paths or a manifest listing them

use crate::domain::has_record_extension;
use crate::utils::expand_tilde;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TargetError {
    #[error("failed to read path list {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Characters stripped from both ends of each manifest line.
const MANIFEST_TRIM: &[char] = &['\n', '\r', '\t', ' ', '"', '\''];

/// Turn positional arguments into the list of files to edit.
///
/// A single argument without a pkginfo extension is read as a manifest;
/// anything else is taken literally, in order.
pub fn resolve_targets(args: &[PathBuf]) -> Result<Vec<PathBuf>, TargetError> {
    match args {
        [single] if !has_record_extension(single) => read_manifest(single),
        _ => Ok(args.to_vec()),
    }
}

/// Read a manifest file: one path per line, `#` comments allowed.
pub fn read_manifest(path: &Path) -> Result<Vec<PathBuf>, TargetError> {
    let content = fs::read_to_string(path)
        .map_err(|source| TargetError::Manifest { path: path.to_path_buf(), source })?;
    let targets = parse_manifest(&content);
    tracing::debug!("Read {} target(s) from {}", targets.len(), path.display());
    Ok(targets)
}

pub fn parse_manifest(content: &str) -> Vec<PathBuf> {
    content
        .lines()
        .map(|line| line.trim_matches(MANIFEST_TRIM))
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(expand_tilde)
        .collect()
}
