//! Path normalization

use std::path::PathBuf;

/// Expand a leading `~` or `~/` to the user's home directory.
///
/// Paths without a leading tilde, `~user` forms, and systems without a home
/// directory are returned unchanged.
pub fn expand_tilde(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => return PathBuf::from(path),
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest.trim_start_matches('/')),
        None => PathBuf::from(path),
    }
}
