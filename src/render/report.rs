//! Phase testing report generation.

use crate::scan::PhaseEntry;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const MARKDOWN_SUFFIX: &str = "phase_testing.md";
const PATH_LIST_SUFFIX: &str = "phase_testing_files.txt";

/// Paths written by [`write_collect_outputs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectOutputs {
    pub markdown: PathBuf,
    pub path_list: PathBuf,
}

/// Markdown summary: a month heading, a blank line, then one bullet per entry
/// in key order.
pub fn render_markdown(entries: &BTreeMap<String, PhaseEntry>, now: NaiveDateTime) -> String {
    let mut out = format!("## {} Phase Testing\n\n", now.format("%B"));
    for entry in entries.values() {
        out.push_str(&format!("- {} {}\n", entry.label(), entry.version));
    }
    out
}

/// Newline-separated record paths in key order.
///
/// Paths are written as their raw bytes, so a name that is not valid UTF-8
/// still names the file on disk.
pub fn render_path_list(entries: &BTreeMap<String, PhaseEntry>) -> Vec<u8> {
    let mut out = Vec::new();
    for (i, entry) in entries.values().enumerate() {
        if i > 0 {
            out.push(b'\n');
        }
        out.extend_from_slice(&path_bytes(&entry.path));
    }
    out
}

#[cfg(unix)]
fn path_bytes(path: &Path) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
fn path_bytes(path: &Path) -> Cow<'_, [u8]> {
    if path.to_str().is_none() {
        tracing::warn!("Path is not valid Unicode, writing it lossily: {}", path.display());
    }
    match path.to_string_lossy() {
        Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
        Cow::Owned(s) => Cow::Owned(s.into_bytes()),
    }
}

/// Write `content` to `path`, replacing any existing file.
pub fn write_output(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed creating directory {}", parent.display()))?;
    }
    std::fs::write(path, content).with_context(|| format!("Failed writing {}", path.display()))?;
    Ok(())
}

/// Render both reports into `output_dir`, prefixed with a timestamp taken from `now`.
pub fn write_collect_outputs(
    output_dir: &Path,
    entries: &BTreeMap<String, PhaseEntry>,
    now: NaiveDateTime,
) -> Result<CollectOutputs> {
    let stamp = now.format("%Y%m%d-%H%M%S");
    let outputs = CollectOutputs {
        markdown: output_dir.join(format!("{}-{}", stamp, MARKDOWN_SUFFIX)),
        path_list: output_dir.join(format!("{}-{}", stamp, PATH_LIST_SUFFIX)),
    };

    write_output(&outputs.markdown, render_markdown(entries, now).as_bytes())?;
    write_output(&outputs.path_list, &render_path_list(entries))?;
    Ok(outputs)
}
