//! Configuration loading and merging
//!
//! Handles loading from a config file, environment variables, Munki
//! preferences and CLI arguments with proper precedence
//! (CLI > Munki prefs for unset repo fields > Env > File > Defaults).

pub mod loader;
pub mod merge;
pub mod prefs;

pub use loader::load_config;
pub use merge::{merge_cli_with_config, CliOverrides};
pub use prefs::{apply_munki_prefs, default_prefs_path};
