//! CLI overrides on top of loaded configuration

use crate::domain::Config;
use std::path::PathBuf;

/// Values given on the command line; `None` leaves the config untouched.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub repo: Option<PathBuf>,
    pub repo_url: Option<String>,
}

pub fn merge_cli_with_config(mut config: Config, cli: &CliOverrides) -> Config {
    if let Some(repo) = &cli.repo {
        config.repo = Some(repo.clone());
    }
    if let Some(url) = &cli.repo_url {
        config.repo_url = Some(url.clone());
    }
    config
}
