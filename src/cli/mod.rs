//! Command-line interface for phasetool
//!
//! Provides `collect`, `prepare`, `release`, `bulk` and `set-date` subcommands.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod bulk;
mod collect;
mod prepare;
mod release;
mod set_date;
mod utils;

/// Batch-edit Munki pkginfo files and report on phase testing
#[derive(Parser)]
#[command(name = "phasetool")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalArgs,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Path to the Munki repository root
    #[arg(long, global = true, value_name = "PATH")]
    pub repo: Option<PathBuf>,

    /// Network share to mount at --repo when it does not exist
    #[arg(long, alias = "repo_url", global = true, value_name = "URL")]
    pub repo_url: Option<String>,

    /// Path to a phasetool.toml config file
    #[arg(short = 'c', long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Munki preferences plist to read repo_path/repo_url from
    #[arg(long, global = true, value_name = "FILE")]
    pub prefs: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect pkginfos in testing catalogs into a Markdown summary and path list
    Collect(collect::CollectArgs),

    /// Stage pkginfos for a testing phase
    Prepare(prepare::PrepareArgs),

    /// Release pkginfos to the production catalog
    Release(release::ReleaseArgs),

    /// Set or remove an arbitrary key
    Bulk(bulk::BulkArgs),

    /// Set or remove only force_install_after_date
    SetDate(set_date::SetDateArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Collect(args) => collect::run(args, &cli.global),
        Commands::Prepare(args) => prepare::run(args, &cli.global),
        Commands::Release(args) => release::run(args, &cli.global),
        Commands::Bulk(args) => bulk::run(args),
        Commands::SetDate(args) => set_date::run(args),
    }
}
