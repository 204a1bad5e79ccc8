//! phasetool: batch-edit Munki pkginfo files and report on phase testing
//!
//! Sets or removes `force_install_after_date`, `unattended_install`,
//! `catalogs` or any other key across many pkginfo files, and collects the
//! pkginfos sitting in testing catalogs into a Markdown summary.

pub mod batch;
pub mod cli;
pub mod config;
pub mod domain;
pub mod pkginfo;
pub mod render;
pub mod repo;
pub mod scan;
pub mod targets;
pub mod utils;
