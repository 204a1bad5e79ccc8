//! phasetool: batch-edit Munki pkginfo files and report on phase testing

use anyhow::Result;

fn main() -> Result<()> {
    phasetool::cli::run()
}
