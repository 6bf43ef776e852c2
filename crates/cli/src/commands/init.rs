use std::path::Path;

use anyhow::Result;
use shoebox_core::Archive;

pub fn run(archive_path: &Path) -> Result<()> {
    Archive::open(archive_path)?;
    println!("Archive initialized at {}", archive_path.display());
    Ok(())
}
