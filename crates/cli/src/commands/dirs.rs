use std::path::Path;

use anyhow::Result;
use shoebox_core::Archive;

pub fn run(archive_path: &Path) -> Result<()> {
    let archive = Archive::open(archive_path)?;
    let directories = archive.directories()?;

    if directories.is_empty() {
        println!("No directories indexed yet. Run `shoebox index` first.");
        return Ok(());
    }

    for dir in directories {
        println!("{:>4}  {}  {}", dir.id, dir.name, dir.path.display());
    }
    Ok(())
}
