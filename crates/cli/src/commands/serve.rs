use std::path::Path;

use anyhow::Result;
use shoebox_core::Archive;

pub fn run(archive_path: &Path, port: u16) -> Result<()> {
    let archive = Archive::open(archive_path)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(crate::server::serve(archive, port))
}
