use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use shoebox_core::{Archive, IndexOutcome};

pub fn run(archive_path: &Path, path: Option<PathBuf>, name: Option<String>) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => PathBuf::from(prompt("Directory to index: ")?),
    };

    let default_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photos".to_string());

    let name = match name {
        Some(name) => name,
        None => {
            let input = prompt(&format!("Name for this directory [{default_name}]: "))?;
            if input.is_empty() {
                default_name
            } else {
                input
            }
        }
    };

    let archive = Archive::open(archive_path)?;
    match archive.index_directory(&name, &path)? {
        IndexOutcome::Fresh => println!("Already indexed: {}", path.display()),
        IndexOutcome::Indexed { photos } => {
            println!("Indexed {} photos from {}", photos, path.display());
        }
    }
    Ok(())
}

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
