mod commands;
mod server;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Shoebox — local photo archive indexer
#[derive(Parser)]
#[command(name = "shoebox", version, about)]
struct Cli {
    /// Path to the archive database
    #[arg(long, default_value_t = default_archive_path())]
    archive: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the archive database and apply the schema
    Init,
    /// Index a directory of photos
    Index {
        /// Directory to index (prompted for when omitted)
        path: Option<PathBuf>,
        /// Display name for the directory (defaults to its basename)
        #[arg(long)]
        name: Option<String>,
    },
    /// List registered root directories
    Dirs,
    /// Start the read-only HTTP API
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = 6969)]
        port: u16,
    },
}

fn default_archive_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home)
        .join(".shoebox")
        .join("shoebox.sqlite")
        .to_string_lossy()
        .to_string()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let archive_path = PathBuf::from(&cli.archive);

    match cli.command {
        Commands::Init => commands::init::run(&archive_path),
        Commands::Index { path, name } => commands::index::run(&archive_path, path, name),
        Commands::Dirs => commands::dirs::run(&archive_path),
        Commands::Serve { port } => commands::serve::run(&archive_path, port),
    }
}
