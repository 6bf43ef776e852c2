use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("directory does not exist: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to open {}: {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("photo not found: {0}")]
    PhotoNotFound(i64),

    #[error("archive schema version {db} is newer than supported version {code}")]
    SchemaTooNew { db: i64, code: i64 },
}

pub type Result<T> = std::result::Result<T, Error>;
