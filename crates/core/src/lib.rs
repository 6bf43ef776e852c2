pub mod catalog;
pub mod domain;
pub mod error;
pub mod metadata;
pub mod rational;

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{info, warn};

use catalog::Catalog;
use domain::{PhotoRecord, RootDirectory};
use error::{Error, Result};
use metadata::Extraction;

/// Outcome of one indexing pass over a root directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOutcome {
    /// The recorded index time is newer than the directory's mtime;
    /// nothing was walked or written.
    Fresh,
    /// The directory was walked; this many photo rows were written.
    Indexed { photos: usize },
}

/// The main entry point for the shoebox library.
///
/// Owns the store client for its whole lifetime; callers construct it
/// once at startup and pass it where it is needed.
pub struct Archive {
    catalog: Catalog,
}

impl Archive {
    /// Open or create an archive backed by the database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let catalog = Catalog::open(path)?;
        Ok(Self { catalog })
    }

    /// Open an archive over an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let catalog = Catalog::open_in_memory()?;
        Ok(Self { catalog })
    }

    /// Bring the photo rows for one root directory up to date with the
    /// filesystem.
    ///
    /// A root whose recorded index time is strictly newer than its
    /// last-modified time is skipped entirely, which is the only thing
    /// standing between a repeated index call and duplicate rows.
    /// Per-file failures are logged and skipped; a failure of the walk
    /// itself aborts the pass.
    pub fn index_directory(&self, name: &str, path: &Path) -> Result<IndexOutcome> {
        let dir_meta = std::fs::metadata(path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                Error::DirectoryNotFound(path.to_path_buf())
            } else {
                Error::Io(err)
            }
        })?;
        if !dir_meta.is_dir() {
            return Err(Error::NotADirectory(path.to_path_buf()));
        }

        let modified = unix_millis(dir_meta.modified()?);
        if self.catalog.indexed_at(path)?.unwrap_or(0) > modified {
            info!(path = %path.display(), "directory is already indexed");
            return Ok(IndexOutcome::Fresh);
        }

        let now = chrono::Utc::now().timestamp_millis();
        let directory_id = self.catalog.upsert_directory(name, path, now)?;

        let mut photos = 0usize;
        for entry in walkdir::WalkDir::new(path) {
            let entry = entry?;
            if entry.file_type().is_dir() {
                continue;
            }
            match self.add_photo(directory_id, entry.path()) {
                Ok(true) => photos += 1,
                Ok(false) => {}
                Err(err) => warn!(path = %entry.path().display(), "skipping file: {err}"),
            }
        }

        Ok(IndexOutcome::Indexed { photos })
    }

    /// Route one file through the extractor and persist the result.
    /// Returns false when the file was filtered as a non-image.
    fn add_photo(&self, directory_id: i64, path: &Path) -> Result<bool> {
        match metadata::extract(path)? {
            Extraction::NotAnImage => Ok(false),
            Extraction::Photo(record) => {
                self.catalog.insert_photo(directory_id, &record)?;
                Ok(true)
            }
        }
    }

    /// All registered root directories.
    pub fn directories(&self) -> Result<Vec<RootDirectory>> {
        self.catalog.list_directories()
    }

    /// Newest-first page of the timeline; `page` is 1-based.
    pub fn timeline(&self, page: u32, limit: u32) -> Result<Vec<PhotoRecord>> {
        let offset = page.saturating_sub(1).saturating_mul(limit);
        self.catalog.timeline_page(limit, offset)
    }

    /// Directory and file name of a single photo, for byte serving.
    pub fn photo_location(&self, id: i64) -> Result<(String, String)> {
        self.catalog.photo_location(id)
    }

    /// Total photo rows in the archive.
    pub fn photo_count(&self) -> Result<usize> {
        self.catalog.count_photos()
    }
}

fn unix_millis(time: SystemTime) -> i64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
