pub mod schema;

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{PhotoRecord, RootDirectory};
use crate::error::{Error, Result};

/// SQLite-backed store for root directories and photo metadata.
///
/// The connection is owned by whoever constructs the catalog; nothing
/// in the crate reaches for a process-wide handle.
pub struct Catalog {
    conn: Connection,
}

impl Catalog {
    /// Open or create a catalog at the given path with WAL mode.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        schema::initialize(&conn)?;
        schema::migrate(&conn)?;
        Ok(Self { conn })
    }

    /// Open an in-memory catalog (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        schema::initialize(&conn)?;
        schema::migrate(&conn)?;
        Ok(Self { conn })
    }

    // ── Root directories ─────────────────────────────────────────────

    /// Last recorded index time for a root path, in unix milliseconds.
    /// `None` means the path has never been indexed. The path is
    /// canonicalized first: the absolute form is the lookup key.
    pub fn indexed_at(&self, path: &Path) -> Result<Option<i64>> {
        let canonical = path.canonicalize()?;
        let indexed_at = self
            .conn
            .query_row(
                "SELECT indexed_at FROM index_directories WHERE path = ?1",
                params![canonical.to_string_lossy().as_ref()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(indexed_at)
    }

    /// Insert or refresh the row for a root path and return its id.
    ///
    /// SQLite's upsert does not hand back the rowid on the conflict
    /// path, so the id is re-read by the unique path key; the two
    /// statements form one logical operation.
    pub fn upsert_directory(&self, name: &str, path: &Path, indexed_at: i64) -> Result<i64> {
        let canonical = path.canonicalize()?;
        let path_str = canonical.to_string_lossy();

        self.conn.execute(
            "INSERT INTO index_directories (name, path, indexed_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(path) DO UPDATE SET name = excluded.name, indexed_at = excluded.indexed_at",
            params![name, path_str.as_ref(), indexed_at],
        )?;

        let id = self.conn.query_row(
            "SELECT id FROM index_directories WHERE path = ?1",
            params![path_str.as_ref()],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    pub fn list_directories(&self) -> Result<Vec<RootDirectory>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, path, indexed_at FROM index_directories ORDER BY id")?;
        let directories = stmt
            .query_map([], |row| {
                Ok(RootDirectory {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    path: PathBuf::from(row.get::<_, String>(2)?),
                    indexed_at: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(directories)
    }

    // ── Photos ───────────────────────────────────────────────────────

    pub fn insert_photo(&self, directory_id: i64, photo: &PhotoRecord) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO photos (directory_id, file_dir, name, camera_make, camera_model,
             lens_id, width, height, focal_length, aperture, shutter_speed, iso, captured_at)
             VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13)",
            params![
                directory_id,
                photo.file_dir,
                photo.name,
                photo.camera_make,
                photo.camera_model,
                photo.lens_id,
                photo.width,
                photo.height,
                photo.focal_length,
                photo.aperture,
                photo.shutter_speed,
                photo.iso,
                photo.captured_at,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn count_photos(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM photos", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Newest-first page of the photo timeline. Restricted to the
    /// extensions a browser can render, matching what the frontend
    /// expects to display.
    pub fn timeline_page(&self, limit: u32, offset: u32) -> Result<Vec<PhotoRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, file_dir, name, camera_make, camera_model, lens_id, width, height,
                    focal_length, aperture, shutter_speed, iso, captured_at
             FROM photos
             WHERE name LIKE '%.jpg' OR name LIKE '%.jpeg' OR name LIKE '%.png'
             ORDER BY captured_at DESC
             LIMIT ?1 OFFSET ?2",
        )?;
        let photos = stmt
            .query_map(params![limit, offset], |row| {
                Ok(PhotoRecord {
                    id: row.get(0)?,
                    file_dir: row.get(1)?,
                    name: row.get(2)?,
                    camera_make: row.get(3)?,
                    camera_model: row.get(4)?,
                    lens_id: row.get(5)?,
                    width: row.get(6)?,
                    height: row.get(7)?,
                    focal_length: row.get(8)?,
                    aperture: row.get(9)?,
                    shutter_speed: row.get(10)?,
                    iso: row.get(11)?,
                    captured_at: row.get(12)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(photos)
    }

    /// Directory and file name for byte serving a single photo.
    pub fn photo_location(&self, id: i64) -> Result<(String, String)> {
        self.conn
            .query_row(
                "SELECT file_dir, name FROM photos WHERE id = ?1",
                params![id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?
            .ok_or(Error::PhotoNotFound(id))
    }
}
