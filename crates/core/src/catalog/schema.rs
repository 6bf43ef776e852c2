use rusqlite::Connection;

use crate::error::{Error, Result};

/// Schema version written by this build of the crate.
const SCHEMA_VERSION: i64 = 1;

pub fn initialize(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS index_directories (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            path        TEXT NOT NULL UNIQUE,
            indexed_at  INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS photos (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            directory_id  INTEGER NOT NULL REFERENCES index_directories(id),
            file_dir      TEXT NOT NULL,
            name          TEXT NOT NULL,
            camera_make   TEXT NOT NULL DEFAULT '',
            camera_model  TEXT NOT NULL DEFAULT '',
            lens_id       TEXT NOT NULL DEFAULT '',
            width         INTEGER NOT NULL DEFAULT 0,
            height        INTEGER NOT NULL DEFAULT 0,
            focal_length  REAL NOT NULL DEFAULT 0,
            aperture      REAL NOT NULL DEFAULT 0,
            shutter_speed TEXT NOT NULL DEFAULT '',
            iso           INTEGER NOT NULL DEFAULT 0,
            captured_at   TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_photos_directory ON photos(directory_id);
        CREATE INDEX IF NOT EXISTS idx_photos_captured_at ON photos(captured_at);

        CREATE TABLE IF NOT EXISTS config (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        ",
    )?;
    Ok(())
}

/// Stamp or verify the schema version. Opening a database written by a
/// newer build is refused rather than risking silent corruption.
pub fn migrate(conn: &Connection) -> Result<()> {
    let version: i64 = conn
        .query_row(
            "SELECT value FROM config WHERE key = 'schema_version'",
            [],
            |row| row.get::<_, String>(0),
        )
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    if version > SCHEMA_VERSION {
        return Err(Error::SchemaTooNew {
            db: version,
            code: SCHEMA_VERSION,
        });
    }

    if version < SCHEMA_VERSION {
        conn.execute(
            "INSERT INTO config (key, value) VALUES ('schema_version', ?1)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![SCHEMA_VERSION.to_string()],
        )?;
    }

    Ok(())
}
