use std::path::PathBuf;

use serde::Serialize;

/// A tracked root folder that has been walked for photos.
#[derive(Debug, Clone)]
pub struct RootDirectory {
    pub id: i64,
    pub name: String,
    pub path: PathBuf,
    /// Last index time, unix milliseconds.
    pub indexed_at: i64,
}

/// One row of extracted metadata for a single image file.
///
/// Every metadata field is best-effort: a tag the file does not carry
/// is left at the type's zero value, and nothing distinguishes "tag
/// absent" from "tag is zero". Only `file_dir` and `name` are always
/// populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PhotoRecord {
    pub id: i64,
    pub file_dir: String,
    pub name: String,
    pub camera_make: String,
    pub camera_model: String,
    pub lens_id: String,
    pub width: u32,
    pub height: u32,
    /// Millimeters.
    pub focal_length: f64,
    /// f-number.
    pub aperture: f64,
    /// Reduced rational as a literal string, e.g. "1/250".
    pub shutter_speed: String,
    pub iso: u32,
    /// EXIF DateTime, stored verbatim and never reparsed.
    pub captured_at: String,
}
