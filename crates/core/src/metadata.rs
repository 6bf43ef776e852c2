use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use exif::{In, Tag, Value};

use crate::domain::PhotoRecord;
use crate::error::{Error, Result};
use crate::rational;

/// Outcome of looking at one walked file.
#[derive(Debug)]
pub enum Extraction {
    /// A recognized image, with whatever metadata could be read.
    Photo(PhotoRecord),
    /// The extension does not map to an `image/*` MIME type. This is a
    /// filtering decision, not an error; the caller skips silently.
    NotAnImage,
}

/// Read a file's embedded capture metadata into a [`PhotoRecord`].
///
/// The directory and file-name fields come from path decomposition and
/// are always set. Everything else is best-effort: a file with no
/// readable EXIF block still yields a record, and each tag is read
/// independently so one unreadable field never blocks the others.
/// Only a failure to open the file at all is an error.
pub fn extract(path: &Path) -> Result<Extraction> {
    let mut record = PhotoRecord {
        file_dir: path
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default(),
        name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        ..PhotoRecord::default()
    };

    // MIME by extension only; no content sniffing.
    let is_image = mime_guess::from_path(path)
        .first()
        .is_some_and(|m| m.type_() == mime_guess::mime::IMAGE);
    if !is_image {
        return Ok(Extraction::NotAnImage);
    }

    let file = File::open(path).map_err(|source| Error::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);

    let Ok(meta) = exif::Reader::new().read_from_container(&mut reader) else {
        // No decodable EXIF block. Still a photo; only the
        // deterministic path fields are populated.
        return Ok(Extraction::Photo(record));
    };

    record.camera_make = ascii_field(&meta, Tag::Make).unwrap_or_default();
    record.camera_model = ascii_field(&meta, Tag::Model).unwrap_or_default();
    record.lens_id = ascii_field(&meta, Tag::LensModel).unwrap_or_default();
    record.width = uint_field(&meta, Tag::PixelXDimension).unwrap_or_default();
    record.height = uint_field(&meta, Tag::PixelYDimension).unwrap_or_default();
    record.focal_length = rational_field(&meta, Tag::FocalLength)
        .map(|(num, den)| f64::from(num) / f64::from(den))
        .unwrap_or_default();
    record.aperture = rational_field(&meta, Tag::FNumber)
        .map(|(num, den)| f64::from(num) / f64::from(den))
        .unwrap_or_default();
    record.shutter_speed = rational_field(&meta, Tag::ExposureTime)
        .map(|(num, den)| {
            let (num, den) = rational::reduce(num, den);
            format!("{num}/{den}")
        })
        .unwrap_or_default();
    record.iso = uint_field(&meta, Tag::PhotographicSensitivity).unwrap_or_default();
    record.captured_at = ascii_field(&meta, Tag::DateTime).unwrap_or_default();

    Ok(Extraction::Photo(record))
}

fn ascii_field(meta: &exif::Exif, tag: Tag) -> Option<String> {
    match &meta.get_field(tag, In::PRIMARY)?.value {
        Value::Ascii(chunks) => chunks
            .first()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned()),
        _ => None,
    }
}

fn uint_field(meta: &exif::Exif, tag: Tag) -> Option<u32> {
    meta.get_field(tag, In::PRIMARY)?.value.get_uint(0)
}

/// A rational tag with a zero denominator is unusable and treated as
/// absent.
fn rational_field(meta: &exif::Exif, tag: Tag) -> Option<(u32, u32)> {
    match &meta.get_field(tag, In::PRIMARY)?.value {
        Value::Rational(rationals) => rationals
            .first()
            .filter(|r| r.denom != 0)
            .map(|r| (r.num, r.denom)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use exif::experimental::Writer;
    use exif::{Field, Rational};

    fn ascii(tag: Tag, text: &str) -> Field {
        Field {
            tag,
            ifd_num: In::PRIMARY,
            value: Value::Ascii(vec![text.as_bytes().to_vec()]),
        }
    }

    fn rational(tag: Tag, num: u32, den: u32) -> Field {
        Field {
            tag,
            ifd_num: In::PRIMARY,
            value: Value::Rational(vec![Rational { num, denom: den }]),
        }
    }

    fn short(tag: Tag, value: u16) -> Field {
        Field {
            tag,
            ifd_num: In::PRIMARY,
            value: Value::Short(vec![value]),
        }
    }

    /// Write a minimal TIFF container holding the given EXIF fields.
    fn write_exif_file(path: &Path, fields: &[Field]) {
        let mut writer = Writer::new();
        for field in fields {
            writer.push_field(field);
        }
        let mut cursor = Cursor::new(Vec::new());
        writer.write(&mut cursor, false).unwrap();
        std::fs::write(path, cursor.into_inner()).unwrap();
    }

    fn photo(extraction: Extraction) -> PhotoRecord {
        match extraction {
            Extraction::Photo(record) => record,
            Extraction::NotAnImage => panic!("expected a photo"),
        }
    }

    #[test]
    fn test_non_image_extension_is_filtered() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("notes.txt");
        std::fs::write(&path, b"not a photo").unwrap();

        assert!(matches!(extract(&path).unwrap(), Extraction::NotAnImage));
    }

    #[test]
    fn test_unopenable_file_is_an_error() {
        let err = extract(Path::new("/nonexistent/photo.jpg")).unwrap_err();
        assert!(matches!(err, Error::FileOpen { .. }));
    }

    #[test]
    fn test_undecodable_image_keeps_path_fields() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("garbage.jpg");
        std::fs::write(&path, b"definitely not a JPEG").unwrap();

        let record = photo(extract(&path).unwrap());
        assert_eq!(record.name, "garbage.jpg");
        assert_eq!(record.file_dir, tmp.path().to_string_lossy());
        assert_eq!(record.camera_make, "");
        assert_eq!(record.width, 0);
        assert_eq!(record.shutter_speed, "");
    }

    #[test]
    fn test_full_extraction() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("full.tif");
        write_exif_file(
            &path,
            &[
                ascii(Tag::Make, "Canon"),
                ascii(Tag::Model, "EOS R5"),
                ascii(Tag::LensModel, "RF 35mm F1.8"),
                Field {
                    tag: Tag::PixelXDimension,
                    ifd_num: In::PRIMARY,
                    value: Value::Long(vec![8192]),
                },
                Field {
                    tag: Tag::PixelYDimension,
                    ifd_num: In::PRIMARY,
                    value: Value::Long(vec![5464]),
                },
                rational(Tag::FocalLength, 35, 1),
                rational(Tag::FNumber, 9, 5),
                rational(Tag::ExposureTime, 2, 500),
                short(Tag::PhotographicSensitivity, 400),
                ascii(Tag::DateTime, "2024:06:01 14:03:22"),
            ],
        );

        let record = photo(extract(&path).unwrap());
        assert_eq!(record.camera_make, "Canon");
        assert_eq!(record.camera_model, "EOS R5");
        assert_eq!(record.lens_id, "RF 35mm F1.8");
        assert_eq!(record.width, 8192);
        assert_eq!(record.height, 5464);
        assert!((record.focal_length - 35.0).abs() < f64::EPSILON);
        assert!((record.aperture - 1.8).abs() < 1e-9);
        assert_eq!(record.shutter_speed, "1/250");
        assert_eq!(record.iso, 400);
        assert_eq!(record.captured_at, "2024:06:01 14:03:22");
    }

    #[test]
    fn test_missing_tag_leaves_zero_value() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("no_lens.tif");
        write_exif_file(
            &path,
            &[
                ascii(Tag::Make, "Nikon"),
                rational(Tag::ExposureTime, 1, 60),
            ],
        );

        let record = photo(extract(&path).unwrap());
        assert_eq!(record.camera_make, "Nikon");
        assert_eq!(record.shutter_speed, "1/60");
        // No lens tag written; the field stays at its zero value.
        assert_eq!(record.lens_id, "");
        assert_eq!(record.iso, 0);
        assert_eq!(record.captured_at, "");
    }

    #[test]
    fn test_zero_denominator_rational_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bad_ratio.tif");
        write_exif_file(
            &path,
            &[
                rational(Tag::FocalLength, 50, 0),
                rational(Tag::ExposureTime, 1, 0),
            ],
        );

        let record = photo(extract(&path).unwrap());
        assert_eq!(record.focal_length, 0.0);
        assert_eq!(record.shutter_speed, "");
    }

    #[test]
    fn test_shutter_speed_is_reduced() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("shutter.tif");
        write_exif_file(&path, &[rational(Tag::ExposureTime, 10, 1250)]);

        let record = photo(extract(&path).unwrap());
        assert_eq!(record.shutter_speed, "1/125");
    }
}
