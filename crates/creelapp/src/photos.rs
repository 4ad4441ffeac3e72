//! Photo attachments.
//!
//! Uploaded photos are written once under the attachments directory with a name
//! made of the upload time (second resolution) and the sanitized original name:
//! `photos/20240601_063000_big_bass.jpg`. That relative path is the reference stored
//! in a catch's `photo_file` column.
//!
//! Two uploads with the same name in the same second overwrite each other. Deleting a
//! catch leaves its photo in place.

use crate::error::{CreelError, Result};
use crate::store::backend::StorageBackend;
use chrono::NaiveDateTime;
use std::fs;
use std::path::Path;
use tracing::debug;

pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Bytes of an uploaded photo and the name it was uploaded under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    pub bytes: Vec<u8>,
    pub original_name: String,
}

impl PhotoUpload {
    pub fn new(bytes: Vec<u8>, original_name: impl Into<String>) -> Self {
        Self {
            bytes,
            original_name: original_name.into(),
        }
    }

    /// Reads an upload from a local file, keeping its file name.
    pub fn from_path(path: &Path) -> Result<Self> {
        let original_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| CreelError::UnsupportedPhoto(path.display().to_string()))?;
        check_extension(&original_name)?;
        let bytes = fs::read(path)?;
        Ok(Self::new(bytes, original_name))
    }
}

/// Replaces spaces and path separators so the name stays one file inside
/// the photos directory.
pub fn sanitize_name(name: &str) -> String {
    name.trim().replace([' ', '/', '\\'], "_")
}

pub fn photo_file_name(original_name: &str, now: NaiveDateTime) -> String {
    format!(
        "{}_{}",
        now.format("%Y%m%d_%H%M%S"),
        sanitize_name(original_name)
    )
}

/// Only JPEG and PNG are accepted (case-insensitive).
pub fn check_extension(name: &str) -> Result<()> {
    let ext = Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase());
    match ext {
        Some(ext) if ACCEPTED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(CreelError::UnsupportedPhoto(name.to_string())),
    }
}

/// Writes `upload` and returns its reference, or an empty reference when there
/// is nothing to store.
pub fn store_photo<B: StorageBackend>(
    backend: &B,
    upload: Option<&PhotoUpload>,
    now: NaiveDateTime,
) -> Result<String> {
    let Some(upload) = upload.filter(|u| !u.bytes.is_empty()) else {
        return Ok(String::new());
    };
    check_extension(&upload.original_name)?;

    let file_name = photo_file_name(&upload.original_name, now);
    let reference = backend.write_photo(&file_name, &upload.bytes)?;
    debug!(%reference, bytes = upload.bytes.len(), "Stored photo");
    Ok(reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_file_name_is_timestamp_and_sanitized_name() {
        assert_eq!(
            photo_file_name("big bass.jpg", at(6, 30, 0)),
            "20240601_063000_big_bass.jpg"
        );
    }

    #[test]
    fn test_store_returns_relative_reference() {
        let backend = MemBackend::new();
        let upload = PhotoUpload::new(vec![1, 2, 3], "my catch.PNG");
        let reference = store_photo(&backend, Some(&upload), at(21, 15, 9)).unwrap();

        assert_eq!(reference, "photos/20240601_211509_my_catch.PNG");
        assert!(backend.photo_exists(&reference));
        assert_eq!(backend.photo_bytes(&reference), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_separators_in_name_stay_inside_photos_dir() {
        let backend = MemBackend::new();
        let upload = PhotoUpload::new(vec![1], "../trip/a b\\c.jpg");
        let reference = store_photo(&backend, Some(&upload), at(6, 0, 0)).unwrap();

        assert_eq!(reference, "photos/20240601_060000_.._trip_a_b_c.jpg");
        assert_eq!(sanitize_name(" x/y\\z.png "), "x_y_z.png");
    }

    #[test]
    fn test_no_upload_is_a_noop() {
        let backend = MemBackend::new();
        assert_eq!(store_photo(&backend, None, at(0, 0, 0)).unwrap(), "");

        let empty = PhotoUpload::new(Vec::new(), "a.jpg");
        assert_eq!(store_photo(&backend, Some(&empty), at(0, 0, 0)).unwrap(), "");
    }

    #[test]
    fn test_rejects_other_extensions_before_writing() {
        let backend = MemBackend::new();
        let upload = PhotoUpload::new(vec![1], "notes.txt");
        let result = store_photo(&backend, Some(&upload), at(6, 0, 0));

        assert!(matches!(result, Err(CreelError::UnsupportedPhoto(_))));
        assert!(!backend.photo_exists("photos/20240601_060000_notes.txt"));
        assert!(check_extension("no_extension").is_err());
        assert!(check_extension("a.JPEG").is_ok());
    }

    #[test]
    fn test_same_second_same_name_overwrites() {
        let backend = MemBackend::new();
        let first = PhotoUpload::new(vec![1], "a.jpg");
        let second = PhotoUpload::new(vec![2], "a.jpg");
        let r1 = store_photo(&backend, Some(&first), at(6, 0, 0)).unwrap();
        let r2 = store_photo(&backend, Some(&second), at(6, 0, 0)).unwrap();

        assert_eq!(r1, r2);
        assert_eq!(backend.photo_bytes(&r1), Some(vec![2]));
    }

    #[test]
    fn test_upload_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bass 1.jpg");
        fs::write(&path, b"jpeg").unwrap();

        let upload = PhotoUpload::from_path(&path).unwrap();
        assert_eq!(upload.original_name, "bass 1.jpg");
        assert_eq!(upload.bytes, b"jpeg".to_vec());

        let bad = dir.path().join("bass.gif");
        fs::write(&bad, b"gif").unwrap();
        assert!(PhotoUpload::from_path(&bad).is_err());
    }
}
