//! One-shot data source for the master collection
//!
//! The collection is fetched exactly once at startup. There is no retry: a
//! failed or malformed fetch surfaces as a [`LoadError`] and the caller decides
//! what to show.

use super::error::{LoadError, Result};
use super::types::{MediaItem, MediaRecord};
use std::fs;
use std::path::Path;

/// Decode a JSON array of media records
///
/// # Errors
///
/// Returns `LoadError::Malformed` if the text is not a JSON array of records,
/// or `LoadError::InvalidDate` if any record has an unparseable date.
pub fn parse_collection(text: &str) -> Result<Vec<MediaItem>> {
    let records: Vec<MediaRecord> = serde_json::from_str(text)?;
    records.into_iter().map(MediaItem::try_from).collect()
}

/// Read and decode the collection stored at `path`
///
/// # Errors
///
/// Returns `LoadError::Io` if the file cannot be read, otherwise the errors of
/// [`parse_collection`].
pub fn load_collection(path: impl AsRef<Path>) -> Result<Vec<MediaItem>> {
    let path = path.as_ref();
    log::debug!("Loading collection from {}", path.display());
    let text = fs::read_to_string(path)?;
    let items = parse_collection(&text)?;
    log::info!("Loaded {} media items from {}", items.len(), path.display());
    Ok(items)
}

/// Source of the master collection
///
/// Implementations are consumed once; the gallery never calls `fetch` twice.
pub trait DataSource {
    /// Fetch the whole collection
    ///
    /// # Errors
    ///
    /// Returns a `LoadError` describing why the collection is unavailable.
    fn fetch(self) -> Result<Vec<MediaItem>>;
}

/// Data source backed by a JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: std::path::PathBuf,
}

impl JsonFileSource {
    #[must_use]
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for JsonFileSource {
    fn fetch(self) -> Result<Vec<MediaItem>> {
        load_collection(&self.path)
    }
}

impl DataSource for Result<Vec<MediaItem>> {
    fn fetch(self) -> Result<Vec<MediaItem>> {
        self
    }
}

impl DataSource for Vec<MediaItem> {
    fn fetch(self) -> Result<Vec<MediaItem>> {
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PAYLOAD: &str = r#"[
        {"url": "photos/1.jpg", "likes": 40, "comments": 12, "date": "2016-01-20"},
        {"url": "photos/2.jpg", "likes": 125, "comments": 4, "date": "2015-11-03T10:15:00Z"}
    ]"#;

    #[test]
    fn test_parse_collection() {
        let items = parse_collection(PAYLOAD).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].url, "photos/1.jpg");
        assert_eq!(items[1].likes, 125);
    }

    #[test]
    fn test_parse_collection_malformed() {
        let err = parse_collection(r#"{"url": "not an array"}"#).unwrap_err();
        assert!(matches!(err, LoadError::Malformed(_)));

        let err = parse_collection(r#"[{"url": "a.jpg", "likes": "many", "comments": 0, "date": "2016-01-01"}]"#)
            .unwrap_err();
        assert!(matches!(err, LoadError::Malformed(_)));
    }

    #[test]
    fn test_parse_collection_accepts_local_datetimes_and_negative_counts() {
        let items = parse_collection(
            r#"[
                {"url": "a.jpg", "likes": -1, "comments": 0, "date": "2016-06-01T10:15:00"},
                {"url": "b.jpg", "likes": 2, "comments": 1, "date": "2016-06-02"}
            ]"#,
        )
        .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].likes, -1);
        assert_eq!(items[0].created_at.to_rfc3339(), "2016-06-01T10:15:00+00:00");
    }

    #[test]
    fn test_json_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PAYLOAD.as_bytes()).unwrap();

        let items = JsonFileSource::new(file.path()).fetch().unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_json_file_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonFileSource::new(dir.path().join("missing.json"))
            .fetch()
            .unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
