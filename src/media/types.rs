//! Media item types
//!
//! - **`MediaItem`**: An immutable, loaded media item. Its `url` is its identity
//!   and doubles as the shareable location identifier.
//! - **`MediaRecord`**: The wire form of an item as delivered by the data source.

use super::error::LoadError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single media item of the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Location of the media, also its identity
    pub url: String,
    /// Number of likes
    pub likes: i64,
    /// Number of comments
    pub comments: i64,
    /// When the item was published
    pub created_at: DateTime<Utc>,
}

impl MediaItem {
    /// Create a new media item
    #[must_use]
    pub fn new(url: impl Into<String>, likes: i64, comments: i64, created_at: DateTime<Utc>) -> Self {
        Self {
            url: url.into(),
            likes,
            comments,
            created_at,
        }
    }

    /// Identifier used in location tokens
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.url
    }
}

/// A record as found in the collection payload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MediaRecord {
    pub url: String,
    pub likes: i64,
    pub comments: i64,
    pub date: String,
}

impl TryFrom<MediaRecord> for MediaItem {
    type Error = LoadError;

    fn try_from(record: MediaRecord) -> Result<Self, Self::Error> {
        let created_at = parse_date(&record.date).ok_or_else(|| LoadError::InvalidDate {
            url: record.url.clone(),
            date: record.date.clone(),
        })?;

        Ok(Self {
            url: record.url,
            likes: record.likes,
            comments: record.comments,
            created_at,
        })
    }
}

/// Parse an RFC 3339 timestamp, an ISO 8601 datetime without offset (UTC) or
/// a plain `YYYY-MM-DD` date (midnight UTC)
#[must_use]
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_plain_date() {
        let parsed = parse_date("2016-01-20").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2016, 1, 20, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let parsed = parse_date("2016-01-20T12:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2016, 1, 20, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_datetime_without_offset() {
        let parsed = parse_date("2016-06-01T10:15:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2016, 6, 1, 10, 15, 0).unwrap());

        let parsed = parse_date("2016-06-01T10:15:00.250").unwrap();
        assert_eq!(parsed.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_record_conversion_keeps_negative_counts() {
        let record = MediaRecord {
            url: "photos/2.jpg".into(),
            likes: -3,
            comments: 0,
            date: "2016-01-20".into(),
        };

        let item = MediaItem::try_from(record).unwrap();
        assert_eq!(item.likes, -3);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_date("yesterday").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn test_record_conversion_rejects_bad_date() {
        let record = MediaRecord {
            url: "photos/1.jpg".into(),
            likes: 3,
            comments: 1,
            date: "20/01/2016".into(),
        };

        let err = MediaItem::try_from(record).unwrap_err();
        assert!(matches!(err, LoadError::InvalidDate { ref url, .. } if url == "photos/1.jpg"));
    }
}
