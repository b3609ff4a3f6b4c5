//! Processed image record model

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier assigned to a record by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(String);

impl ImageId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ImageId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A server-owned record describing one uploaded image and its processed output.
///
/// Every field except `id` is optional on the wire: a record whose processing
/// has not finished yet has no `processedAt` and usually no processed URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub id: ImageId,
    #[serde(default)]
    pub original_filename: Option<String>,
    #[serde(default)]
    pub original_image_url: Option<String>,
    #[serde(default)]
    pub processed_image_url: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<String>,
    #[serde(default)]
    pub processed_at: Option<String>,
    #[serde(default)]
    pub original_size: Option<u64>,
    #[serde(default)]
    pub processed_size: Option<u64>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl ImageRecord {
    /// Upload timestamp, when present and parseable.
    pub fn uploaded_at_utc(&self) -> Option<DateTime<Utc>> {
        self.uploaded_at.as_deref().and_then(parse_timestamp)
    }

    /// Processing completion timestamp, when present and parseable.
    pub fn processed_at_utc(&self) -> Option<DateTime<Utc>> {
        self.processed_at.as_deref().and_then(parse_timestamp)
    }

    /// Whether the backend has finished processing this record.
    ///
    /// Any non-blank `processedAt` counts, parseable or not.
    pub fn is_processed(&self) -> bool {
        self.processed_at
            .as_deref()
            .is_some_and(|raw| !raw.trim().is_empty())
    }

    /// `processedAt >= uploadedAt` whenever both timestamps are known.
    pub fn timestamps_consistent(&self) -> bool {
        match (self.uploaded_at_utc(), self.processed_at_utc()) {
            (Some(uploaded), Some(processed)) => processed >= uploaded,
            _ => true,
        }
    }

    /// Pixel dimensions when both axes are known.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        Some((self.width?, self.height?))
    }
}

/// Response body of `GET /images`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageList {
    #[serde(default)]
    pub images: Vec<ImageRecord>,
}

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an RFC 3339 timestamp, or a naive datetime/date interpreted as UTC.
///
/// Date-only values resolve to midnight.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}
