//! Display formatting shared by the gallery and detail views.

use chrono::{DateTime, Utc};

use crate::models::parse_timestamp;

/// Image shown when a record has no usable URL.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";
/// Shown for any missing metadata value.
pub const NOT_AVAILABLE: &str = "N/A";
/// Status caption for records the backend has not finished processing.
pub const PROCESSING_CAPTION: &str = "Processing...";

const KIB_BYTES: u64 = 1024;

pub fn image_url_or_placeholder(url: Option<&str>) -> String {
    url.map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(PLACEHOLDER_IMAGE)
        .to_string()
}

/// Non-blank text or `fallback`.
pub fn text_or(value: Option<&str>, fallback: &str) -> String {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

pub fn format_date(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d").to_string()
}

pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Calendar date of a raw timestamp; unparseable values are shown as received.
/// Blank or missing values yield `None`.
pub fn format_day(raw: Option<&str>) -> Option<String> {
    let raw = raw.map(str::trim).filter(|raw| !raw.is_empty())?;
    Some(parse_timestamp(raw).map_or_else(|| raw.to_string(), format_date))
}

/// Format a raw timestamp; unparseable values are shown as received.
pub fn format_timestamp(raw: Option<&str>) -> String {
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => parse_timestamp(raw).map_or_else(|| raw.to_string(), format_datetime),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Whole kibibytes, rounded to nearest. Zero or missing sizes are `N/A`.
pub fn format_kilobytes(size_bytes: Option<u64>) -> String {
    match size_bytes.filter(|bytes| *bytes > 0) {
        Some(bytes) => {
            let rounded = bytes / KIB_BYTES + u64::from(bytes % KIB_BYTES >= KIB_BYTES / 2);
            format!("{rounded} KB")
        }
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_dimensions(dimensions: Option<(u32, u32)>) -> String {
    match dimensions.filter(|(width, height)| *width > 0 && *height > 0) {
        Some((width, height)) => format!("{width} × {height}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_kilobytes_rounds_to_nearest() {
        assert_eq!(format_kilobytes(Some(204_800)), "200 KB");
        assert_eq!(format_kilobytes(Some(1535)), "1 KB");
        assert_eq!(format_kilobytes(Some(1536)), "2 KB");
        assert_eq!(format_kilobytes(Some(0)), "N/A");
        assert_eq!(format_kilobytes(None), "N/A");
    }

    #[test]
    fn format_kilobytes_survives_largest_sizes() {
        assert_eq!(format_kilobytes(Some(u64::MAX)), "18014398509481984 KB");
        assert_eq!(format_kilobytes(Some(u64::MAX - 511)), "18014398509481984 KB");
        assert_eq!(format_kilobytes(Some(511)), "0 KB");
        assert_eq!(format_kilobytes(Some(512)), "1 KB");
    }

    #[test]
    fn format_day_falls_back_to_raw_text() {
        assert_eq!(format_day(Some("2024-01-01T10:00:00Z")).as_deref(), Some("2024-01-01"));
        assert_eq!(format_day(Some("2024-01-01 10:00:00")).as_deref(), Some("2024-01-01"));
        assert_eq!(format_day(Some("Jan 1st")).as_deref(), Some("Jan 1st"));
        assert_eq!(format_day(Some(" ")), None);
        assert_eq!(format_day(None), None);
    }

    #[test]
    fn format_dimensions_requires_both_axes() {
        assert_eq!(format_dimensions(Some((1024, 768))), "1024 × 768");
        assert_eq!(format_dimensions(Some((0, 768))), "N/A");
        assert_eq!(format_dimensions(None), "N/A");
    }

    #[test]
    fn format_timestamp_handles_missing_and_garbage() {
        assert_eq!(
            format_timestamp(Some("2024-01-01T00:00:00Z")),
            "2024-01-01 00:00:00 UTC"
        );
        assert_eq!(format_timestamp(Some("someday")), "someday");
        assert_eq!(format_timestamp(None), "N/A");
    }

    #[test]
    fn image_url_or_placeholder_skips_blank() {
        assert_eq!(image_url_or_placeholder(Some("  ")), PLACEHOLDER_IMAGE);
        assert_eq!(image_url_or_placeholder(None), PLACEHOLDER_IMAGE);
        assert_eq!(image_url_or_placeholder(Some("https://x/y.png")), "https://x/y.png");
    }
}
