//! Local image previews for the upload form.
//!
//! Previews are derived from the selected bytes only and never leave the
//! client.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use serde::Serialize;

pub const MAX_PREVIEW_BYTES: usize = 8 * 1024 * 1024;

#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImagePreview {
    DataUri { mime_type: String, data_uri: String },
    TooLarge { size_bytes: usize, limit_bytes: usize },
}

impl ImagePreview {
    pub fn data_uri(&self) -> Option<&str> {
        match self {
            Self::DataUri { data_uri, .. } => Some(data_uri),
            Self::TooLarge { .. } => None,
        }
    }
}

impl std::fmt::Debug for ImagePreview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DataUri {
                mime_type,
                data_uri,
            } => f
                .debug_struct("DataUri")
                .field("mime_type", mime_type)
                .field("len", &data_uri.len())
                .finish(),
            Self::TooLarge {
                size_bytes,
                limit_bytes,
            } => f
                .debug_struct("TooLarge")
                .field("size_bytes", size_bytes)
                .field("limit_bytes", limit_bytes)
                .finish(),
        }
    }
}

pub fn build_image_preview(mime_type: &str, bytes: &[u8]) -> ImagePreview {
    if bytes.len() > MAX_PREVIEW_BYTES {
        return ImagePreview::TooLarge {
            size_bytes: bytes.len(),
            limit_bytes: MAX_PREVIEW_BYTES,
        };
    }

    let encoded = BASE64_STANDARD.encode(bytes);
    ImagePreview::DataUri {
        mime_type: mime_type.to_string(),
        data_uri: format!("data:{mime_type};base64,{encoded}"),
    }
}
