//! Upload payload and write-grant models

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A local file chosen for upload.
///
/// `content_type` is the declared MIME type. It is sent in the grant request
/// and reused verbatim as the `Content-Type` of the blob transfer.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl SelectedFile {
    /// Wraps in-memory bytes, inferring the content type from the file name
    /// when none is declared. Only `image/*` types are accepted.
    pub fn new(
        file_name: impl Into<String>,
        declared_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<Self> {
        let file_name = file_name.into().trim().to_string();
        if file_name.is_empty() {
            return Err(Error::Validation("File name cannot be empty".to_string()));
        }

        let content_type = infer_image_mime_type(declared_type, &file_name);
        if !content_type.starts_with("image/") {
            return Err(Error::Validation(format!(
                "Only image files can be uploaded (got {content_type})"
            )));
        }

        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    /// Reads a file from disk.
    pub async fn from_path(path: &Path, declared_type: Option<&str>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        Self::new(file_name, declared_type, bytes)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Body of `POST /upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadGrantRequest {
    pub file_type: String,
}

/// Response of `POST /upload`: a single-use, content-type-scoped write URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadGrant {
    pub upload_url: String,
}

/// Resolve the MIME type to declare for a file.
///
/// A non-empty declared type wins unless it is the generic
/// `application/octet-stream`, in which case the extension guess is used.
pub fn infer_image_mime_type(declared_type: Option<&str>, file_name: &str) -> String {
    if let Some(declared) = declared_type {
        let trimmed = declared.trim();
        if !trimmed.is_empty() && !trimmed.eq_ignore_ascii_case("application/octet-stream") {
            return trimmed.to_string();
        }
    }

    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
