//! Client for the image processing backend.
//!
//! Wraps the two REST routes (`GET /images`, `POST /upload`) and the direct
//! storage write that completes an upload. The backend exposes no
//! single-record route, so lookups by id go through [`ImageApiClient::list_images`].

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::models::{ImageList, ImageRecord, SelectedFile, UploadGrant, UploadGrantRequest};
use crate::transport::{HttpTransport, Transport, TransportRequest, TransportResponse};

const IMAGES_ROUTE: &str = "/images";
const UPLOAD_ROUTE: &str = "/upload";

/// API client generic over its transport.
#[derive(Debug, Clone)]
pub struct ImageApiClient<T = HttpTransport> {
    config: ClientConfig,
    transport: T,
}

impl ImageApiClient<HttpTransport> {
    /// Builds a client backed by `reqwest`, honouring the configured timeout.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.request_timeout())?;
        Ok(Self::new(config, transport))
    }
}

impl<T: Transport> ImageApiClient<T> {
    pub const fn new(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Returns the configuration this client was built with.
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches the full record collection in server order.
    pub async fn list_images(&self) -> Result<Vec<ImageRecord>> {
        let url = self.config.endpoint(IMAGES_ROUTE);
        let response = self
            .transport
            .send(TransportRequest::get(url))
            .await
            .map_err(|error| transport_context("Image list request failed", error))?;
        ensure_success(&response, "Image list request")?;

        let payload = response
            .json::<ImageList>()
            .map_err(|error| Error::Transport(format!("Failed to parse image list response: {error}")))?;
        tracing::debug!(count = payload.images.len(), "fetched image list");
        Ok(payload.images)
    }

    /// Phase one of an upload: ask the backend for a write URL scoped to `file_type`.
    pub async fn request_upload_grant(&self, file_type: &str) -> Result<UploadGrant> {
        let url = self.config.endpoint(UPLOAD_ROUTE);
        let request = TransportRequest::post_json(
            url,
            &UploadGrantRequest {
                file_type: file_type.to_string(),
            },
        )?;
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|error| transport_context("Failed to request upload URL", error))?;
        ensure_success(&response, "Upload URL request")?;

        let grant = response
            .json::<UploadGrant>()
            .map_err(|error| Error::Transport(format!("Failed to parse upload URL response: {error}")))?;
        if grant.upload_url.trim().is_empty() {
            return Err(Error::Transport("Upload URL response was empty".to_string()));
        }
        Ok(grant)
    }

    /// Phase two: write the bytes straight to storage.
    ///
    /// `content_type` must equal the `file_type` the grant was issued for, or
    /// the storage endpoint rejects the write.
    pub async fn transfer_blob(
        &self,
        grant: &UploadGrant,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<()> {
        let request = TransportRequest::put_bytes(&grant.upload_url, content_type, bytes.to_vec());
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|error| transport_context("Upload request failed", error))?;
        ensure_success(&response, "Upload request")
    }

    /// Runs the two-phase upload for a selected file.
    ///
    /// A grant failure returns before any storage write. A failed transfer
    /// leaves the grant unused; it expires server-side.
    pub async fn upload_image(&self, file: &SelectedFile) -> Result<()> {
        let file_type = file.content_type();
        tracing::info!(
            file_name = file.file_name(),
            file_type,
            bytes = file.len(),
            "requesting upload grant"
        );
        let grant = self.request_upload_grant(file_type).await?;
        self.transfer_blob(&grant, file_type, file.bytes()).await?;
        tracing::info!(file_name = file.file_name(), "upload transferred");
        Ok(())
    }
}

fn ensure_success(response: &TransportResponse, label: &str) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }
    Err(Error::Transport(format!(
        "{label} failed with HTTP {}: {}",
        response.status,
        compact_text(&response.text())
    )))
}

fn transport_context(label: &str, error: Error) -> Error {
    match error {
        Error::Transport(message) => Error::Transport(format!("{label}: {message}")),
        other => other,
    }
}

/// Truncate text to at most 180 characters for error messages.
fn compact_text(value: &str) -> String {
    value.trim().chars().take(180).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::{client, images_body, record, Reply, ScriptedTransport, BASE_URL};
    use crate::transport::Method;

    fn png() -> SelectedFile {
        SelectedFile::new("cat.png", Some("image/png"), vec![0x89, b'P', b'N', b'G']).unwrap()
    }

    #[tokio::test(flavor = "current_thread")]
    async fn list_images_preserves_server_order() {
        let records = vec![record("b", Some("b.png")), record("a", Some("a.png"))];
        let transport = ScriptedTransport::new([images_body(&records)]);
        let api = client(&transport);

        let listed = api.list_images().await.unwrap();
        assert_eq!(listed, records);

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(requests[0].url, format!("{BASE_URL}/images"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn list_images_maps_http_errors_to_transport() {
        let transport = ScriptedTransport::new([Reply::Status(502, "bad gateway".to_string())]);
        let api = client(&transport);

        let error = api.list_images().await.unwrap_err();
        assert!(matches!(error, Error::Transport(ref message) if message.contains("HTTP 502")));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn list_images_rejects_malformed_json() {
        let transport = ScriptedTransport::new([Reply::Status(200, "<html>".to_string())]);
        let api = client(&transport);

        let error = api.list_images().await.unwrap_err();
        assert!(matches!(error, Error::Transport(_)));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn upload_image_issues_grant_then_transfer() {
        let transport = ScriptedTransport::new([
            Reply::json(&serde_json::json!({ "uploadUrl": "https://store/obj1" })),
            Reply::Status(200, String::new()),
        ]);
        let api = client(&transport);

        api.upload_image(&png()).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);

        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].url, format!("{BASE_URL}/upload"));
        let body: serde_json::Value =
            serde_json::from_slice(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "fileType": "image/png" }));

        assert_eq!(requests[1].method, Method::PUT);
        assert_eq!(requests[1].url, "https://store/obj1");
        assert_eq!(requests[1].header("Content-Type"), Some("image/png"));
        assert_eq!(requests[1].body.as_deref(), Some(png().bytes()));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn upload_image_skips_transfer_when_grant_fails() {
        let transport = ScriptedTransport::new([Reply::Status(500, "boom".to_string())]);
        let api = client(&transport);

        let error = api.upload_image(&png()).await.unwrap_err();
        assert!(matches!(error, Error::Transport(_)));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn upload_image_reports_rejected_transfer() {
        let transport = ScriptedTransport::new([
            Reply::json(&serde_json::json!({ "uploadUrl": "https://store/obj1" })),
            Reply::Status(403, "SignatureDoesNotMatch".to_string()),
        ]);
        let api = client(&transport);

        let error = api.upload_image(&png()).await.unwrap_err();
        assert!(
            matches!(error, Error::Transport(ref message) if message.contains("SignatureDoesNotMatch"))
        );
    }

    #[tokio::test(flavor = "current_thread")]
    async fn request_upload_grant_rejects_blank_url() {
        let transport =
            ScriptedTransport::new([Reply::json(&serde_json::json!({ "uploadUrl": "  " }))]);
        let api = client(&transport);

        assert!(api.request_upload_grant("image/png").await.is_err());
    }

    #[test]
    fn compact_text_limits_length() {
        assert_eq!(compact_text(&"x".repeat(400)).len(), 180);
        assert_eq!(compact_text("  short  "), "short");
    }
}
