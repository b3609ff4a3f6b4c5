//! HTTP transport capability.
//!
//! The API client never talks to `reqwest` directly; it hands fully resolved
//! requests to a [`Transport`]. Production code uses [`HttpTransport`], tests
//! inject a scripted implementation.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
pub use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};

/// A request with an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl TransportRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            headers: vec![("Accept".to_string(), "application/json".to_string())],
            body: None,
        }
    }

    pub fn post_json<T: Serialize>(url: impl Into<String>, body: &T) -> Result<Self> {
        Ok(Self {
            method: Method::POST,
            url: url.into(),
            headers: vec![
                ("Accept".to_string(), "application/json".to_string()),
                (CONTENT_TYPE.as_str().to_string(), "application/json".to_string()),
            ],
            body: Some(serde_json::to_vec(body)?),
        })
    }

    pub fn put_bytes(url: impl Into<String>, content_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            method: Method::PUT,
            url: url.into(),
            headers: vec![(CONTENT_TYPE.as_str().to_string(), content_type.to_string())],
            body: Some(bytes),
        }
    }

    /// First header value matching `name`, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status and body of a completed exchange. Non-2xx statuses are not errors
/// at this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Capability to execute HTTP requests.
pub trait Transport: Send + Sync {
    fn send(&self, request: TransportRequest)
        -> impl Future<Output = Result<TransportResponse>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse>> + Send {
        self.as_ref().send(request)
    }
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|error| Error::Transport(format!("Failed to construct HTTP client: {error}")))?;
        Ok(Self::with_client(client))
    }

    /// Wraps a preconfigured client.
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let TransportRequest {
            method,
            url,
            headers,
            body,
        } = request;

        tracing::debug!(%method, %url, "sending request");
        let mut builder = self.client.request(method.clone(), &url);
        for (name, value) in headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|error| Error::Transport(format!("{method} {url} failed: {error}")))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|error| Error::Transport(format!("Failed to read response body: {error}")))?;
        tracing::debug!(%method, %url, status, "received response");

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}
