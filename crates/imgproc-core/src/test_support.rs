//! Shared fixtures for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::api::ImageApiClient;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::models::{ImageId, ImageRecord};
use crate::transport::{Transport, TransportRequest, TransportResponse};

pub const BASE_URL: &str = "https://api.example.com/prod";

#[derive(Debug, Clone)]
pub enum Reply {
    Status(u16, String),
    Fail(String),
    /// Never resolves.
    Hang,
}

impl Reply {
    pub fn json(value: &serde_json::Value) -> Self {
        Self::Status(200, value.to_string())
    }
}

/// Transport that answers from a script and records every request.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl ScriptedTransport {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        self.requests.lock().unwrap().push(request);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Reply::Fail("no scripted reply".to_string()));
        match reply {
            Reply::Status(status, body) => Ok(TransportResponse {
                status,
                body: body.into_bytes(),
            }),
            Reply::Fail(message) => Err(Error::Transport(message)),
            Reply::Hang => std::future::pending().await,
        }
    }
}

pub fn client(transport: &Arc<ScriptedTransport>) -> Arc<ImageApiClient<Arc<ScriptedTransport>>> {
    let config = ClientConfig::new(BASE_URL).unwrap();
    Arc::new(ImageApiClient::new(config, Arc::clone(transport)))
}

pub fn record(id: &str, filename: Option<&str>) -> ImageRecord {
    ImageRecord {
        id: ImageId::new(id),
        original_filename: filename.map(ToString::to_string),
        original_image_url: Some(format!("https://cdn.example.com/in/{id}")),
        processed_image_url: Some(format!("https://cdn.example.com/out/{id}")),
        uploaded_at: Some("2023-12-31T23:00:00Z".to_string()),
        processed_at: Some("2024-01-01T00:00:00Z".to_string()),
        original_size: Some(204_800),
        processed_size: Some(51_712),
        width: Some(1024),
        height: Some(768),
    }
}

pub fn images_body(records: &[ImageRecord]) -> Reply {
    Reply::json(&serde_json::json!({ "images": records }))
}
