//! Detail view: one record looked up by id.
//!
//! The backend has no single-record route, so the view fetches the whole
//! collection and scans it linearly. Cost grows with the collection; keep it
//! that way until the backend offers a keyed lookup.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use crate::api::ImageApiClient;
use crate::error::{Error, FailureKind, Result};
use crate::models::{ImageId, ImageRecord};
use crate::resource::{AsyncResource, Failure, ResourceState, TriggerOutcome};
use crate::routes::Route;
use crate::scope::ViewScope;
use crate::transport::Transport;
use crate::views::format::{
    format_dimensions, format_kilobytes, format_timestamp, image_url_or_placeholder, text_or,
    NOT_AVAILABLE, PROCESSING_CAPTION,
};

pub const LOADING_MESSAGE: &str = "Loading image details...";
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load image details";
pub const NOT_FOUND_MESSAGE: &str = "Image not found";
const UNTITLED_DETAIL: &str = "Image Details";

/// Linear scan for the record with `id`.
pub fn find_record(records: Vec<ImageRecord>, id: &ImageId) -> Result<ImageRecord> {
    records
        .into_iter()
        .find(|record| &record.id == id)
        .ok_or_else(|| Error::NotFound(id.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataRow {
    pub label: &'static str,
    pub value: String,
}

/// Everything the detail screen shows for a found record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailSheet {
    pub id: ImageId,
    pub title: String,
    pub original_image_url: String,
    pub processed_image_url: String,
    pub metadata: Vec<MetadataRow>,
    pub back_href: String,
}

impl DetailSheet {
    pub fn from_record(record: &ImageRecord) -> Self {
        let processed_at = if record.is_processed() {
            format_timestamp(record.processed_at.as_deref())
        } else {
            PROCESSING_CAPTION.to_string()
        };

        let metadata = vec![
            MetadataRow {
                label: "Original Filename",
                value: text_or(record.original_filename.as_deref(), NOT_AVAILABLE),
            },
            MetadataRow {
                label: "Uploaded At",
                value: format_timestamp(record.uploaded_at.as_deref()),
            },
            MetadataRow {
                label: "Processed At",
                value: processed_at,
            },
            MetadataRow {
                label: "Original Size",
                value: format_kilobytes(record.original_size),
            },
            MetadataRow {
                label: "Processed Size",
                value: format_kilobytes(record.processed_size),
            },
            MetadataRow {
                label: "Dimensions",
                value: format_dimensions(record.dimensions()),
            },
        ];

        Self {
            id: record.id.clone(),
            title: text_or(record.original_filename.as_deref(), UNTITLED_DETAIL),
            original_image_url: image_url_or_placeholder(record.original_image_url.as_deref()),
            processed_image_url: image_url_or_placeholder(record.processed_image_url.as_deref()),
            metadata,
            back_href: Route::Gallery.href(),
        }
    }

    pub fn value(&self, label: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|row| row.label == label)
            .map(|row| row.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DetailRender {
    Loading {
        message: String,
    },
    Failed {
        kind: FailureKind,
        message: String,
        back_href: String,
    },
    Record(DetailSheet),
}

impl DetailRender {
    pub fn from_state(state: &ResourceState<ImageRecord>) -> Self {
        match state {
            ResourceState::Idle | ResourceState::Loading => Self::Loading {
                message: LOADING_MESSAGE.to_string(),
            },
            ResourceState::Failed(failure) => Self::Failed {
                kind: failure.kind(),
                message: failure.message().to_string(),
                back_href: Route::Gallery.href(),
            },
            ResourceState::Ready(record) => Self::Record(DetailSheet::from_record(record)),
        }
    }

    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

pub struct DetailView<T: Transport> {
    api: Arc<ImageApiClient<T>>,
    id: ImageId,
    resource: AsyncResource<ImageRecord>,
    scope: ViewScope,
}

impl<T: Transport> DetailView<T> {
    pub fn new(api: Arc<ImageApiClient<T>>, id: impl Into<ImageId>) -> Self {
        Self {
            api,
            id: id.into(),
            resource: AsyncResource::new(),
            scope: ViewScope::new(),
        }
    }

    pub const fn id(&self) -> &ImageId {
        &self.id
    }

    pub async fn mount(&self) -> TriggerOutcome {
        let fetch = async {
            let lookup = async {
                let records = self.api.list_images().await?;
                find_record(records, &self.id)
            };
            lookup.await.map_err(|error| match error.failure_kind() {
                FailureKind::NotFound => {
                    tracing::debug!(id = %self.id, "image not in collection");
                    Failure::not_found(NOT_FOUND_MESSAGE)
                }
                kind => {
                    tracing::error!(%error, id = %self.id, "Error fetching image details");
                    Failure::new(kind, LOAD_ERROR_MESSAGE)
                }
            })
        };
        self.resource.trigger(&self.scope, fetch).await
    }

    pub fn state(&self) -> ResourceState<ImageRecord> {
        self.resource.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResourceState<ImageRecord>> {
        self.resource.subscribe()
    }

    pub fn render(&self) -> DetailRender {
        self.resource.with_state(DetailRender::from_state)
    }

    pub fn scope(&self) -> ViewScope {
        self.scope.clone()
    }
}

impl<T: Transport> Drop for DetailView<T> {
    fn drop(&mut self) {
        self.scope.close();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::{client, images_body, record, Reply, ScriptedTransport};

    #[test]
    fn find_record_scans_for_matching_id() {
        let records = vec![record("a", None), record("b", Some("b.png"))];
        let found = find_record(records.clone(), &ImageId::new("b")).unwrap();
        assert_eq!(found, records[1]);

        let missing = find_record(records, &ImageId::new("z")).unwrap_err();
        assert!(matches!(missing, Error::NotFound(ref id) if id == "z"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn present_id_renders_record_fields() {
        let target = record("abc", Some("cat.png"));
        let transport = ScriptedTransport::new([images_body(&[record("zzz", None), target.clone()])]);
        let view = DetailView::new(client(&transport), "abc");

        view.mount().await;

        assert_eq!(view.state(), ResourceState::Ready(target.clone()));
        let DetailRender::Record(sheet) = view.render() else {
            panic!("expected record");
        };
        assert_eq!(sheet.title, "cat.png");
        assert_eq!(sheet.original_image_url, target.original_image_url.unwrap());
        assert_eq!(sheet.processed_image_url, target.processed_image_url.unwrap());
        assert_eq!(sheet.back_href, "/");
        assert_eq!(sheet.value("Original Filename"), Some("cat.png"));
        assert_eq!(sheet.value("Uploaded At"), Some("2023-12-31 23:00:00 UTC"));
        assert_eq!(sheet.value("Processed At"), Some("2024-01-01 00:00:00 UTC"));
        assert_eq!(sheet.value("Original Size"), Some("200 KB"));
        assert_eq!(sheet.value("Processed Size"), Some("51 KB"));
        assert_eq!(sheet.value("Dimensions"), Some("1024 × 768"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn absent_id_renders_not_found_only() {
        let transport = ScriptedTransport::new([images_body(&[record("abc", None)])]);
        let view = DetailView::new(client(&transport), "xyz");

        view.mount().await;

        assert_eq!(
            view.render(),
            DetailRender::Failed {
                kind: FailureKind::NotFound,
                message: NOT_FOUND_MESSAGE.to_string(),
                back_href: "/".to_string(),
            }
        );
    }

    #[tokio::test(flavor = "current_thread")]
    async fn transport_failure_is_distinct_from_not_found() {
        let transport = ScriptedTransport::new([Reply::Status(503, "unavailable".to_string())]);
        let view = DetailView::new(client(&transport), "abc");

        view.mount().await;

        let DetailRender::Failed { kind, message, .. } = view.render() else {
            panic!("expected failure");
        };
        assert_eq!(kind, FailureKind::Transport);
        assert_eq!(message, LOAD_ERROR_MESSAGE);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn detail_uses_the_list_route() {
        let transport = ScriptedTransport::new([images_body(&[record("abc", None)])]);
        let view = DetailView::new(client(&transport), "abc");

        view.mount().await;

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].url.ends_with("/images"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn missing_fields_render_placeholders() {
        let transport =
            ScriptedTransport::new([Reply::json(&serde_json::json!({ "images": [{ "id": "p1" }] }))]);
        let view = DetailView::new(client(&transport), "p1");

        view.mount().await;

        let DetailRender::Record(sheet) = view.render() else {
            panic!("expected record");
        };
        assert_eq!(sheet.title, "Image Details");
        assert_eq!(sheet.processed_image_url, "/placeholder.svg");
        assert_eq!(sheet.value("Processed At"), Some(PROCESSING_CAPTION));
        assert_eq!(sheet.value("Dimensions"), Some("N/A"));
        assert_eq!(sheet.value("Original Size"), Some("N/A"));
    }
}
