//! Gallery view: the full record collection, fetched once per mount.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use crate::api::ImageApiClient;
use crate::models::{ImageId, ImageRecord};
use crate::resource::{AsyncResource, Failure, ResourceState, TriggerOutcome};
use crate::routes::Route;
use crate::scope::ViewScope;
use crate::transport::Transport;
use crate::views::format::{format_day, image_url_or_placeholder, text_or, PROCESSING_CAPTION};

pub const LOADING_MESSAGE: &str = "Loading images...";
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load images. Please try again later.";
pub const EMPTY_MESSAGE: &str = "No images found. Upload some images to get started!";
const UNTITLED_CARD: &str = "Image";
const UNTITLED_ALT: &str = "Processed image";

/// One gallery entry, keyed by the record id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryCard {
    pub id: ImageId,
    pub href: String,
    pub title: String,
    pub image_url: String,
    pub alt: String,
    /// `YYYY-MM-DD` of processing (raw text if unparseable), or `None` while
    /// the record is pending.
    pub processed_on: Option<String>,
}

impl GalleryCard {
    pub fn from_record(record: &ImageRecord) -> Self {
        let filename = record.original_filename.as_deref();
        Self {
            id: record.id.clone(),
            href: Route::Detail(record.id.clone()).href(),
            title: text_or(filename, UNTITLED_CARD),
            image_url: image_url_or_placeholder(record.processed_image_url.as_deref()),
            alt: text_or(filename, UNTITLED_ALT),
            processed_on: format_day(record.processed_at.as_deref()),
        }
    }

    pub fn caption(&self) -> String {
        self.processed_on.as_ref().map_or_else(
            || PROCESSING_CAPTION.to_string(),
            |date| format!("Processed on: {date}"),
        )
    }
}

/// What the gallery shows for its current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GalleryRender {
    Loading {
        message: String,
    },
    Failed {
        message: String,
    },
    Empty {
        message: String,
        upload_href: String,
    },
    Cards {
        cards: Vec<GalleryCard>,
        upload_href: String,
    },
}

impl GalleryRender {
    pub fn from_state(state: &ResourceState<Vec<ImageRecord>>) -> Self {
        match state {
            ResourceState::Idle | ResourceState::Loading => Self::Loading {
                message: LOADING_MESSAGE.to_string(),
            },
            ResourceState::Failed(failure) => Self::Failed {
                message: failure.message().to_string(),
            },
            ResourceState::Ready(records) if records.is_empty() => Self::Empty {
                message: EMPTY_MESSAGE.to_string(),
                upload_href: Route::Upload.href(),
            },
            ResourceState::Ready(records) => Self::Cards {
                cards: records.iter().map(GalleryCard::from_record).collect(),
                upload_href: Route::Upload.href(),
            },
        }
    }

    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

pub struct GalleryView<T: Transport> {
    api: Arc<ImageApiClient<T>>,
    resource: AsyncResource<Vec<ImageRecord>>,
    scope: ViewScope,
}

impl<T: Transport> GalleryView<T> {
    pub fn new(api: Arc<ImageApiClient<T>>) -> Self {
        Self {
            api,
            resource: AsyncResource::new(),
            scope: ViewScope::new(),
        }
    }

    /// Fetches the collection. Each mounted view fetches exactly once.
    pub async fn mount(&self) -> TriggerOutcome {
        let fetch = async {
            let records = self.api.list_images().await.map_err(|error| {
                tracing::error!(%error, "Error fetching images");
                Failure::transport(LOAD_ERROR_MESSAGE)
            })?;
            for record in records.iter().filter(|record| !record.timestamps_consistent()) {
                tracing::warn!(id = %record.id, "record processed before it was uploaded");
            }
            Ok::<_, Failure>(records)
        };
        self.resource.trigger(&self.scope, fetch).await
    }

    pub fn state(&self) -> ResourceState<Vec<ImageRecord>> {
        self.resource.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResourceState<Vec<ImageRecord>>> {
        self.resource.subscribe()
    }

    pub fn render(&self) -> GalleryRender {
        self.resource.with_state(GalleryRender::from_state)
    }

    /// A handle that can tear the view down from elsewhere.
    pub fn scope(&self) -> ViewScope {
        self.scope.clone()
    }
}

impl<T: Transport> Drop for GalleryView<T> {
    fn drop(&mut self) {
        self.scope.close();
    }
}
