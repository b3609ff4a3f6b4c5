//! Upload view: file selection, local preview, and the two-phase submit.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use crate::api::ImageApiClient;
use crate::models::SelectedFile;
use crate::preview::{build_image_preview, ImagePreview};
use crate::resource::Failure;
use crate::routes::Route;
use crate::scope::ViewScope;
use crate::transport::Transport;

pub const NO_FILE_MESSAGE: &str = "Please select a file to upload";
pub const UPLOAD_FAILED_MESSAGE: &str = "Failed to upload image. Please try again.";
pub const SUBMIT_LABEL: &str = "Upload Image";
pub const UPLOADING_LABEL: &str = "Uploading...";

/// Ephemeral state of the upload form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSession {
    selected_file: Option<SelectedFile>,
    preview: Option<ImagePreview>,
    uploading: bool,
    error: Option<Failure>,
}

impl UploadSession {
    pub const fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    pub const fn preview(&self) -> Option<&ImagePreview> {
        self.preview.as_ref()
    }

    pub const fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub const fn error(&self) -> Option<&Failure> {
        self.error.as_ref()
    }

    /// The submit control is enabled only with a file and no upload in flight.
    pub const fn can_submit(&self) -> bool {
        !self.uploading && self.selected_file.is_some()
    }

    pub const fn submit_label(&self) -> &'static str {
        if self.uploading {
            UPLOADING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    pub fn summary(&self) -> UploadSummary {
        UploadSummary {
            file_name: self.selected_file.as_ref().map(|file| file.file_name().to_string()),
            content_type: self
                .selected_file
                .as_ref()
                .map(|file| file.content_type().to_string()),
            size_bytes: self.selected_file.as_ref().map(SelectedFile::len),
            preview: self.preview.clone(),
            uploading: self.uploading,
            error: self.error.as_ref().map(|failure| failure.message().to_string()),
            submit_label: self.submit_label(),
            can_submit: self.can_submit(),
        }
    }
}

/// Serializable snapshot of an [`UploadSession`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadSummary {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub size_bytes: Option<usize>,
    pub preview: Option<ImagePreview>,
    pub uploading: bool,
    pub error: Option<String>,
    pub submit_label: &'static str,
    pub can_submit: bool,
}

/// Result of [`UploadView::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Both phases succeeded; the caller should navigate here.
    Navigate(Route),
    /// No file was selected; nothing was sent.
    Invalid,
    /// An upload from this session is already in flight.
    Busy,
    /// A phase failed; the session holds the error message.
    Failed,
    /// The view was torn down mid-upload.
    Cancelled,
}

pub struct UploadView<T: Transport> {
    api: Arc<ImageApiClient<T>>,
    session: watch::Sender<UploadSession>,
    scope: ViewScope,
}

impl<T: Transport> UploadView<T> {
    pub fn new(api: Arc<ImageApiClient<T>>) -> Self {
        let (session, _) = watch::channel(UploadSession::default());
        Self {
            api,
            session,
            scope: ViewScope::new(),
        }
    }

    /// Selects a file, clears any previous error, and builds its preview.
    ///
    /// Returns `false` (and changes nothing) while an upload is in flight.
    pub fn select_file(&self, file: SelectedFile) -> bool {
        let preview = build_image_preview(file.content_type(), file.bytes());
        self.session.send_if_modified(|session| {
            if session.uploading {
                return false;
            }
            tracing::debug!(file = ?file, "file selected");
            session.selected_file = Some(file);
            session.preview = Some(preview);
            session.error = None;
            true
        })
    }

    /// Runs the upload protocol for the selected file.
    pub async fn submit(&self) -> UploadOutcome {
        let mut outcome = None;
        let mut file = None;
        self.session.send_if_modified(|session| {
            if session.uploading {
                outcome = Some(UploadOutcome::Busy);
                return false;
            }
            match &session.selected_file {
                None => {
                    session.error = Some(Failure::validation(NO_FILE_MESSAGE));
                    outcome = Some(UploadOutcome::Invalid);
                }
                Some(selected) => {
                    file = Some(selected.clone());
                    session.uploading = true;
                    session.error = None;
                }
            }
            true
        });
        if let Some(outcome) = outcome {
            return outcome;
        }
        let Some(file) = file else {
            return UploadOutcome::Invalid;
        };

        match self.scope.run(self.api.upload_image(&file)).await {
            None => UploadOutcome::Cancelled,
            Some(Ok(())) => {
                self.session.send_modify(|session| *session = UploadSession::default());
                UploadOutcome::Navigate(Route::Gallery)
            }
            Some(Err(error)) => {
                tracing::error!(%error, "Error uploading image");
                self.session.send_modify(|session| {
                    session.uploading = false;
                    session.error = Some(Failure::transport(UPLOAD_FAILED_MESSAGE));
                });
                UploadOutcome::Failed
            }
        }
    }

    pub fn session(&self) -> UploadSession {
        self.session.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<UploadSession> {
        self.session.subscribe()
    }

    pub fn scope(&self) -> ViewScope {
        self.scope.clone()
    }
}

impl<T: Transport> Drop for UploadView<T> {
    fn drop(&mut self) {
        self.scope.close();
    }
}
