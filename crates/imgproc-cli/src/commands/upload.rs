use std::path::Path;
use std::sync::Arc;

use imgproc_core::models::SelectedFile;
use imgproc_core::views::{UploadOutcome, UploadView};
use imgproc_core::ImageApiClient;

use crate::commands::common::{preview_line, print_json, print_lines, upload_lines, CommandStatus};
use crate::commands::open::run_route;
use crate::error::CliError;

pub async fn run_upload(
    api: Arc<ImageApiClient>,
    path: &Path,
    content_type: Option<&str>,
    show_preview: bool,
    as_json: bool,
) -> Result<CommandStatus, CliError> {
    let file = SelectedFile::from_path(path, content_type).await?;
    let view = UploadView::new(Arc::clone(&api));
    view.select_file(file);

    if show_preview {
        let session = view.session();
        if let Some(preview) = session.preview() {
            if as_json {
                print_json(preview)?;
            } else {
                println!("{}", preview_line(preview));
            }
        }
    }

    let outcome = view.submit().await;
    match outcome {
        UploadOutcome::Navigate(route) => {
            tracing::info!(file = %path.display(), %route, "upload complete");
            drop(view);
            run_route(api, route, as_json).await
        }
        UploadOutcome::Invalid
        | UploadOutcome::Busy
        | UploadOutcome::Failed
        | UploadOutcome::Cancelled => {
            let summary = view.session().summary();
            if as_json {
                print_json(&summary)?;
            } else {
                print_lines(&upload_lines(&summary));
            }
            Ok(CommandStatus::ViewFailed)
        }
    }
}
