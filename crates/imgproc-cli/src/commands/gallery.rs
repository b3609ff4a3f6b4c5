use std::sync::Arc;

use imgproc_core::views::GalleryView;
use imgproc_core::ImageApiClient;

use crate::commands::common::{gallery_lines, print_json, print_lines, CommandStatus};
use crate::error::CliError;

pub async fn run_gallery(
    api: Arc<ImageApiClient>,
    as_json: bool,
) -> Result<CommandStatus, CliError> {
    let view = GalleryView::new(api);
    let outcome = view.mount().await;
    tracing::debug!(?outcome, "gallery mounted");

    let render = view.render();
    if as_json {
        print_json(&render)?;
    } else {
        print_lines(&gallery_lines(&render));
    }
    Ok(CommandStatus::from_failed(render.is_failed()))
}
