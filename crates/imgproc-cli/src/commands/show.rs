use std::sync::Arc;

use imgproc_core::views::DetailView;
use imgproc_core::{ImageApiClient, ImageId};

use crate::commands::common::{detail_lines, print_json, print_lines, CommandStatus};
use crate::error::CliError;

pub async fn run_show(
    api: Arc<ImageApiClient>,
    id: ImageId,
    as_json: bool,
) -> Result<CommandStatus, CliError> {
    let view = DetailView::new(api, id);
    let outcome = view.mount().await;
    tracing::debug!(id = %view.id(), ?outcome, "detail mounted");

    let render = view.render();
    if as_json {
        print_json(&render)?;
    } else {
        print_lines(&detail_lines(&render));
    }
    Ok(CommandStatus::from_failed(render.is_failed()))
}
