use std::sync::Arc;

use imgproc_core::views::UploadView;
use imgproc_core::{ImageApiClient, Route};

use crate::commands::common::{print_json, print_lines, upload_lines, CommandStatus};
use crate::commands::gallery::run_gallery;
use crate::commands::show::run_show;
use crate::error::CliError;

pub fn parse_route(raw: &str) -> Result<Route, CliError> {
    Route::parse(raw).ok_or_else(|| CliError::UnknownRoute(raw.trim().to_string()))
}

/// Runs the view a navigation path resolves to.
pub async fn run_route(
    api: Arc<ImageApiClient>,
    route: Route,
    as_json: bool,
) -> Result<CommandStatus, CliError> {
    tracing::debug!(%route, "navigating");
    match route {
        Route::Gallery => run_gallery(api, as_json).await,
        Route::Detail(id) => run_show(api, id, as_json).await,
        Route::Upload => {
            // The form can only be shown empty here; selecting a file needs a path.
            let view = UploadView::new(api);
            let summary = view.session().summary();
            if as_json {
                print_json(&summary)?;
            } else {
                print_lines(&upload_lines(&summary));
                println!("Run `imgproc upload <PATH>` to select and submit a file.");
            }
            Ok(CommandStatus::Success)
        }
    }
}
