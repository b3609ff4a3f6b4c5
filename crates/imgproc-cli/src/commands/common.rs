use std::env;
use std::sync::Arc;

use imgproc_core::preview::ImagePreview;
use imgproc_core::routes::NAV_LINKS;
use imgproc_core::views::upload::UploadSummary;
use imgproc_core::views::{DetailRender, GalleryRender};
use imgproc_core::ImageApiClient;
use serde::Serialize;

use crate::config_file::{resolve_client_config, CliConfigFile, ConfigOverrides};
use crate::error::CliError;

/// How a command finished when it did not error out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    /// The view settled in its failed state; the message was already shown.
    ViewFailed,
}

impl CommandStatus {
    pub const fn from_failed(failed: bool) -> Self {
        if failed {
            Self::ViewFailed
        } else {
            Self::Success
        }
    }
}

pub fn build_api(overrides: &ConfigOverrides) -> Result<Arc<ImageApiClient>, CliError> {
    let file = CliConfigFile::load()?;
    let config = resolve_client_config(overrides, |name| env::var(name).ok(), &file)?;
    tracing::debug!(api_base_url = config.api_base_url(), "resolved client config");
    Ok(Arc::new(ImageApiClient::from_config(config)?))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

pub fn nav_line() -> String {
    NAV_LINKS
        .iter()
        .map(|(label, path)| format!("{label} ({path})"))
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn gallery_lines(render: &GalleryRender) -> Vec<String> {
    let mut lines = vec![nav_line(), String::new()];
    match render {
        GalleryRender::Loading { message } | GalleryRender::Failed { message } => {
            lines.push(message.clone());
        }
        GalleryRender::Empty {
            message,
            upload_href,
        } => {
            lines.push(message.clone());
            lines.push(format!("Upload: {upload_href}"));
        }
        GalleryRender::Cards { cards, upload_href } => {
            for card in cards {
                lines.push(card.title.clone());
                lines.push(format!("  {}", card.caption()));
                lines.push(format!("  Image: {}", card.image_url));
                lines.push(format!("  Open: {}", card.href));
            }
            lines.push(String::new());
            lines.push(format!("Upload: {upload_href}"));
        }
    }
    lines
}

pub fn detail_lines(render: &DetailRender) -> Vec<String> {
    match render {
        DetailRender::Loading { message } => vec![message.clone()],
        DetailRender::Failed {
            message, back_href, ..
        } => vec![message.clone(), format!("Back to Gallery: {back_href}")],
        DetailRender::Record(sheet) => {
            let width = sheet
                .metadata
                .iter()
                .map(|row| row.label.len())
                .max()
                .unwrap_or_default();
            let mut lines = vec![
                sheet.title.clone(),
                String::new(),
                format!("Original Image: {}", sheet.original_image_url),
                format!("Processed Image: {}", sheet.processed_image_url),
                String::new(),
            ];
            lines.extend(
                sheet
                    .metadata
                    .iter()
                    .map(|row| format!("{:<width$}  {}", row.label, row.value)),
            );
            lines.push(String::new());
            lines.push(format!("Back to Gallery: {}", sheet.back_href));
            lines
        }
    }
}

pub fn preview_line(preview: &ImagePreview) -> String {
    match preview {
        ImagePreview::DataUri { data_uri, .. } => data_uri.clone(),
        ImagePreview::TooLarge {
            size_bytes,
            limit_bytes,
        } => format!("Preview unavailable: {size_bytes} bytes exceeds the {limit_bytes} byte limit"),
    }
}

pub fn upload_lines(summary: &UploadSummary) -> Vec<String> {
    let mut lines = vec![nav_line(), String::new()];
    match (&summary.file_name, &summary.content_type, summary.size_bytes) {
        (Some(name), Some(content_type), Some(size)) => {
            lines.push(format!("Selected: {name} ({content_type}, {size} bytes)"));
        }
        _ => lines.push("No file selected".to_string()),
    }
    if let Some(error) = &summary.error {
        lines.push(error.clone());
    }
    let state = if summary.can_submit { "ready" } else { "disabled" };
    lines.push(format!("[{}] {state}", summary.submit_label));
    lines
}
