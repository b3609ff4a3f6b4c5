//! Data models for imgproc

mod image_record;
mod upload;

pub use image_record::{parse_timestamp, ImageId, ImageList, ImageRecord};
pub use upload::{infer_image_mime_type, SelectedFile, UploadGrant, UploadGrantRequest};
