//! imgproc-core - Core library for imgproc
//!
//! This crate contains the record models, the API client for the image
//! processing backend, and the view state machines (gallery, detail, upload)
//! shared by every imgproc front end.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod preview;
pub mod resource;
pub mod routes;
pub mod scope;
pub mod transport;
pub mod views;

#[cfg(test)]
mod test_support;

pub use api::ImageApiClient;
pub use config::ClientConfig;
pub use error::{Error, FailureKind, Result};
pub use models::{ImageId, ImageRecord};
pub use resource::{AsyncResource, Failure, ResourceState};
pub use routes::Route;
pub use scope::ViewScope;
