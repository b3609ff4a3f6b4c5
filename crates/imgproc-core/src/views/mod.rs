//! View logic for the gallery, detail, and upload screens.
//!
//! Each view owns its state machine and a [`crate::scope::ViewScope`].
//! `mount`/`submit` borrow the view, so teardown mid-request goes through a
//! handle from `scope()`: closing it abandons the outstanding request and its
//! response never reaches state. Dropping a view also closes its scope, which
//! stops any work still running under a cloned handle.

pub mod detail;
pub mod format;
pub mod gallery;
pub mod upload;

pub use detail::{DetailRender, DetailSheet, DetailView, MetadataRow};
pub use gallery::{GalleryCard, GalleryRender, GalleryView};
pub use upload::{UploadOutcome, UploadSession, UploadView};
