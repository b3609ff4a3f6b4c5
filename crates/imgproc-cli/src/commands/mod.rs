pub mod common;
pub mod completions;
pub mod config;
pub mod gallery;
pub mod open;
pub mod show;
pub mod upload;
