//! Library exports for the zero-shot classifier app and its tests.
/// Application directory resolution.
pub mod app_dirs;
/// Form validation, phrase batching and result merging.
pub mod classify;
/// Settings and secrets persisted under the app directory.
pub mod config;
/// egui front end.
pub mod egui_app;
/// CSV export of result tables.
pub mod export;
/// Hosted zero-shot inference client.
pub mod inference;
/// Tracing setup with per-launch log files.
pub mod logging;

mod atomic_file;
mod http_client;
