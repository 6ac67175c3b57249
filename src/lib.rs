//! Library exports for reuse in benchmarks and tests.
/// Per-user application directories.
pub mod app_dirs;
/// Settings loaded from `settings.toml`.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
pub(crate) mod http_client;
/// File-backed tracing setup.
pub mod logging;
/// Client for the structural damage prediction service.
pub mod prediction_api;
