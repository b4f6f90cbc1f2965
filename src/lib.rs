//! Library exports for reuse in integration tests.
/// Application directory helpers.
pub mod app_dirs;
/// Settings loading and model path resolution.
pub mod config;
/// Demand forecasting core: model artifact, load-once cache, forecaster.
pub mod forecast;
/// Shared egui UI modules.
pub mod egui_app;
/// Logging setup.
pub mod logging;
