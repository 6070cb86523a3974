//! Library exports for the support widget, its native host, and benchmarks.
/// Per-user application directories.
pub mod app_dirs;
/// Native egui host.
pub mod egui_app;
/// Host configuration file.
pub mod host_config;
pub(crate) mod http_client;
/// Logging setup.
pub mod logging;
/// Support backend client and wire types.
pub mod support_api;
/// The embeddable support component.
pub mod widget;
