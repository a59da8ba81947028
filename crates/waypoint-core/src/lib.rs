//! # waypoint-core
//!
//! Core types, settings, and error types for the waypoint navigation core.
//! This crate has no dependency on the other waypoint crates and provides the
//! foundation for all of them.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`utils`] - Utility types (`MultiValueDict`)
//! - [`settings`] - Navigation and logging settings
//! - [`settings_loader`] - Loading settings from TOML, JSON, and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;
pub mod utils;

// Re-export the most commonly used types at the crate root.
pub use error::{WaypointError, WaypointResult};
pub use settings::Settings;
