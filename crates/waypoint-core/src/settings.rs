//! Settings for waypoint.
//!
//! [`Settings`] holds navigation and logging configuration. There is no
//! global instance: load a value with
//! [`settings_loader`](crate::settings_loader) and pass it to whatever needs it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The complete set of waypoint settings.
///
/// Pass a `Settings` value to the navigator builder.
///
/// # Examples
///
/// ```
/// use waypoint_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.initial_path, "/");
/// assert_eq!(settings.max_redirects, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled. Selects human-readable log output.
    pub debug: bool,

    // ── Navigation ───────────────────────────────────────────────────

    /// The location a navigator starts at.
    pub initial_path: String,
    /// Maximum number of back-stack entries kept. `0` means unbounded.
    pub history_limit: usize,
    /// Maximum redirect hops followed for a single navigation.
    pub max_redirects: usize,
    /// Answer given to blocked navigations when no confirmation is injected.
    pub confirm_by_default: bool,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log level or filter directive (e.g. "info", "waypoint=debug").
    pub log_level: String,

    // ── Escape hatch ─────────────────────────────────────────────────

    /// Custom settings that don't fit into the above categories.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            initial_path: "/".to_string(),
            history_limit: 0,
            max_redirects: 8,
            confirm_by_default: false,
            log_level: "info".to_string(),
            extra: HashMap::new(),
        }
    }
}
