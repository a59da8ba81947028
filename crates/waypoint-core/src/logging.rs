//! Logging integration for waypoint.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating per-navigation spans.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The filter is read from `settings.log_level` (e.g. "debug", "info",
/// "waypoint_navigation=trace"). In debug mode a pretty, human-readable format
/// is used; otherwise a structured JSON format is used.
///
/// Installing a second subscriber is a no-op.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for a single navigation.
///
/// Every event emitted while a navigation is evaluated and committed is
/// recorded inside this span.
///
/// # Examples
///
/// ```
/// use waypoint_core::logging::navigation_span;
///
/// let span = navigation_span("push", "/settings");
/// let _guard = span.enter();
/// tracing::info!("navigating");
/// ```
pub fn navigation_span(action: &str, path: &str) -> tracing::Span {
    tracing::info_span!("navigation", action = action, path = path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_logging_twice_is_harmless() {
        let settings = Settings {
            log_level: "not a valid filter [[".to_string(),
            ..Settings::default()
        };
        setup_logging(&settings);
        setup_logging(&Settings::default());
    }

    #[test]
    fn test_navigation_span_enter() {
        let span = navigation_span("replace", "/login");
        let _guard = span.enter();
        tracing::debug!("inside span");
    }
}
