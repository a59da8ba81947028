//! Core error types for waypoint.
//!
//! [`WaypointError`] covers malformed route patterns, failed link generation,
//! history underflow, redirect loops, and configuration loading. Resolution
//! failures are not errors: a path that matches nothing resolves to an empty
//! result, and a navigation blocked by a guard is an ordinary outcome.

use thiserror::Error;

/// The primary error type for waypoint.
#[derive(Error, Debug)]
pub enum WaypointError {
    // ── Routing ──────────────────────────────────────────────────────

    /// A route pattern could not be compiled. Registration does not proceed.
    #[error("Invalid route pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern text as given.
        pattern: String,
        /// Why compilation failed.
        reason: String,
    },

    /// A parameter required to build a path from a pattern was not supplied.
    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    /// No route is registered under the given name.
    #[error("Route not found: {0}")]
    RouteNotFound(String),

    // ── Navigation ───────────────────────────────────────────────────

    /// `go_back` was called with no earlier committed location.
    #[error("No history to go back to")]
    NoHistory,

    /// Redirect rules kept rewriting the proposed location.
    #[error("Redirect limit of {limit} exceeded while navigating to '{path}'")]
    RedirectLimitExceeded {
        /// The path that was originally requested.
        path: String,
        /// The configured maximum number of redirects.
        limit: usize,
    },

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value or document is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── Serialization ────────────────────────────────────────────────

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl WaypointError {
    /// Shorthand for building an [`InvalidPattern`](Self::InvalidPattern) error.
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors raised while registering or compiling routes.
    pub const fn is_routing_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidPattern { .. } | Self::MissingParameter(_) | Self::RouteNotFound(_)
        )
    }
}

impl From<serde_json::Error> for WaypointError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// A convenience type alias for `Result<T, WaypointError>`.
pub type WaypointResult<T> = Result<T, WaypointError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pattern_display() {
        let err = WaypointError::invalid_pattern("/*/a", "wildcard must be the last segment");
        assert_eq!(
            err.to_string(),
            "Invalid route pattern '/*/a': wildcard must be the last segment"
        );
    }

    #[test]
    fn test_no_history_display() {
        assert_eq!(WaypointError::NoHistory.to_string(), "No history to go back to");
    }

    #[test]
    fn test_redirect_limit_display() {
        let err = WaypointError::RedirectLimitExceeded {
            path: "/loop".into(),
            limit: 8,
        };
        assert_eq!(
            err.to_string(),
            "Redirect limit of 8 exceeded while navigating to '/loop'"
        );
    }

    #[test]
    fn test_is_routing_error() {
        assert!(WaypointError::invalid_pattern("x", "y").is_routing_error());
        assert!(WaypointError::MissingParameter("id".into()).is_routing_error());
        assert!(WaypointError::RouteNotFound("home".into()).is_routing_error());
        assert!(!WaypointError::NoHistory.is_routing_error());
        assert!(!WaypointError::ConfigurationError("x".into()).is_routing_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: WaypointError = io_err.into();
        assert!(matches!(err, WaypointError::IoError(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: WaypointError = json_err.into();
        assert!(matches!(err, WaypointError::SerializationError(_)));
    }
}
