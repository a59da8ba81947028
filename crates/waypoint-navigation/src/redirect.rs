//! Redirect rules.
//!
//! A redirect rule looks at a proposed location and may rewrite it before any
//! guard runs. Rules are tried in registration order; after a rewrite the
//! rules run again on the new location, until none applies or the redirect
//! limit is exceeded.

use std::sync::Arc;

use serde_json::json;
use waypoint_core::{WaypointError, WaypointResult};
use waypoint_routing::{compile, Location};

/// A rule that returns `Some(target)` to redirect the proposed location.
pub type RedirectRule = Arc<dyn Fn(&Location) -> Option<Location> + Send + Sync>;

/// Builds a rule that sends locations under `pattern` to `login_path` while
/// `is_allowed` returns `false`.
///
/// The redirect carries `{"from": "<requested href>"}` as its state so that the
/// login view can send the user on afterwards.
///
/// ```
/// use waypoint_navigation::redirect::protect;
/// use waypoint_routing::Location;
///
/// let rule = protect("/notifications", false, || false, "/login").unwrap();
/// let target = rule(&Location::parse("/notifications")).unwrap();
/// assert_eq!(target.path(), "/login");
/// assert_eq!(target.state().unwrap()["from"], "/notifications");
/// assert!(rule(&Location::parse("/")).is_none());
/// ```
///
/// # Errors
///
/// Returns [`WaypointError::InvalidPattern`] if `pattern` does not compile.
pub fn protect<F>(pattern: &str, exact: bool, is_allowed: F, login_path: &str) -> WaypointResult<RedirectRule>
where
    F: Fn() -> bool + Send + Sync + 'static,
{
    let pattern = compile(pattern)?;
    let login_path = login_path.to_string();

    Ok(Arc::new(move |proposed: &Location| {
        if pattern.match_path(proposed.path(), exact).is_none() || is_allowed() {
            return None;
        }
        Some(Location::parse(&login_path).with_state(json!({ "from": proposed.href() })))
    }))
}

/// Applies `rules` to `requested` until no rule fires.
///
/// # Errors
///
/// Returns [`WaypointError::RedirectLimitExceeded`] once more than `limit`
/// redirects have been applied to one request.
pub(crate) fn apply(rules: &[RedirectRule], requested: Location, limit: usize) -> WaypointResult<Location> {
    let requested_path = requested.path().to_string();
    let mut location = requested;
    let mut hops = 0;

    'rules: loop {
        for rule in rules {
            if let Some(next) = rule(&location) {
                hops += 1;
                if hops > limit {
                    tracing::warn!(path = %requested_path, limit, "redirect limit exceeded");
                    return Err(WaypointError::RedirectLimitExceeded {
                        path: requested_path,
                        limit,
                    });
                }
                tracing::info!(from = location.path(), to = next.path(), "redirecting navigation");
                location = next;
                continue 'rules;
            }
        }
        return Ok(location);
    }
}
