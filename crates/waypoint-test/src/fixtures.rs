//! Fixture routers and navigators for the common routing scenarios.
//!
//! Handler keys are plain strings named after the view they stand for.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use waypoint_navigation::redirect::protect;
use waypoint_navigation::Navigator;
use waypoint_routing::{Route, RouteConfig, Router};

fn route(pattern: &str, handler: &'static str) -> Route<&'static str> {
    Route::new(pattern, handler).expect("fixture pattern compiles")
}

fn exact(pattern: &str, handler: &'static str) -> Route<&'static str> {
    Route::exact(pattern, handler).expect("fixture pattern compiles")
}

/// `/:name` (prefix) registered before `/invoices/:id`: the student route
/// shadows the invoice route.
pub fn url_params_router() -> Router<&'static str> {
    Router::with_routes([route("/:name", "student"), route("/invoices/:id", "invoice")])
}

/// Home, settings and a trailing catch-all.
pub fn not_found_router() -> Router<&'static str> {
    Router::with_routes([
        exact("/", "home"),
        exact("/settings", "settings"),
        route("*", "not-found"),
    ])
}

/// The same three routes for the sidebar slot and the main slot.
pub fn sidebar_routers() -> (Router<&'static str>, Router<&'static str>) {
    let sidebar = Router::with_routes([
        exact("/", "home-emojis"),
        route("/rainbows", "rainbow-emojis"),
        route("/bears", "bear-emojis"),
    ]);
    let main = Router::with_routes([
        exact("/", "home"),
        route("/rainbows", "rainbows"),
        route("/bears", "bears"),
    ]);
    (sidebar, main)
}

/// A nested route table as TOML: home, and newsletters with publications.
pub const NEWSLETTERS_TOML: &str = r#"
[[routes]]
path = "/"
handler = "home"
exact = true

[[routes]]
path = "/newsletters"
handler = "newsletters"
name = "newsletters"

[[routes.routes]]
path = "/:id"
handler = "publication"
name = "publication"
"#;

/// Parses [`NEWSLETTERS_TOML`].
pub fn newsletters_config() -> RouteConfig {
    RouteConfig::from_toml_str(NEWSLETTERS_TOML).expect("fixture route table parses")
}

/// Links with their exact flag, for active-link styling.
pub fn customized_links() -> Vec<(&'static str, bool)> {
    vec![("/", true), ("/notifications", false), ("/settings", false)]
}

/// Home, a survey form that guards against leaving, and settings.
pub fn survey_router() -> Router<&'static str> {
    Router::with_routes([
        exact("/", "home"),
        route("/survey", "survey"),
        route("/settings", "settings"),
    ])
}

/// Home, login and a protected notifications page.
pub fn protected_router() -> Router<&'static str> {
    Router::with_routes([
        exact("/", "home"),
        route("/login", "login"),
        route("/notifications", "notifications"),
    ])
}

/// A navigator that sends `/notifications` to `/login` while
/// `authenticated` is `false`.
pub fn protected_navigator(authenticated: Arc<AtomicBool>) -> Navigator {
    let rule = protect(
        "/notifications",
        false,
        move || authenticated.load(Ordering::SeqCst),
        "/login",
    )
    .expect("fixture pattern compiles");
    Navigator::builder().redirect_rule(rule).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_routers_build() {
        assert_eq!(url_params_router().len(), 2);
        assert_eq!(not_found_router().len(), 3);
        let (sidebar, main) = sidebar_routers();
        assert_eq!(sidebar.len(), main.len());
        assert_eq!(newsletters_config().build_router().unwrap().len(), 2);
        assert_eq!(survey_router().resolve_first("/survey").unwrap().handler, "survey");
        assert_eq!(protected_router().len(), 3);
        assert_eq!(customized_links().len(), 3);
    }

    #[tokio::test]
    async fn test_protected_navigator_redirects() {
        let authenticated = Arc::new(AtomicBool::new(false));
        let navigator = protected_navigator(authenticated.clone());
        navigator.push("/notifications", None).await.unwrap();
        assert_eq!(navigator.current_location().path(), "/login");

        authenticated.store(true, Ordering::SeqCst);
        navigator.push("/notifications", None).await.unwrap();
        assert_eq!(navigator.current_location().path(), "/notifications");
    }
}
