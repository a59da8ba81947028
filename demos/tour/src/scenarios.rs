//! The routing scenarios, each run against the core and reported as lines
//! of text.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use waypoint::core::{Settings, WaypointError};
use waypoint::navigation::guard::prompt;
use waypoint::navigation::redirect::protect;
use waypoint::navigation::{
    AlwaysConfirm, AlwaysDecline, NavigationEvent, NavigationOutcome, Navigator,
};
use waypoint::routing::{is_active, Location, MatchResult, Route, RouteConfig, Router};

/// The route table used by `route-config` when no file is given.
pub const DEFAULT_ROUTES: &str = r#"
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

// ── Helpers ─────────────────────────────────────────────────────────

fn format_params(params: &HashMap<String, String>) -> String {
    let mut pairs: Vec<_> = params.iter().collect();
    pairs.sort();
    pairs
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe<H: std::fmt::Display>(matched: &MatchResult<H>) -> String {
    let mut line = format!("{} <- {} ({})", matched.handler, matched.pattern, matched.matched_path);
    if !matched.params.is_empty() {
        line.push_str(&format!(" [{}]", format_params(&matched.params)));
    }
    line
}

fn describe_chain<H: Clone + std::fmt::Display>(router: &Router<H>, path: &str) -> Vec<String> {
    let chain = router.resolve(path);
    if chain.is_empty() {
        return vec![format!("{path}: no match")];
    }
    chain.iter().map(describe).collect()
}

fn describe_outcome(outcome: &NavigationOutcome) -> String {
    match outcome {
        NavigationOutcome::Committed(location) => format!("committed {}", location.href()),
        NavigationOutcome::Aborted { message } => format!("aborted: {message}"),
    }
}

// ── Static routing ──────────────────────────────────────────────────

/// A prefix `/:name` registered before `/invoices/:id` shadows it.
pub fn url_params(path: &str) -> anyhow::Result<Vec<String>> {
    let router = Router::with_routes([
        Route::new("/:name", "student")?,
        Route::new("/invoices/:id", "invoice")?,
    ]);
    Ok(describe_chain(&router, path))
}

pub fn not_found(path: &str) -> anyhow::Result<Vec<String>> {
    let router = Router::with_routes([
        Route::exact("/", "home")?,
        Route::exact("/settings", "settings")?,
        Route::new("*", "not-found")?,
    ]);
    Ok(describe_chain(&router, path))
}

/// Resolves the same path against a sidebar router and a main router.
pub fn sidebar(path: &str) -> anyhow::Result<Vec<String>> {
    let sidebar = Router::with_routes([
        Route::exact("/", "home-emojis")?,
        Route::new("/rainbows", "rainbow-emojis")?,
        Route::new("/bears", "bear-emojis")?,
    ]);
    let main = Router::with_routes([
        Route::exact("/", "home")?,
        Route::new("/rainbows", "rainbows")?,
        Route::new("/bears", "bears")?,
    ]);

    let slot = |name: &str, router: &Router<&'static str>| {
        router.resolve_first(path).map_or_else(
            || format!("{name}: empty"),
            |matched| format!("{name}: {}", matched.handler),
        )
    };
    Ok(vec![slot("sidebar", &sidebar), slot("main", &main)])
}

/// Loads a route table (TOML, or JSON by extension) and resolves `path`.
pub fn route_config(routes: Option<&Path>, path: &str) -> anyhow::Result<Vec<String>> {
    let config = match routes {
        Some(file) if file.extension().is_some_and(|ext| ext == "json") => {
            RouteConfig::from_json_file(file)?
        }
        Some(file) => RouteConfig::from_toml_file(file)?,
        None => RouteConfig::from_toml_str(DEFAULT_ROUTES)?,
    };
    let router = Router::from_config(&config)?;
    tracing::debug!(routes = router.len(), "route table loaded");

    let mut lines = describe_chain(&router, path);
    if let Some(leaf) = router.resolve(path).last() {
        if let Some(name) = &leaf.name {
            let params: HashMap<&str, &str> = leaf
                .params
                .iter()
                .map(|(key, value)| (key.as_str(), value.as_str()))
                .collect();
            lines.push(format!("reverse({name}) = {}", router.reverse(name, &params)?));
        }
    }
    Ok(lines)
}

/// Marks each navigation link as active or not for the current path.
pub fn customized_links(path: &str) -> anyhow::Result<Vec<String>> {
    let links = [("/", true), ("/notifications", false), ("/settings", false)];
    links
        .iter()
        .map(|&(link, exact)| -> anyhow::Result<String> {
            let marker = if is_active(link, exact, path)? { "> " } else { "  " };
            Ok(format!("{marker}{link}"))
        })
        .collect()
}

pub fn querystring(href: &str) -> Vec<String> {
    let location = Location::parse(href);
    let mut lines = vec![format!("path: {}", location.path())];

    let mut keys: Vec<_> = location.query().keys().cloned().collect();
    keys.sort();
    for key in keys {
        if let Some(values) = location.query().get_list(&key) {
            lines.push(format!("query {key}: {}", values.join(" | ")));
        }
    }
    if let Some(fragment) = location.fragment() {
        lines.push(format!("fragment: {fragment}"));
    }
    lines.push(format!("href: {}", location.href()));
    lines
}

// ── Navigation ──────────────────────────────────────────────────────

/// Visits `/notifications` behind a login redirect, then logs in and returns
/// to where the redirect came from.
pub async fn protected(authenticated: bool) -> anyhow::Result<Vec<String>> {
    let signed_in = Arc::new(AtomicBool::new(authenticated));
    let check = Arc::clone(&signed_in);
    let rule = protect("/notifications", false, move || check.load(Ordering::SeqCst), "/login")?;
    let navigator = Navigator::builder().redirect_rule(rule).build();

    let mut lines = Vec::new();
    let outcome = navigator.push("/notifications", None).await?;
    lines.push(describe_outcome(&outcome));

    let current = navigator.current_location();
    let from = current
        .state()
        .and_then(|state| state.get("from"))
        .and_then(serde_json::Value::as_str)
        .map(str::to_string);
    if let Some(from) = from {
        lines.push(format!("redirected to {} from {from}", current.path()));
        signed_in.store(true, Ordering::SeqCst);
        let outcome = navigator.replace(&from, None).await?;
        lines.push(format!("logged in, {}", describe_outcome(&outcome)));
    }
    lines.push(format!("history: {} entries", navigator.history_len()));
    Ok(lines)
}

/// Leaves a survey form that blocks transitions, answering the prompt with
/// `confirm`.
pub async fn prevent_transition(confirm: bool) -> anyhow::Result<Vec<String>> {
    let builder = Navigator::builder();
    let navigator = if confirm {
        builder.confirm(AlwaysConfirm).build()
    } else {
        builder.confirm(AlwaysDecline).build()
    };

    navigator.push("/survey", None).await?;
    let guard = navigator.block(prompt(|to| {
        format!("Are you sure you want to go to {}", to.path())
    }));

    let mut lines = vec![format!("on {}", navigator.current_location().path())];
    let outcome = navigator.push("/settings", None).await?;
    lines.push(describe_outcome(&outcome));

    if outcome.is_aborted() {
        guard.release();
        lines.push("form submitted, guard released".to_string());
        let outcome = navigator.push("/settings", None).await?;
        lines.push(describe_outcome(&outcome));
    }
    Ok(lines)
}

/// One step of a scripted navigation: `push:<href>`, `replace:<href>`, or
/// `back`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Push(String),
    Replace(String),
    Back,
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some(("push", href)) if !href.is_empty() => Ok(Self::Push(href.to_string())),
            Some(("replace", href)) if !href.is_empty() => Ok(Self::Replace(href.to_string())),
            None if s == "back" => Ok(Self::Back),
            _ => Err(format!(
                "invalid step '{s}': expected push:<href>, replace:<href> or back"
            )),
        }
    }
}

/// Runs `steps` on a navigator configured from `settings`, reporting every
/// event its subscriber receives.
pub async fn navigate(settings: &Settings, steps: &[Step]) -> anyhow::Result<Vec<String>> {
    let navigator = Navigator::from_settings(settings);
    let lines = Arc::new(Mutex::new(vec![format!(
        "start at {}",
        navigator.current_location().href()
    )]));

    let sink = Arc::clone(&lines);
    let _subscription = navigator.subscribe(move |event: &NavigationEvent| {
        sink.lock()
            .expect("tour lines lock poisoned")
            .push(format!("{} {}", event.action, event.location.href()));
    });

    for step in steps {
        let result = match step {
            Step::Push(href) => navigator.push_location(Location::parse(href)).await,
            Step::Replace(href) => navigator.replace_location(Location::parse(href)).await,
            Step::Back => navigator.go_back().await,
        };
        match result {
            Ok(_) => {}
            Err(WaypointError::NoHistory) => lines
                .lock()
                .expect("tour lines lock poisoned")
                .push("back: nothing to go back to".to_string()),
            Err(err) => return Err(err.into()),
        }
    }

    let mut lines = lines.lock().expect("tour lines lock poisoned").clone();
    lines.push(format!(
        "now at {} with {} history entries",
        navigator.current_location().href(),
        navigator.history_len()
    ));
    Ok(lines)
}
