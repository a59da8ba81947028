//! Ordered, nestable route tables.
//!
//! A [`Router`] holds top-level [`Route`]s in registration order. Resolution
//! walks them in that order and stops at the first route whose pattern is
//! satisfied under its own `exact` flag; that route's children are then tried
//! depth-first against the part of the path the parent left unmatched.
//!
//! Registration order wins over specificity: registering `/:name` before
//! `/invoices/:id` means `/invoices/42` resolves to `/:name`.

use std::collections::HashMap;
use std::hash::BuildHasher;

use waypoint_core::{WaypointError, WaypointResult};

use crate::path;
use crate::pattern::{compile, RoutePattern};

/// A route binding a compiled pattern to a caller-defined handler key.
///
/// `H` is opaque to the router: a string, an enum or anything `Clone`.
#[derive(Debug, Clone)]
pub struct Route<H> {
    pattern: RoutePattern,
    handler: H,
    exact: bool,
    name: Option<String>,
    children: Vec<Route<H>>,
}

impl<H> Route<H> {
    /// Creates a route that matches in prefix mode.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::InvalidPattern`] if the pattern does not compile.
    pub fn new(pattern: &str, handler: H) -> WaypointResult<Self> {
        Ok(Self {
            pattern: compile(pattern)?,
            handler,
            exact: false,
            name: None,
            children: Vec::new(),
        })
    }

    /// Creates a route that only matches when the whole path is consumed.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::InvalidPattern`] if the pattern does not compile.
    pub fn exact(pattern: &str, handler: H) -> WaypointResult<Self> {
        Ok(Self::new(pattern, handler)?.with_exact(true))
    }

    /// Sets the exact flag.
    #[must_use]
    pub fn with_exact(mut self, exact: bool) -> Self {
        self.exact = exact;
        self
    }

    /// Names the route for [`Router::reverse`].
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Appends a nested route. Its pattern is relative to this route.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Appends several nested routes, keeping their order.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn is_exact(&self) -> bool {
        self.exact
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn children(&self) -> &[Self] {
        &self.children
    }
}

/// One level of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult<H> {
    /// The handler key of the matched route.
    pub handler: H,
    /// Parameters captured by this route and every ancestor.
    pub params: HashMap<String, String>,
    /// The consumed path, cumulative across ancestors.
    pub matched_path: String,
    /// What this route left unmatched (empty when fully consumed).
    pub remaining_path: String,
    /// The source text of the matched pattern.
    pub pattern: String,
    /// The route name, if one was given.
    pub name: Option<String>,
}

impl<H> MatchResult<H> {
    /// Returns the value captured for the named parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// An ordered collection of routes.
#[derive(Debug, Clone)]
pub struct Router<H> {
    routes: Vec<Route<H>>,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Router<H> {
    /// Creates an empty router.
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Creates a router from routes, keeping their order.
    pub fn with_routes(routes: impl IntoIterator<Item = Route<H>>) -> Self {
        let mut router = Self::new();
        for route in routes {
            router.register(route);
        }
        router
    }

    /// Appends a route. Routes are tried in the order they are registered.
    pub fn register(&mut self, route: Route<H>) -> &mut Self {
        tracing::trace!(
            pattern = route.pattern.source(),
            exact = route.exact,
            children = route.children.len(),
            "registered route"
        );
        self.routes.push(route);
        self
    }

    pub fn routes(&self) -> &[Route<H>] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Builds the concrete path of a named route, walking nested routes.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::RouteNotFound`] for an unknown name and
    /// [`WaypointError::MissingParameter`] if a pattern along the chain needs
    /// a parameter that was not supplied.
    pub fn reverse<S: BuildHasher>(
        &self,
        name: &str,
        params: &HashMap<&str, &str, S>,
    ) -> WaypointResult<String> {
        let chain = find_named(&self.routes, name)
            .ok_or_else(|| WaypointError::RouteNotFound(name.to_string()))?;

        let mut out = String::from("/");
        for route in chain {
            out = path::concat(&out, &route.pattern.reverse(params)?);
        }
        Ok(out)
    }
}

impl<H: Clone> Router<H> {
    /// Resolves a path to the chain of matched routes, outermost first.
    ///
    /// `path` may be a full href; only its path part is matched. Returns an
    /// empty vector when nothing matches.
    pub fn resolve(&self, path: &str) -> Vec<MatchResult<H>> {
        for route in &self.routes {
            if let Some(chain) = resolve_route(route, path, &HashMap::new(), "/") {
                return chain;
            }
        }
        tracing::debug!(path, "no route matched");
        Vec::new()
    }

    /// Resolves a path to the innermost matched route of the first chain.
    pub fn resolve_first(&self, path: &str) -> Option<MatchResult<H>> {
        self.resolve(path).pop()
    }

    /// Matches every top-level route independently, in registration order.
    ///
    /// Unlike [`resolve`](Self::resolve) there is no first-match exclusivity,
    /// which suits layouts that render several route tables side by side.
    /// Each entry is the full chain for one top-level route.
    pub fn match_all(&self, path: &str) -> Vec<Vec<MatchResult<H>>> {
        self.routes
            .iter()
            .filter_map(|route| resolve_route(route, path, &HashMap::new(), "/"))
            .collect()
    }
}

/// Returns `true` if `path` matches `pattern` under the given mode.
///
/// Useful for styling links to the current location.
///
/// # Errors
///
/// Returns [`WaypointError::InvalidPattern`] if the pattern does not compile.
pub fn is_active(pattern: &str, exact: bool, path: &str) -> WaypointResult<bool> {
    Ok(compile(pattern)?.match_path(path, exact).is_some())
}

fn resolve_route<H: Clone>(
    route: &Route<H>,
    path: &str,
    inherited: &HashMap<String, String>,
    prefix: &str,
) -> Option<Vec<MatchResult<H>>> {
    let matched = route.pattern.match_path(path, route.exact)?;

    let mut params = inherited.clone();
    params.extend(matched.params);
    let matched_path = path::concat(prefix, &matched.matched_path);

    let mut chain = vec![MatchResult {
        handler: route.handler.clone(),
        params: params.clone(),
        matched_path: matched_path.clone(),
        remaining_path: matched.remaining_path.clone(),
        pattern: route.pattern.source().to_string(),
        name: route.name.clone(),
    }];

    for child in &route.children {
        if let Some(nested) = resolve_route(child, &matched.remaining_path, &params, &matched_path) {
            chain.extend(nested);
            break;
        }
    }

    Some(chain)
}

fn find_named<'a, H>(routes: &'a [Route<H>], name: &str) -> Option<Vec<&'a Route<H>>> {
    for route in routes {
        if route.name.as_deref() == Some(name) {
            return Some(vec![route]);
        }
        if let Some(mut chain) = find_named(&route.children, name) {
            chain.insert(0, route);
            return Some(chain);
        }
    }
    None
}
