//! Route tables declared as data.
//!
//! A route configuration is a tree of [`RouteTable`] entries that can be
//! written in TOML or JSON and turned into a [`Router<String>`]:
//!
//! ```toml
//! [[routes]]
//! path = "/"
//! handler = "home"
//! exact = true
//!
//! [[routes]]
//! path = "/tacos"
//! handler = "tacos"
//!
//! [[routes.routes]]
//! path = "/bus"
//! handler = "bus"
//! name = "bus"
//! ```
//!
//! Handler keys stay strings; mapping them onto views is the caller's job.

use std::path::Path;

use serde::{Deserialize, Serialize};
use waypoint_core::{WaypointError, WaypointResult};

use crate::router::{Route, Router};

/// One route in a declarative route tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    /// The route pattern, relative to the parent entry.
    pub path: String,
    /// The handler key returned on a match.
    pub handler: String,
    /// Whether the whole remaining path must be consumed.
    #[serde(default)]
    pub exact: bool,
    /// Optional name for reverse lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Nested routes, tried in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<RouteTable>,
}

impl RouteTable {
    /// Compiles this entry and its descendants into a [`Route`].
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::InvalidPattern`] for the first pattern that
    /// fails to compile.
    pub fn build_route(&self) -> WaypointResult<Route<String>> {
        let mut route = Route::new(&self.path, self.handler.clone())?.with_exact(self.exact);
        if let Some(name) = &self.name {
            route = route.named(name.clone());
        }
        for child in &self.routes {
            route = route.child(child.build_route()?);
        }
        Ok(route)
    }
}

/// A complete route configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Top-level routes in registration order.
    #[serde(default)]
    pub routes: Vec<RouteTable>,
}

impl RouteConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(toml_str: &str) -> WaypointResult<Self> {
        toml::from_str(toml_str).map_err(|e| {
            WaypointError::ConfigurationError(format!("Failed to parse route table TOML: {e}"))
        })
    }

    /// Reads and parses a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> WaypointResult<Self> {
        Self::from_toml_str(&read_table_file(path.as_ref())?)
    }

    /// Parses a JSON document.
    pub fn from_json_str(json_str: &str) -> WaypointResult<Self> {
        serde_json::from_str(json_str).map_err(|e| {
            WaypointError::ConfigurationError(format!("Failed to parse route table JSON: {e}"))
        })
    }

    /// Reads and parses a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> WaypointResult<Self> {
        Self::from_json_str(&read_table_file(path.as_ref())?)
    }

    /// Compiles every entry into a router, keeping document order.
    pub fn build_router(&self) -> WaypointResult<Router<String>> {
        Router::from_config(self)
    }
}

impl Router<String> {
    /// Builds a router from a route configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::InvalidPattern`] if any pattern in the tree
    /// fails to compile. No partial router is returned.
    pub fn from_config(config: &RouteConfig) -> WaypointResult<Self> {
        let routes = config
            .routes
            .iter()
            .map(RouteTable::build_route)
            .collect::<WaypointResult<Vec<_>>>()?;
        tracing::debug!(routes = routes.len(), "built router from route table");
        Ok(Self::with_routes(routes))
    }
}

fn read_table_file(path: &Path) -> WaypointResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "failed to read route table");
        WaypointError::from(e)
    })
}
