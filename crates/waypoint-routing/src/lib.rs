//! # waypoint-routing
//!
//! Route matching for the waypoint navigation core.
//!
//! - [`pattern`]: Route pattern compilation and matching (`/invoices/:id`, `*`)
//! - [`router`]: Ordered, nestable route tables with first-match resolution
//! - [`config`]: Route tables declared as data (TOML / JSON)
//! - [`location`]: The addressable navigation state (path, query, fragment, state)
//! - [`querydict`]: Multi-valued query string dictionary
//!
//! # Examples
//!
//! ```
//! use waypoint_routing::router::{Route, Router};
//!
//! let mut router = Router::new();
//! router.register(Route::exact("/", "home").unwrap());
//! router.register(Route::exact("/settings", "settings").unwrap());
//! router.register(Route::new("*", "not-found").unwrap());
//!
//! assert_eq!(router.resolve_first("/settings").unwrap().handler, "settings");
//! assert_eq!(router.resolve_first("/unknown").unwrap().handler, "not-found");
//! ```

pub mod config;
pub mod location;
pub mod path;
pub mod pattern;
pub mod querydict;
pub mod router;

pub use config::{RouteConfig, RouteTable};
pub use location::Location;
pub use pattern::{compile, match_path, PathMatch, RoutePattern, Segment, WILDCARD_PARAM};
pub use querydict::QueryDict;
pub use router::{is_active, MatchResult, Route, Router};
