//! # waypoint
//!
//! Client-side route matching and navigation for Rust.
//!
//! This is the meta-crate that re-exports the sub-crates for convenient
//! access. Depend on `waypoint` to get everything, or on individual crates
//! for finer-grained control.
//!
//! ```
//! # tokio_test::block_on(async {
//! use waypoint::navigation::Navigator;
//! use waypoint::routing::{Route, Router};
//!
//! let mut router = Router::new();
//! router
//!     .register(Route::exact("/", "home").unwrap())
//!     .register(Route::exact("/settings", "settings").unwrap())
//!     .register(Route::new("*", "not-found").unwrap());
//!
//! let navigator = Navigator::new();
//! navigator.push("/settings", None).await.unwrap();
//!
//! let matched = router.resolve_first(navigator.current_location().path()).unwrap();
//! assert_eq!(matched.handler, "settings");
//! # });
//! ```

/// Error types, settings, and logging setup.
pub use waypoint_core as core;

/// Route patterns, routers, route tables, locations, and query strings.
#[cfg(feature = "routing")]
pub use waypoint_routing as routing;

/// The navigation controller: history, guards, confirmation, and redirects.
#[cfg(feature = "navigation")]
pub use waypoint_navigation as navigation;

/// Ordered listener dispatch with scoped subscriptions.
#[cfg(feature = "signals")]
pub use waypoint_signals as signals;

/// Testing utilities.
#[cfg(feature = "testing")]
pub use waypoint_test as test;

pub use waypoint_core::{WaypointError, WaypointResult};

// Crates that show up in waypoint signatures: navigation state payloads are
// `serde_json::Value`, confirmations are `async_trait` traits run on tokio.
pub use async_trait;
pub use serde_json;
pub use tokio;
pub use tracing;
