//! # waypoint-navigation
//!
//! The navigation controller: the single owner of "where are we now".
//!
//! - [`controller`]: [`Navigator`], push / replace / go-back and subscriptions
//! - [`guard`]: scoped navigation guards ("may I leave this page?")
//! - [`confirm`]: the asynchronous confirmation side-channel for blocked navigations
//! - [`redirect`]: redirect rules applied before guards, such as protected routes
//! - [`history`]: the bounded back stack
//! - [`event`]: navigation events, outcomes and states
//!
//! ## Example
//!
//! ```
//! # tokio_test::block_on(async {
//! use waypoint_navigation::{GuardDecision, NavigationOutcome, Navigator};
//!
//! let navigator = Navigator::new();
//! let guard = navigator.block(|_, to| {
//!     GuardDecision::block(format!("Are you sure you want to go to {}", to.path()))
//! });
//!
//! // The default confirmation declines, so the guard keeps us here.
//! let outcome = navigator.push("/settings", None).await.unwrap();
//! assert!(matches!(outcome, NavigationOutcome::Aborted { .. }));
//!
//! drop(guard);
//! assert!(navigator.push("/settings", None).await.unwrap().is_committed());
//! # });
//! ```

pub mod confirm;
pub mod controller;
pub mod event;
pub mod guard;
pub mod history;
pub mod redirect;

pub use confirm::{AlwaysConfirm, AlwaysDecline, Confirm};
pub use controller::{Navigator, NavigatorBuilder};
pub use event::{NavigationAction, NavigationEvent, NavigationOutcome, NavigationState};
pub use guard::{Guard, GuardDecision, GuardHandle};
pub use history::HistoryStack;
pub use redirect::RedirectRule;
