//! # waypoint-test
//!
//! Testing utilities for waypoint. Provides confirmation stubs that answer
//! from a script or on demand, an event recorder for navigators, a tracing
//! setup that writes through the test harness, and fixture routers for the
//! common routing scenarios.
//!
//! ## Modules
//!
//! - [`confirm`] - [`ScriptedConfirm`] and [`DeferredConfirm`]
//! - [`recorder`] - [`EventRecorder`]
//! - [`logging`] - [`init_test_logging`]
//! - [`fixtures`] - Prebuilt routers and navigators

pub mod confirm;
pub mod fixtures;
pub mod logging;
pub mod recorder;

pub use confirm::{DeferredConfirm, PendingPrompt, Prompt, ScriptedConfirm};
pub use logging::init_test_logging;
pub use recorder::EventRecorder;
