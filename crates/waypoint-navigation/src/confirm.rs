//! The confirmation side-channel.
//!
//! When a guard blocks, the navigator asks a [`Confirm`] implementation
//! whether to proceed anyway and awaits the answer. The navigator does not
//! know whether the answer comes from a dialog, a fixed policy or a test.

use async_trait::async_trait;
use waypoint_routing::Location;

/// Asked to confirm a blocked navigation.
///
/// Plain closures `Fn(&Location, &str) -> bool` implement this trait. Because
/// closure parameter types cannot be inferred through the blanket impl, either
/// annotate them or use
/// [`NavigatorBuilder::confirm_with`](crate::NavigatorBuilder::confirm_with).
#[async_trait]
pub trait Confirm: Send + Sync {
    /// Returns `true` to commit the navigation, `false` to abort it.
    async fn confirm(&self, proposed: &Location, message: &str) -> bool;
}

#[async_trait]
impl<F> Confirm for F
where
    F: Fn(&Location, &str) -> bool + Send + Sync,
{
    async fn confirm(&self, proposed: &Location, message: &str) -> bool {
        self(proposed, message)
    }
}

/// Declines every blocked navigation. The default.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysDecline;

#[async_trait]
impl Confirm for AlwaysDecline {
    async fn confirm(&self, _proposed: &Location, _message: &str) -> bool {
        false
    }
}

/// Confirms every blocked navigation.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

#[async_trait]
impl Confirm for AlwaysConfirm {
    async fn confirm(&self, _proposed: &Location, _message: &str) -> bool {
        true
    }
}
