//! Navigation guards.
//!
//! A guard is asked, before every push, replace or back navigation, whether
//! the user may leave the current location for the proposed one. Guards are
//! registered through [`Navigator::block`](crate::Navigator::block) and stay
//! active for as long as the returned [`GuardHandle`] lives, so a view that
//! owns unsaved state holds the handle and drops it when the state is gone.
//!
//! Guards are evaluated in registration order and the first one that blocks
//! decides the confirmation message.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use waypoint_routing::Location;

/// A guard's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// The navigation may proceed.
    Allow,
    /// The navigation needs confirmation; the message is shown to the user.
    Block { message: String },
}

impl GuardDecision {
    /// Shorthand for [`GuardDecision::Block`].
    pub fn block(message: impl Into<String>) -> Self {
        Self::Block {
            message: message.into(),
        }
    }

    pub const fn is_blocking(&self) -> bool {
        matches!(self, Self::Block { .. })
    }
}

/// A registered guard: `(current, proposed) -> decision`.
pub type Guard = Arc<dyn Fn(&Location, &Location) -> GuardDecision + Send + Sync>;

/// Builds a guard that always blocks, with a message derived from the
/// proposed location.
///
/// ```
/// use waypoint_navigation::guard::{prompt, GuardDecision};
/// use waypoint_routing::Location;
///
/// let guard = prompt(|to| format!("Are you sure you want to go to {}", to.path()));
/// let decision = guard(&Location::parse("/survey"), &Location::parse("/settings"));
/// assert_eq!(decision, GuardDecision::block("Are you sure you want to go to /settings"));
/// ```
pub fn prompt<F>(message: F) -> impl Fn(&Location, &Location) -> GuardDecision + Send + Sync + 'static
where
    F: Fn(&Location) -> String + Send + Sync + 'static,
{
    move |_current: &Location, proposed: &Location| GuardDecision::block(message(proposed))
}

#[derive(Default)]
pub(crate) struct GuardRegistry {
    guards: Mutex<Vec<(u64, Guard)>>,
    next_id: AtomicU64,
}

impl GuardRegistry {
    pub(crate) fn insert(&self, guard: Guard) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.guards
            .lock()
            .expect("guard registry lock poisoned")
            .push((id, guard));
        tracing::trace!(guard = id, "guard registered");
        id
    }

    pub(crate) fn remove(&self, id: u64) -> bool {
        let mut guards = self.guards.lock().expect("guard registry lock poisoned");
        let len_before = guards.len();
        guards.retain(|(gid, _)| *gid != id);
        let removed = guards.len() < len_before;
        if removed {
            tracing::trace!(guard = id, "guard released");
        }
        removed
    }

    pub(crate) fn len(&self) -> usize {
        self.guards.lock().expect("guard registry lock poisoned").len()
    }

    /// Runs the guards in order and returns the first blocking message.
    ///
    /// The registry lock is not held while guards run.
    pub(crate) fn evaluate(&self, current: &Location, proposed: &Location) -> Option<String> {
        let snapshot: Vec<Guard> = self
            .guards
            .lock()
            .expect("guard registry lock poisoned")
            .iter()
            .map(|(_, guard)| Arc::clone(guard))
            .collect();

        snapshot
            .iter()
            .find_map(|guard| match guard(current, proposed) {
                GuardDecision::Allow => None,
                GuardDecision::Block { message } => Some(message),
            })
    }
}

/// Keeps a guard registered. Dropping the handle, including while unwinding
/// from a panic, releases the guard.
#[must_use = "dropping the handle releases the guard immediately"]
pub struct GuardHandle {
    id: u64,
    registry: Weak<GuardRegistry>,
}

impl GuardHandle {
    pub(crate) fn new(id: u64, registry: &Arc<GuardRegistry>) -> Self {
        Self {
            id,
            registry: Arc::downgrade(registry),
        }
    }

    /// Releases the guard now. Returns `false` if the navigator is gone.
    pub fn release(self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.remove(self.id))
    }
}

impl fmt::Debug for GuardHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardHandle").field("id", &self.id).finish()
    }
}

impl Drop for GuardHandle {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
    }
}
