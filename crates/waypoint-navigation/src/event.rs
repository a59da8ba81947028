//! Values describing navigations: what was requested, how it ended, and what
//! listeners are told.

use std::fmt;

use waypoint_routing::Location;

/// The kind of navigation that was committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationAction {
    /// A new entry was added on top of the history.
    Push,
    /// The current entry was replaced in place.
    Replace,
    /// The history was popped back to the previous entry.
    Pop,
}

impl NavigationAction {
    /// Returns the lowercase name used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Replace => "replace",
            Self::Pop => "pop",
        }
    }
}

impl fmt::Display for NavigationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivered to every subscriber after a navigation commits.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationEvent {
    pub action: NavigationAction,
    /// The location that is now current.
    pub location: Location,
}

/// How a navigation request ended.
///
/// A blocked navigation that was not confirmed is `Aborted`, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationOutcome {
    /// The location was committed and is now current.
    Committed(Location),
    /// A guard blocked the navigation and the confirmation was declined.
    Aborted {
        /// The blocking guard's message.
        message: String,
    },
}

impl NavigationOutcome {
    pub const fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }

    pub const fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted { .. })
    }

    /// Returns the committed location, if any.
    pub const fn location(&self) -> Option<&Location> {
        match self {
            Self::Committed(location) => Some(location),
            Self::Aborted { .. } => None,
        }
    }
}

/// Where the navigator is in handling the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationState {
    /// No navigation is being processed.
    #[default]
    Idle,
    /// Guards are being asked whether the navigation may proceed.
    EvaluatingGuards,
    /// A guard blocked and the confirmation side-channel has been asked.
    AwaitingConfirmation,
}
