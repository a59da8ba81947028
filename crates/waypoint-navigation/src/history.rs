//! The back stack of committed locations.

use std::collections::VecDeque;

use waypoint_routing::Location;

/// Locations that [`go_back`](crate::Navigator::go_back) can return to, most
/// recent last.
///
/// With a non-zero limit the oldest entries are evicted once the stack is
/// full. A limit of zero means unbounded.
#[derive(Debug, Clone, Default)]
pub struct HistoryStack {
    entries: VecDeque<Location>,
    limit: usize,
}

impl HistoryStack {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit,
        }
    }

    /// Pushes a location, evicting the oldest entry if the limit is reached.
    pub fn push(&mut self, location: Location) {
        self.entries.push_back(location);
        if self.limit > 0 {
            while self.entries.len() > self.limit {
                if let Some(evicted) = self.entries.pop_front() {
                    tracing::debug!(path = evicted.path(), "evicted oldest history entry");
                }
            }
        }
    }

    pub fn pop(&mut self) -> Option<Location> {
        self.entries.pop_back()
    }

    /// Returns the entry [`pop`](Self::pop) would return.
    pub fn peek(&self) -> Option<&Location> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Iterates from the oldest entry to the most recent.
    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.entries.iter()
    }
}
