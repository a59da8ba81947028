//! Recording of navigation events.
//!
//! [`EventRecorder`] subscribes to a [`Navigator`] and keeps every committed
//! [`NavigationEvent`] for later assertions. Recording stops when the recorder
//! is dropped or [`detach`](EventRecorder::detach)ed.

use std::sync::{Arc, Mutex};

use waypoint_navigation::{NavigationAction, NavigationEvent, Navigator};
use waypoint_signals::Subscription;

/// Captures navigation events in commit order.
#[derive(Debug)]
pub struct EventRecorder {
    events: Arc<Mutex<Vec<NavigationEvent>>>,
    subscription: Option<Subscription>,
}

impl EventRecorder {
    /// Starts recording events from `navigator`.
    pub fn attach(navigator: &Navigator) -> Self {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let subscription = navigator.subscribe(move |event: &NavigationEvent| {
            sink.lock()
                .expect("EventRecorder lock poisoned")
                .push(event.clone());
        });
        Self {
            events,
            subscription: Some(subscription),
        }
    }

    /// Returns all recorded events.
    pub fn events(&self) -> Vec<NavigationEvent> {
        self.events
            .lock()
            .expect("EventRecorder lock poisoned")
            .clone()
    }

    /// Returns the path of every recorded event.
    pub fn paths(&self) -> Vec<String> {
        self.events
            .lock()
            .expect("EventRecorder lock poisoned")
            .iter()
            .map(|event| event.location.path().to_string())
            .collect()
    }

    /// Returns the action of every recorded event.
    pub fn actions(&self) -> Vec<NavigationAction> {
        self.events
            .lock()
            .expect("EventRecorder lock poisoned")
            .iter()
            .map(|event| event.action)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().expect("EventRecorder lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Discards the recorded events and keeps recording.
    pub fn clear(&self) {
        self.events
            .lock()
            .expect("EventRecorder lock poisoned")
            .clear();
    }

    /// Stops recording. Events recorded so far remain available.
    pub fn detach(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}
