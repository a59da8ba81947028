//! # waypoint-signals
//!
//! Ordered, synchronous listener dispatch. A [`Signal`] calls its receivers in
//! the order they were connected, on the thread that sends. Receivers are
//! connected either under an explicit id ([`Signal::connect`]) or through a
//! scoped [`Subscription`] that disconnects when dropped.
//!
//! ## Usage
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use waypoint_signals::Signal;
//!
//! let signal: Signal<String> = Signal::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = Arc::clone(&seen);
//! let subscription = signal.subscribe(move |path: &String| {
//!     sink.lock().unwrap().push(path.clone());
//! });
//!
//! signal.send(&"/settings".to_string());
//! drop(subscription);
//! signal.send(&"/ignored".to_string());
//!
//! assert_eq!(*seen.lock().unwrap(), vec!["/settings".to_string()]);
//! ```

use std::fmt;
use std::sync::{Arc, RwLock, Weak};

/// The type signature for a signal receiver callback.
///
/// Receivers must be `Send + Sync` so that signals can be dispatched from any
/// thread.
pub type SignalReceiver<T> = Arc<dyn Fn(&T) + Send + Sync>;

type ReceiverList<T> = RwLock<Vec<(String, SignalReceiver<T>)>>;

/// A signal that receivers can be connected to and that dispatches payloads
/// of type `T`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use waypoint_signals::Signal;
///
/// let signal: Signal<u32> = Signal::new();
/// signal.connect("logger", Arc::new(|n: &u32| println!("got {n}")));
/// assert_eq!(signal.send(&7), 1);
/// ```
pub struct Signal<T: 'static> {
    receivers: Arc<ReceiverList<T>>,
}

impl<T: 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("receivers", &self.receiver_count())
            .finish()
    }
}

impl<T: 'static> Signal<T> {
    /// Creates a new signal with no connected receivers.
    pub fn new() -> Self {
        Self {
            receivers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Connects a receiver under the given id.
    ///
    /// If a receiver with the same id is already connected it is replaced in
    /// place, keeping its position in the dispatch order.
    pub fn connect(&self, receiver_id: impl Into<String>, callback: SignalReceiver<T>) {
        let id = receiver_id.into();
        let mut receivers = self.receivers.write().expect("signal lock poisoned");

        if let Some(entry) = receivers.iter_mut().find(|(rid, _)| *rid == id) {
            entry.1 = callback;
        } else {
            tracing::trace!(receiver = %id, "connected signal receiver");
            receivers.push((id, callback));
        }
    }

    /// Connects a receiver under a generated id and returns the handle that
    /// keeps it connected.
    #[must_use = "dropping the subscription disconnects the receiver"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = uuid::Uuid::new_v4().to_string();
        self.connect(id.clone(), Arc::new(callback));

        let receivers: Weak<ReceiverList<T>> = Arc::downgrade(&self.receivers);
        let detach_id = id.clone();
        Subscription {
            id,
            detach: Some(Box::new(move || {
                receivers
                    .upgrade()
                    .is_some_and(|receivers| remove_receiver(&receivers, &detach_id))
            })),
        }
    }

    /// Disconnects the receiver with the given id.
    ///
    /// Returns `true` if a receiver was found and removed.
    pub fn disconnect(&self, receiver_id: &str) -> bool {
        remove_receiver(&self.receivers, receiver_id)
    }

    /// Sends the payload to every connected receiver, in connection order.
    ///
    /// The receiver list is snapshotted first, so receivers may connect or
    /// disconnect (including themselves) while being dispatched to; such
    /// changes take effect from the next send. Returns the number of
    /// receivers called.
    pub fn send(&self, payload: &T) -> usize {
        let snapshot: Vec<SignalReceiver<T>> = self
            .receivers
            .read()
            .expect("signal lock poisoned")
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        for callback in &snapshot {
            callback(payload);
        }
        snapshot.len()
    }

    /// Returns the number of connected receivers.
    pub fn receiver_count(&self) -> usize {
        self.receivers.read().expect("signal lock poisoned").len()
    }
}

fn remove_receiver<T>(receivers: &ReceiverList<T>, receiver_id: &str) -> bool {
    let mut receivers = receivers.write().expect("signal lock poisoned");
    let len_before = receivers.len();
    receivers.retain(|(id, _)| id != receiver_id);
    let removed = receivers.len() < len_before;
    if removed {
        tracing::trace!(receiver = receiver_id, "disconnected signal receiver");
    }
    removed
}

/// A scoped receiver registration returned by [`Signal::subscribe`].
///
/// The receiver stays connected for as long as the handle lives. Dropping the
/// handle, or calling [`unsubscribe`](Self::unsubscribe), disconnects it. A
/// subscription that outlives its signal is inert.
pub struct Subscription {
    id: String,
    detach: Option<Box<dyn FnOnce() -> bool + Send + Sync>>,
}

impl Subscription {
    /// Returns the generated receiver id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Disconnects the receiver now.
    ///
    /// Returns `false` if the signal has already been dropped.
    pub fn unsubscribe(mut self) -> bool {
        self.detach.take().is_some_and(|detach| detach())
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[test]
    fn test_signal_connect_and_send() {
        let signal: Signal<String> = Signal::new();
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();

        signal.connect(
            "counter",
            Arc::new(move |_: &String| {
                count_clone.fetch_add(1, Ordering::SeqCst);
            }),
        );

        assert_eq!(signal.send(&"hello".to_string()), 1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_signal_dispatch_order() {
        let signal: Signal<i32> = Signal::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for i in 0..3 {
            let o = order.clone();
            signal.connect(format!("receiver_{i}"), Arc::new(move |_: &i32| o.lock().unwrap().push(i)));
        }

        assert_eq!(signal.send(&42), 3);
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_signal_replace_keeps_position() {
        let signal: Signal<()> = Signal::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let (a, b, c) = (order.clone(), order.clone(), order.clone());
        signal.connect("a", Arc::new(move |(): &()| a.lock().unwrap().push("a")));
        signal.connect("b", Arc::new(move |(): &()| b.lock().unwrap().push("b")));
        signal.connect("a", Arc::new(move |(): &()| c.lock().unwrap().push("a2")));

        assert_eq!(signal.receiver_count(), 2);
        signal.send(&());
        assert_eq!(*order.lock().unwrap(), vec!["a2", "b"]);
    }

    #[test]
    fn test_signal_disconnect() {
        let signal: Signal<()> = Signal::new();

        signal.connect("a", Arc::new(|(): &()| {}));
        signal.connect("b", Arc::new(|(): &()| {}));

        assert!(signal.disconnect("a"));
        assert_eq!(signal.receiver_count(), 1);
        assert!(!signal.disconnect("nonexistent"));
    }

    #[test]
    fn test_subscription_drop_disconnects() {
        let signal: Signal<()> = Signal::new();
        let subscription = signal.subscribe(|(): &()| {});
        assert_eq!(signal.receiver_count(), 1);
        drop(subscription);
        assert_eq!(signal.receiver_count(), 0);
    }

    #[test]
    fn test_subscription_unsubscribe() {
        let signal: Signal<()> = Signal::new();
        let subscription = signal.subscribe(|(): &()| {});
        assert!(!subscription.id().is_empty());
        assert!(subscription.unsubscribe());
        assert_eq!(signal.receiver_count(), 0);
    }

    #[test]
    fn test_subscription_outliving_signal() {
        let signal: Signal<()> = Signal::new();
        let subscription = signal.subscribe(|(): &()| {});
        drop(signal);
        assert!(!subscription.unsubscribe());
    }

    #[test]
    fn test_empty_signal_send() {
        let signal: Signal<()> = Signal::default();
        assert_eq!(signal.send(&()), 0);
    }
}
