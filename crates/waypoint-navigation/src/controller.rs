//! The navigation controller.
//!
//! [`Navigator`] owns the current [`Location`] and the back stack. Every
//! navigation runs the same pipeline:
//!
//! 1. wait for earlier navigations to finish (FIFO);
//! 2. apply redirect rules (push and replace only);
//! 3. evaluate guards, and if one blocks, await the confirmation side-channel;
//! 4. commit, then notify subscribers in registration order.
//!
//! Locks on the location and the history are never held across an `.await`
//! or while subscribers run.

use std::fmt;
use std::sync::{Arc, Mutex, RwLock};

use serde_json::Value;
use tracing::Instrument;
use waypoint_core::logging::navigation_span;
use waypoint_core::{Settings, WaypointError, WaypointResult};
use waypoint_routing::Location;
use waypoint_signals::{Signal, Subscription};

use crate::confirm::{AlwaysConfirm, AlwaysDecline, Confirm};
use crate::event::{NavigationAction, NavigationEvent, NavigationOutcome, NavigationState};
use crate::guard::{GuardDecision, GuardHandle, GuardRegistry};
use crate::history::HistoryStack;
use crate::redirect::{self, RedirectRule};

struct Inner {
    current: RwLock<Location>,
    history: Mutex<HistoryStack>,
    /// Serializes navigations. Tokio's mutex queues waiters in FIFO order.
    gate: tokio::sync::Mutex<()>,
    state: Mutex<NavigationState>,
    guards: Arc<GuardRegistry>,
    listeners: Signal<NavigationEvent>,
    confirm: Arc<dyn Confirm>,
    redirects: Vec<RedirectRule>,
    max_redirects: usize,
}

/// A handle to shared navigation state.
///
/// Cloning is cheap and every clone drives the same state.
///
/// # Examples
///
/// ```
/// # tokio_test::block_on(async {
/// use waypoint_navigation::Navigator;
///
/// let navigator = Navigator::new();
/// navigator.push("/invoices/42/", None).await.unwrap();
/// assert_eq!(navigator.current_location().path(), "/invoices/42");
///
/// navigator.go_back().await.unwrap();
/// assert_eq!(navigator.current_location().path(), "/");
/// # });
/// ```
#[derive(Clone)]
pub struct Navigator {
    inner: Arc<Inner>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Navigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("current", &self.current_location().href())
            .field("history", &self.history_len())
            .field("guards", &self.guard_count())
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl Navigator {
    /// Creates a navigator at `/` with default settings.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> NavigatorBuilder {
        NavigatorBuilder::default()
    }

    /// Creates a navigator configured from settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::builder().settings(settings).build()
    }

    /// Returns a copy of the current location.
    pub fn current_location(&self) -> Location {
        self.inner
            .current
            .read()
            .expect("navigator location lock poisoned")
            .clone()
    }

    /// Navigates to `path`, adding a history entry.
    ///
    /// `path` may carry a query string and a fragment. `state` is attached to
    /// the new location as-is.
    pub async fn push(&self, path: &str, state: Option<Value>) -> WaypointResult<NavigationOutcome> {
        let proposed = Location::parse(path).with_optional_state(state);
        self.navigate(NavigationAction::Push, Some(proposed)).await
    }

    /// Navigates to `path`, replacing the current entry.
    pub async fn replace(&self, path: &str, state: Option<Value>) -> WaypointResult<NavigationOutcome> {
        let proposed = Location::parse(path).with_optional_state(state);
        self.navigate(NavigationAction::Replace, Some(proposed)).await
    }

    /// Pushes a fully built location.
    pub async fn push_location(&self, location: Location) -> WaypointResult<NavigationOutcome> {
        self.navigate(NavigationAction::Push, Some(location)).await
    }

    /// Replaces the current entry with a fully built location.
    pub async fn replace_location(&self, location: Location) -> WaypointResult<NavigationOutcome> {
        self.navigate(NavigationAction::Replace, Some(location)).await
    }

    /// Returns to the previous committed location.
    ///
    /// Guards are evaluated as for any other navigation; redirect rules are
    /// not.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::NoHistory`] when there is nothing to go back to.
    pub async fn go_back(&self) -> WaypointResult<NavigationOutcome> {
        self.navigate(NavigationAction::Pop, None).await
    }

    /// Registers a listener for committed navigations.
    ///
    /// Listeners run synchronously, in registration order, after each commit.
    /// The listener stays registered while the returned handle lives.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&NavigationEvent) + Send + Sync + 'static,
    {
        self.inner.listeners.subscribe(listener)
    }

    /// Registers a guard for as long as the returned handle lives.
    pub fn block<G>(&self, guard: G) -> GuardHandle
    where
        G: Fn(&Location, &Location) -> GuardDecision + Send + Sync + 'static,
    {
        let id = self.inner.guards.insert(Arc::new(guard));
        GuardHandle::new(id, &self.inner.guards)
    }

    pub fn can_go_back(&self) -> bool {
        self.history_len() > 0
    }

    pub fn history_len(&self) -> usize {
        self.inner
            .history
            .lock()
            .expect("navigator history lock poisoned")
            .len()
    }

    pub fn guard_count(&self) -> usize {
        self.inner.guards.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.receiver_count()
    }

    pub fn state(&self) -> NavigationState {
        *self.inner.state.lock().expect("navigator state lock poisoned")
    }

    /// Returns `true` if the current path matches `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::InvalidPattern`] if the pattern does not compile.
    pub fn is_active(&self, pattern: &str, exact: bool) -> WaypointResult<bool> {
        waypoint_routing::is_active(pattern, exact, self.current_location().path())
    }

    async fn navigate(
        &self,
        action: NavigationAction,
        target: Option<Location>,
    ) -> WaypointResult<NavigationOutcome> {
        let requested = target.as_ref().map_or("<back>", Location::path).to_string();
        let span = navigation_span(action.as_str(), &requested);
        self.run(action, target).instrument(span).await
    }

    async fn run(
        &self,
        action: NavigationAction,
        target: Option<Location>,
    ) -> WaypointResult<NavigationOutcome> {
        let _gate = self.inner.gate.lock().await;
        let _idle = ResetToIdle(&self.inner.state);

        let proposed = match target {
            Some(location) => redirect::apply(&self.inner.redirects, location, self.inner.max_redirects)?,
            None => self
                .inner
                .history
                .lock()
                .expect("navigator history lock poisoned")
                .peek()
                .cloned()
                .ok_or(WaypointError::NoHistory)?,
        };

        self.set_state(NavigationState::EvaluatingGuards);
        let current = self.current_location();

        if let Some(message) = self.inner.guards.evaluate(&current, &proposed) {
            self.set_state(NavigationState::AwaitingConfirmation);
            tracing::debug!(%message, to = proposed.path(), "navigation blocked, awaiting confirmation");

            if !self.inner.confirm.confirm(&proposed, &message).await {
                tracing::info!(%message, to = proposed.path(), "navigation aborted");
                return Ok(NavigationOutcome::Aborted { message });
            }
        }

        Ok(NavigationOutcome::Committed(self.commit(action, proposed)))
    }

    fn commit(&self, action: NavigationAction, location: Location) -> Location {
        {
            let mut current = self
                .inner
                .current
                .write()
                .expect("navigator location lock poisoned");
            let mut history = self
                .inner
                .history
                .lock()
                .expect("navigator history lock poisoned");

            let previous = std::mem::replace(&mut *current, location.clone());
            match action {
                NavigationAction::Push => history.push(previous),
                NavigationAction::Replace => {}
                NavigationAction::Pop => {
                    history.pop();
                }
            }
        }

        tracing::debug!(action = action.as_str(), href = %location.href(), "navigation committed");

        self.inner.listeners.send(&NavigationEvent {
            action,
            location: location.clone(),
        });
        location
    }

    fn set_state(&self, state: NavigationState) {
        *self.inner.state.lock().expect("navigator state lock poisoned") = state;
    }
}

/// Returns the state to idle when a navigation ends, including when its future
/// is dropped mid-confirmation.
struct ResetToIdle<'a>(&'a Mutex<NavigationState>);

impl Drop for ResetToIdle<'_> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.0.lock() {
            *state = NavigationState::Idle;
        }
    }
}

/// Builder for [`Navigator`].
pub struct NavigatorBuilder {
    initial: Location,
    confirm: Option<Arc<dyn Confirm>>,
    confirm_by_default: bool,
    redirects: Vec<RedirectRule>,
    max_redirects: usize,
    history_limit: usize,
}

impl Default for NavigatorBuilder {
    fn default() -> Self {
        let defaults = Settings::default();
        Self {
            initial: Location::parse(&defaults.initial_path),
            confirm: None,
            confirm_by_default: defaults.confirm_by_default,
            redirects: Vec::new(),
            max_redirects: defaults.max_redirects,
            history_limit: defaults.history_limit,
        }
    }
}

impl fmt::Debug for NavigatorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigatorBuilder")
            .field("initial", &self.initial.href())
            .field("redirects", &self.redirects.len())
            .field("max_redirects", &self.max_redirects)
            .field("history_limit", &self.history_limit)
            .finish_non_exhaustive()
    }
}

impl NavigatorBuilder {
    /// Takes the initial path, history limit, redirect limit and default
    /// confirmation policy from settings.
    #[must_use]
    pub fn settings(mut self, settings: &Settings) -> Self {
        self.initial = Location::parse(&settings.initial_path);
        self.history_limit = settings.history_limit;
        self.max_redirects = settings.max_redirects;
        self.confirm_by_default = settings.confirm_by_default;
        self
    }

    #[must_use]
    pub fn initial_path(mut self, path: &str) -> Self {
        self.initial = Location::parse(path);
        self
    }

    #[must_use]
    pub fn initial_location(mut self, location: Location) -> Self {
        self.initial = location;
        self
    }

    /// Sets the confirmation side-channel.
    #[must_use]
    pub fn confirm(mut self, confirm: impl Confirm + 'static) -> Self {
        self.confirm = Some(Arc::new(confirm));
        self
    }

    /// Sets a shared confirmation side-channel.
    #[must_use]
    pub fn confirm_shared(mut self, confirm: Arc<dyn Confirm>) -> Self {
        self.confirm = Some(confirm);
        self
    }

    /// Sets a synchronous confirmation closure.
    #[must_use]
    pub fn confirm_with<F>(self, confirm: F) -> Self
    where
        F: Fn(&Location, &str) -> bool + Send + Sync + 'static,
    {
        self.confirm(confirm)
    }

    /// Adds a redirect rule. Rules run in the order they are added.
    #[must_use]
    pub fn redirect<F>(mut self, rule: F) -> Self
    where
        F: Fn(&Location) -> Option<Location> + Send + Sync + 'static,
    {
        self.redirects.push(Arc::new(rule));
        self
    }

    /// Adds a prebuilt redirect rule, such as one from
    /// [`redirect::protect`](crate::redirect::protect).
    #[must_use]
    pub fn redirect_rule(mut self, rule: RedirectRule) -> Self {
        self.redirects.push(rule);
        self
    }

    #[must_use]
    pub const fn max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Caps the back stack; zero means unbounded.
    #[must_use]
    pub const fn history_limit(mut self, history_limit: usize) -> Self {
        self.history_limit = history_limit;
        self
    }

    pub fn build(self) -> Navigator {
        let confirm = self.confirm.unwrap_or_else(|| {
            if self.confirm_by_default {
                Arc::new(AlwaysConfirm)
            } else {
                Arc::new(AlwaysDecline)
            }
        });

        tracing::debug!(
            initial = %self.initial.href(),
            redirects = self.redirects.len(),
            history_limit = self.history_limit,
            "navigator created"
        );

        Navigator {
            inner: Arc::new(Inner {
                current: RwLock::new(self.initial),
                history: Mutex::new(HistoryStack::new(self.history_limit)),
                gate: tokio::sync::Mutex::new(()),
                state: Mutex::new(NavigationState::Idle),
                guards: Arc::new(GuardRegistry::default()),
                listeners: Signal::new(),
                confirm,
                redirects: self.redirects,
                max_redirects: self.max_redirects,
            }),
        }
    }
}
