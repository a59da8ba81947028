//! Confirmation stubs for tests.
//!
//! [`ScriptedConfirm`] answers from a queue and records every prompt.
//! [`DeferredConfirm`] parks each prompt until the test answers it, which is
//! how tests hold a navigation in the middle of confirmation.
//!
//! ## Example
//!
//! ```rust,no_run
//! use waypoint_navigation::Navigator;
//! use waypoint_test::confirm::ScriptedConfirm;
//!
//! let confirm = ScriptedConfirm::new([false, true]);
//! let navigator = Navigator::builder().confirm(confirm.clone()).build();
//! // ... the first blocked navigation is declined, the second confirmed.
//! assert!(confirm.prompts().is_empty());
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use waypoint_navigation::Confirm;
use waypoint_routing::Location;

/// A recorded confirmation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// The path of the proposed location.
    pub path: String,
    /// The blocking guard's message.
    pub message: String,
}

/// Answers confirmations from a fixed script.
///
/// When the script runs out, the fallback answer is used (`false` unless
/// changed with [`with_fallback`](Self::with_fallback)). Clones share the
/// script and the recorded prompts.
#[derive(Debug, Clone)]
pub struct ScriptedConfirm {
    answers: Arc<Mutex<VecDeque<bool>>>,
    prompts: Arc<Mutex<Vec<Prompt>>>,
    fallback: bool,
}

impl Default for ScriptedConfirm {
    fn default() -> Self {
        Self::new([])
    }
}

impl ScriptedConfirm {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: Arc::new(Mutex::new(answers.into_iter().collect())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            fallback: false,
        }
    }

    /// Always answers `answer`.
    pub fn always(answer: bool) -> Self {
        Self::new([]).with_fallback(answer)
    }

    #[must_use]
    pub const fn with_fallback(mut self, answer: bool) -> Self {
        self.fallback = answer;
        self
    }

    /// Queues more answers after the existing ones.
    pub fn push_answers(&self, answers: impl IntoIterator<Item = bool>) {
        self.answers
            .lock()
            .expect("ScriptedConfirm lock poisoned")
            .extend(answers);
    }

    /// Returns every prompt seen so far, in order.
    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts
            .lock()
            .expect("ScriptedConfirm lock poisoned")
            .clone()
    }

    /// Returns the messages of every prompt seen so far.
    pub fn messages(&self) -> Vec<String> {
        self.prompts().into_iter().map(|p| p.message).collect()
    }

    pub fn remaining_answers(&self) -> usize {
        self.answers
            .lock()
            .expect("ScriptedConfirm lock poisoned")
            .len()
    }
}

#[async_trait]
impl Confirm for ScriptedConfirm {
    async fn confirm(&self, proposed: &Location, message: &str) -> bool {
        self.prompts
            .lock()
            .expect("ScriptedConfirm lock poisoned")
            .push(Prompt {
                path: proposed.path().to_string(),
                message: message.to_string(),
            });
        self.answers
            .lock()
            .expect("ScriptedConfirm lock poisoned")
            .pop_front()
            .unwrap_or(self.fallback)
    }
}

/// A confirmation request waiting for the test to answer.
#[derive(Debug)]
pub struct PendingPrompt {
    pub location: Location,
    pub message: String,
    responder: oneshot::Sender<bool>,
}

impl PendingPrompt {
    /// Answers the prompt, resuming the waiting navigation.
    pub fn answer(self, confirmed: bool) {
        // The navigation may have been cancelled in the meantime.
        let _ = self.responder.send(confirmed);
    }
}

/// Parks every confirmation until the test answers it.
///
/// A navigation that hits a blocking guard stays in
/// `AwaitingConfirmation` until [`next_prompt`](Self::next_prompt) is
/// answered. A prompt dropped without an answer declines.
#[derive(Debug, Clone)]
pub struct DeferredConfirm {
    sender: mpsc::UnboundedSender<PendingPrompt>,
    receiver: Arc<tokio::sync::Mutex<mpsc::UnboundedReceiver<PendingPrompt>>>,
}

impl Default for DeferredConfirm {
    fn default() -> Self {
        Self::new()
    }
}

impl DeferredConfirm {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender,
            receiver: Arc::new(tokio::sync::Mutex::new(receiver)),
        }
    }

    /// Waits for the next confirmation request.
    pub async fn next_prompt(&self) -> PendingPrompt {
        self.receiver
            .lock()
            .await
            .recv()
            .await
            .expect("DeferredConfirm sender lives as long as self")
    }

    /// Returns the next confirmation request if one is already waiting.
    pub fn try_next_prompt(&self) -> Option<PendingPrompt> {
        self.receiver.try_lock().ok()?.try_recv().ok()
    }
}

#[async_trait]
impl Confirm for DeferredConfirm {
    async fn confirm(&self, proposed: &Location, message: &str) -> bool {
        let (responder, answer) = oneshot::channel();
        let prompt = PendingPrompt {
            location: proposed.clone(),
            message: message.to_string(),
            responder,
        };
        if self.sender.send(prompt).is_err() {
            return false;
        }
        answer.await.unwrap_or(false)
    }
}
