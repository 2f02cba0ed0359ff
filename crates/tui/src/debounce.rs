//! Single-slot delayed message delivery.
//!
//! A [`Debouncer`] holds at most one pending task. Scheduling a message
//! aborts the pending one, so a burst of triggers yields one delivery a full
//! window after the last trigger.

use std::time::Duration;

use rangecard_protocol::Message;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::trace;

/// Delivers a message on a channel once a quiet window has elapsed.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    tx: UnboundedSender<Message>,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// Creates a debouncer delivering on `tx` after `window`.
    #[must_use]
    pub fn new(window: Duration, tx: UnboundedSender<Message>) -> Self {
        Self {
            window,
            tx,
            pending: None,
        }
    }

    /// Returns the quiet window.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Changes the quiet window. A pending delivery keeps its old deadline.
    pub fn set_window(&mut self, window: Duration) {
        self.window = window;
    }

    /// Delivers `message` after the window, replacing any pending delivery.
    pub fn schedule(&mut self, message: Message) {
        self.cancel();
        let tx = self.tx.clone();
        let window = self.window;
        trace!(?message, ?window, "debounce scheduled");
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            // The receiver is gone only when the app is shutting down.
            let _ = tx.send(message);
        }));
    }

    /// Drops the pending delivery, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Returns `true` while a delivery is scheduled and not yet sent.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
