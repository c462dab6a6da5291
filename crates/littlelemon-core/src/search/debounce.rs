//! Cancellable timer for search input.
//!
//! Each `push` aborts the pending timer and starts a new one; only a timer
//! that runs to expiry delivers its value on the channel.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Quiet period before a search query is applied.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer and the receiver its settled values arrive on.
    /// Must be called from within a tokio runtime before the first `push`.
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                delay,
                pending: None,
                tx,
            },
            rx,
        )
    }

    /// Restart the timer with `value` as the value to deliver.
    pub fn push(&mut self, value: T) {
        self.cancel();
        let tx = self.tx.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the screen was torn down.
            let _ = tx.send(value);
        }));
    }

    /// Drop the pending value, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
