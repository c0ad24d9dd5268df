//! Debounced free-text search dispatch.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::trace;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Debounce window between the last keystroke and the dispatched query.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Minimum term length before a query dispatches.
pub const MIN_SEARCH_LEN: usize = 3;

/// A dispatched search signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchSignal {
    /// A settled query term, at least [`MIN_SEARCH_LEN`] characters.
    Query(String),
    /// The input was cleared; listeners reset their filter.
    Cleared,
}

/// Debounces keystrokes into search signals.
///
/// Only one timer is ever pending: each keystroke cancels and replaces
/// it, so a burst of typing dispatches a single query once the input
/// settles. An empty term short-circuits the timer and emits
/// [`SearchSignal::Cleared`] immediately; terms shorter than
/// [`MIN_SEARCH_LEN`] emit nothing.
pub struct SearchDebouncer {
    tx: UnboundedSender<SearchSignal>,
    pending: Arc<Mutex<Option<JoinHandle<()>>>>,
    delay: Duration,
}

impl SearchDebouncer {
    /// Create a debouncer with the stock 300 ms window.
    pub fn new() -> (Self, UnboundedReceiver<SearchSignal>) {
        Self::with_delay(SEARCH_DEBOUNCE)
    }

    /// Create a debouncer with a custom window.
    pub fn with_delay(delay: Duration) -> (Self, UnboundedReceiver<SearchSignal>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                pending: Arc::new(Mutex::new(None)),
                delay,
            },
            rx,
        )
    }

    /// Feed the current input value after a keystroke.
    pub fn input(&self, term: &str) {
        self.cancel_pending();

        if term.is_empty() {
            trace!("search cleared");
            let _ = self.tx.send(SearchSignal::Cleared);
            return;
        }
        if term.chars().count() < MIN_SEARCH_LEN {
            return;
        }

        let tx = self.tx.clone();
        let term = term.to_string();
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            trace!("search settled: {term}");
            let _ = tx.send(SearchSignal::Query(term));
        });

        if let Ok(mut pending) = self.pending.lock() {
            *pending = Some(handle);
        }
    }

    fn cancel_pending(&self) {
        if let Ok(mut pending) = self.pending.lock()
            && let Some(handle) = pending.take()
        {
            handle.abort();
        }
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
