//! Per-screen teardown guard.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// Cancellation signal for everything a screen spawns.
///
/// Closing is one-way: once closed, the screen's subscription tasks stop
/// and in-flight operations must no longer touch the screen's counter or
/// message queue.
#[derive(Clone)]
pub struct ScreenScope {
    closed: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ScreenScope {
    pub fn new() -> Self {
        Self {
            closed: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Mark the scope closed and wake all waiters. Idempotent.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            self.notify.notify_waiters();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Completes when the scope is closed. Safe to call after closing.
    pub async fn closed(&self) {
        let mut notified = std::pin::pin!(self.notify.notified());
        // Register before the flag check so a concurrent close() cannot
        // slip between the check and the await.
        notified.as_mut().enable();
        if self.is_closed() {
            return;
        }
        notified.await;
    }
}

impl Default for ScreenScope {
    fn default() -> Self {
        Self::new()
    }
}
