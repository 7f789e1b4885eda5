//! Reference-counted busy signal.

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, error};

/// Counts a screen's outstanding asynchronous operations and broadcasts
/// `busy = count > 0` to subscribers.
///
/// Each operation must pair one [`increment`](Self::increment) with
/// exactly one [`decrement`](Self::decrement). The count can never go
/// negative: an unpaired decrement is a caller imbalance and panics in
/// debug builds; release builds clamp to zero and log the defect.
pub struct LoadingCounter {
    count: Mutex<u32>,
    busy_tx: watch::Sender<bool>,
}

impl LoadingCounter {
    pub fn new() -> Self {
        let (busy_tx, _) = watch::channel(false);
        Self {
            count: Mutex::new(0),
            busy_tx,
        }
    }

    /// Record the start of one tracked operation.
    pub fn increment(&self) {
        let mut count = self.count.lock();
        *count += 1;
        debug!(count = *count, "loader added");
        self.busy_tx.send_replace(*count > 0);
    }

    /// Record the completion of one tracked operation.
    pub fn decrement(&self) {
        let mut count = self.count.lock();
        if *count == 0 {
            debug_assert!(false, "loading counter decremented below zero");
            error!("loading counter decremented below zero; clamping");
            return;
        }
        *count -= 1;
        debug!(count = *count, "loader removed");
        self.busy_tx.send_replace(*count > 0);
    }

    /// Current busy flag without subscribing.
    pub fn is_busy(&self) -> bool {
        *self.busy_tx.borrow()
    }

    /// Replay-latest broadcast of the busy flag. A new subscriber
    /// immediately sees the current value, then every change.
    pub fn observe(&self) -> watch::Receiver<bool> {
        self.busy_tx.subscribe()
    }
}

impl Default for LoadingCounter {
    fn default() -> Self {
        Self::new()
    }
}
