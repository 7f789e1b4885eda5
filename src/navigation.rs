//! Navigation event queue.
//!
//! Controllers push one-shot navigation events; the shell drains them in
//! order. Events are consumed exactly once; this is a queue, not a
//! broadcast.

use tokio::sync::mpsc;
use tracing::debug;

/// Routable screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Home,
    Search { keyword: String },
    ItemDetail { item_id: String },
    Library,
    Auth,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    Navigate(Screen),
    Back,
}

/// Create a navigator and the receiving end the shell drains.
pub fn channel() -> (Navigator, mpsc::UnboundedReceiver<NavigationEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Navigator { tx }, rx)
}

/// Sending half of the navigation queue, cloned into every controller.
#[derive(Clone)]
pub struct Navigator {
    tx: mpsc::UnboundedSender<NavigationEvent>,
}

impl Navigator {
    pub fn navigate(&self, screen: Screen) {
        debug!(?screen, "navigate");
        // The shell may already be gone during teardown.
        let _ = self.tx.send(NavigationEvent::Navigate(screen));
    }

    pub fn back(&self) {
        debug!("navigate back");
        let _ = self.tx.send(NavigationEvent::Back);
    }
}
