//! One-shot user-facing messages.

use std::collections::VecDeque;

use parking_lot::Mutex;
use tokio::sync::watch;
use uuid::Uuid;

/// Identifier of a queued message. Fresh per enqueue; a dismissed id is
/// never reused or re-shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(Uuid);

/// A notification meant to be displayed once and then dismissed by id.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
}

/// FIFO queue of one-shot messages.
///
/// The presentation layer sees only the head of the queue (the oldest
/// undismissed message) and acknowledges it with
/// [`dismiss`](Self::dismiss), which reveals the next one.
pub struct MessageQueue {
    queue: Mutex<VecDeque<Message>>,
    head_tx: watch::Sender<Option<Message>>,
}

impl MessageQueue {
    pub fn new() -> Self {
        let (head_tx, _) = watch::channel(None);
        Self {
            queue: Mutex::new(VecDeque::new()),
            head_tx,
        }
    }

    /// Append a message and return its id. If the queue was empty the
    /// new message becomes current and is published to subscribers.
    pub fn enqueue(&self, text: impl Into<String>) -> MessageId {
        let message = Message {
            id: MessageId(Uuid::new_v4()),
            text: text.into(),
        };
        let id = message.id;
        let mut queue = self.queue.lock();
        let was_empty = queue.is_empty();
        queue.push_back(message);
        if was_empty {
            self.head_tx.send_replace(queue.front().cloned());
        }
        id
    }

    /// Remove the message with `id` wherever it sits in the queue. If it
    /// was the current message, the next one (or `None`) is published.
    /// Unknown ids are ignored so UI dismiss actions stay idempotent.
    pub fn dismiss(&self, id: MessageId) {
        let mut queue = self.queue.lock();
        let was_head = queue.front().map(|m| m.id) == Some(id);
        queue.retain(|m| m.id != id);
        if was_head {
            self.head_tx.send_replace(queue.front().cloned());
        }
    }

    /// The oldest undismissed message, if any.
    pub fn current(&self) -> Option<Message> {
        self.head_tx.borrow().clone()
    }

    /// Replay-latest broadcast of the current message.
    pub fn observe(&self) -> watch::Receiver<Option<Message>> {
        self.head_tx.subscribe()
    }
}

impl Default for MessageQueue {
    fn default() -> Self {
        Self::new()
    }
}
