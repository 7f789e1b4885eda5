//! The immutable snapshot handed to the presentation layer.

use crate::state::message::Message;

/// Marker trait for a screen's data payload.
///
/// Payloads should be:
/// - Immutable (Clone to create new snapshots)
/// - Self-contained (all data needed to render the screen)
/// - Comparable (PartialEq so equal snapshots can be skipped)
pub trait ScreenData: Clone + PartialEq + Send + Sync + 'static {}

/// One screen's consolidated state at a point in time.
///
/// A new instance is produced on every relevant change; nothing mutates
/// a published snapshot. `is_loading` reflects the outstanding-operation
/// count, not error state: a failed operation clears loading even though
/// it leaves a message behind.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    pub message: Option<Message>,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            data: None,
            is_loading: false,
            message: None,
        }
    }
}
