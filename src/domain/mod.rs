//! Domain layer: restartable observers over the local repositories and
//! one-shot interactors that drive remote updates.
//!
//! Operational failures never leave this layer as errors: every tracked
//! operation runs through [`collect_status`], which brackets it with the
//! screen's loading counter and converts a failure into a queued
//! user-facing message.

pub mod interactors;
pub mod observers;

use std::future::Future;

use thiserror::Error;

use crate::data::ApiError;
use crate::state::{LoadingCounter, MessageQueue, ScreenScope};

/// Errors surfaced by domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A remote catalog call failed.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// The caller's input was rejected before any work started.
    #[error("{message}")]
    Validation { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Run one tracked operation for a screen.
///
/// Increments the counter before awaiting the operation and decrements
/// it exactly once afterwards, including when the future is dropped at
/// an await point by teardown, via the drop guard. After the scope has
/// closed, the counter and queue are left alone entirely.
///
/// Returns the operation's value, or `None` on failure; the failure has
/// already been queued as a message by then.
pub async fn collect_status<F, T>(
    scope: &ScreenScope,
    loading: &LoadingCounter,
    messages: &MessageQueue,
    operation: F,
) -> Option<T>
where
    F: Future<Output = Result<T, DomainError>>,
{
    loading.increment();
    let balance = scopeguard::guard((), |()| {
        if !scope.is_closed() {
            loading.decrement();
        }
    });

    let result = operation.await;
    // Balance the increment before publishing any message, so a failed
    // operation always clears loading even though it leaves a message.
    drop(balance);

    match result {
        Ok(value) => Some(value),
        Err(error) => {
            if !scope.is_closed() {
                tracing::debug!(%error, "operation failed");
                messages.enqueue(error.to_string());
            }
            None
        }
    }
}
