//! Typed errors for store operations.

use std::any::Any;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by the store, the middleware pipeline, and the utilities.
///
/// Every failure is fatal to the call in progress and is returned to the
/// immediate caller. Nothing is retried.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A utility was called with arguments it cannot work with.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// The reducer panicked. The previous state is left intact and no
    /// listener was notified.
    #[error("reducer failed: {message}")]
    ReducerFailure { message: String },

    /// A listener panicked. The state transition already happened; the
    /// listeners after `index` were not notified for this dispatch.
    #[error("listener #{index} failed: {message}")]
    ListenerFailure { index: usize, message: String },

    /// A middleware called `dispatch` on its store facade before the
    /// middleware chain finished assembling.
    #[error("dispatch called while the middleware chain is still being constructed")]
    DispatchUnavailable,

    /// A reducer reached back into the store it is reducing for. The
    /// transition in progress is not affected.
    #[error("store accessed from inside its own reducer")]
    ReducerReentry,

    /// The state could not be round-tripped through JSON.
    #[error("state snapshot failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Extract a readable message from a caught panic payload.
pub(crate) fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
