//! # Monitor Errors
//!
//! One error type for the whole watcher: actor plumbing failures and order
//! source failures share [`WatchError`], so callers match on a single enum.

/// Errors that can occur while talking to the monitor or fetching orders.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("Monitor closed")]
    ActorClosed,
    #[error("Monitor dropped response channel")]
    ActorDropped,
    #[error("Unexpected response status: {status} {reason}")]
    UnexpectedStatus { status: u16, reason: String },
    #[error("Order source error: {0}")]
    Source(Box<dyn std::error::Error + Send + Sync>),
    #[error("Monitor task failed: {0}")]
    TaskFailed(String),
}

impl WatchError {
    pub fn source_error(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        WatchError::Source(Box::new(e))
    }
}
