//! Cooperative cancellation for orchestration runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Caller-held cancellation flag, checked before each orchestration step.
///
/// Cancellation can only prevent steps that have not started: once a
/// transaction is submitted it cannot be un-submitted, so a cancel after the
/// send stops the delivery wait but not the transfer itself.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Create a fresh, un-cancelled handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the run holding this handle.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
