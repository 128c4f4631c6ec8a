use crate::error::{Result, ScopeError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag for aborting a walk in flight.
///
/// Cloning yields a handle to the same flag; a controller thread calls
/// [`set`](CancellationFlag::set) and the traversal observes it before each
/// unit of work. This is the only state the engine shares across threads.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent; there is no way to un-cancel.
    pub fn set(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Set the flag when the process receives Ctrl-C, so an interactive
    /// caller can interrupt a long walk. May only be installed once per
    /// process.
    pub fn hook_ctrlc(&self) -> Result<()> {
        let flag = self.clone();
        ctrlc::set_handler(move || flag.set())
            .map_err(|e| ScopeError::Other(format!("Failed to install Ctrl-C handler: {e}")))
    }
}
