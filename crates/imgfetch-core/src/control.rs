//! Run control: a shared cancel token.
//!
//! The CLI sets the token on Ctrl-C. The batch runner checks it before each
//! request and the HTTP client checks it from the curl progress callback, so
//! in-flight transfers stop and their partial files are discarded.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable cancel flag shared between the batch runner, workers and the signal listener.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; every clone observes it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
