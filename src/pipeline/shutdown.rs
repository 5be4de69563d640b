//! Cooperative shutdown signal shared by the scanner and the workers.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cloneable flag asking a running build to stop.
///
/// The scanner stops enqueuing once the flag is set, and workers stop
/// processing between files, never in the middle of one. Setting the flag is
/// permanent: a pool whose handle was triggered interrupts every later build.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandle {
    requested: Arc<AtomicBool>,
}

impl ShutdownHandle {
    /// Create a handle that has not been triggered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the build to stop.
    pub fn request(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    /// Whether a stop has been requested.
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}
