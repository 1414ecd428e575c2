//! Explicit UI-thread affinity
//!
//! Native toolkits require that navigation and view-hierarchy mutation happen
//! on one cooperative UI thread. Instead of relying on that convention
//! ambiently, every mutating entry point in this crate checks a [`UiThread`]
//! token captured when the host set up its UI loop.

use std::thread::{self, ThreadId};

use crate::error::HostScreenError;

/// Token identifying the host's UI thread.
///
/// Acquire it once on the UI thread and hand clones to anything that needs
/// to decide between synchronous dispatch and marshaling.
#[derive(Debug, Clone)]
pub struct UiThread {
    id: ThreadId,
}

impl UiThread {
    /// Captures the calling thread as the UI thread
    pub fn acquire() -> Self {
        Self {
            id: thread::current().id(),
        }
    }

    /// Returns true when the calling thread is the UI thread
    pub fn is_current(&self) -> bool {
        thread::current().id() == self.id
    }

    /// Errors with [`HostScreenError::OffUiThread`] when called from any
    /// other thread
    pub fn ensure_current(&self) -> Result<(), HostScreenError> {
        if self.is_current() {
            Ok(())
        } else {
            Err(HostScreenError::OffUiThread)
        }
    }
}
