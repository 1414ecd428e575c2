//! Delegate channel between the embedding engine and its host screen
//!
//! Each engine attachment mints exactly one channel: the engine side holds a
//! cloneable [`DelegateHandle`] and the host side holds the sole
//! [`DelegateRegistration`]. Events may be raised from any thread; the host
//! drains them on the UI thread. Once the registration is revoked, further
//! notifications are dropped at the sender so a screen mid-destruction never
//! sees them.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_channel::{Receiver, Sender, unbounded};
use log::debug;

use crate::nav::NavigationTarget;

/// Why the embedding engine stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// Orderly shutdown requested by the engine itself
    Shutdown,
    /// The engine died unexpectedly
    Fault(String),
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shutdown => write!(f, "engine shut down"),
            Self::Fault(detail) => write!(f, "engine fault: {detail}"),
        }
    }
}

/// Event raised by the embedding engine toward its host screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The attached surface is live and rendering
    Ready,
    /// The engine stopped; the surface behind this attachment is dead
    Terminated(TerminationReason),
    /// The engine asks the host to perform a native navigation action
    NavigationRequest(NavigationTarget),
    /// Opaque binary payload for the host application
    Message(Vec<u8>),
}

/// Capability set a host screen implements to receive engine events.
///
/// [`on_event`](Self::on_event) is the single dispatch entry point; the
/// default implementation fans out to the per-variant methods.
pub trait EngineDelegate {
    /// The surface is live and rendering
    fn on_ready(&mut self);

    /// The engine stopped
    fn on_terminated(&mut self, reason: TerminationReason);

    /// The engine requests a native navigation action
    fn on_navigation_request(&mut self, target: NavigationTarget);

    /// Binary payload from the engine
    fn on_message(&mut self, payload: Vec<u8>) {
        let _ = payload;
    }

    /// Dispatches one event to the per-variant methods
    fn on_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Ready => self.on_ready(),
            EngineEvent::Terminated(reason) => self.on_terminated(reason),
            EngineEvent::NavigationRequest(target) => self.on_navigation_request(target),
            EngineEvent::Message(payload) => self.on_message(payload),
        }
    }
}

/// Engine-side sender half of the delegate channel.
///
/// Clones share the same attachment; all of them go quiet together when the
/// host revokes the registration.
#[derive(Clone)]
pub struct DelegateHandle {
    sender: Sender<EngineEvent>,
    alive: Arc<AtomicBool>,
}

impl DelegateHandle {
    /// Raises an event toward the host screen.
    ///
    /// Never blocks. Events raised after the registration was revoked are
    /// discarded, so late callbacks against a dismissed screen are no-ops.
    pub fn notify(&self, event: EngineEvent) {
        if !self.alive.load(Ordering::Acquire) {
            debug!("dropping engine event after revocation: {event:?}");
            return;
        }
        let _ = self.sender.send(event);
    }

    /// Whether the host-side registration still accepts events
    pub fn is_registered(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }
}

/// Host-side receiver half of the delegate channel.
///
/// There is exactly one per attachment. Dropping it revokes the
/// registration.
pub struct DelegateRegistration {
    receiver: Receiver<EngineEvent>,
    alive: Arc<AtomicBool>,
}

impl DelegateRegistration {
    /// Stops accepting events from the engine side
    pub(crate) fn revoke(&self) {
        self.alive.store(false, Ordering::Release);
    }

    /// Drains all queued events (non-blocking)
    pub(crate) fn drain(&self) -> Vec<EngineEvent> {
        self.receiver.try_iter().collect()
    }
}

impl Drop for DelegateRegistration {
    fn drop(&mut self) {
        self.revoke();
    }
}

/// Mints the delegate channel for one engine attachment
pub(crate) fn delegate_channel() -> (DelegateHandle, DelegateRegistration) {
    let (sender, receiver) = unbounded();
    let alive = Arc::new(AtomicBool::new(true));
    (
        DelegateHandle {
            sender,
            alive: alive.clone(),
        },
        DelegateRegistration { receiver, alive },
    )
}
