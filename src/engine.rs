//! Seam to the embedding engine collaborator
//!
//! The engine that actually renders into the host's container view is
//! external. This module defines the shape the host screen needs from it:
//! an attach/detach pair bracketing a surface's lifetime, resize and
//! host-to-engine message forwarding while attached, and the delegate
//! registration that travels with the attach.

use std::sync::{Arc, Mutex};

use raw_window_handle::{
    HandleError, HasDisplayHandle, HasWindowHandle, RawDisplayHandle, RawWindowHandle,
};

use crate::delegate::DelegateHandle;
use crate::error::AttachError;

/// Description of the native container view the host offers for embedding
pub struct SurfaceContainer {
    window: RawWindowHandle,
    display: RawDisplayHandle,
    width: u32,
    height: u32,
    scale_factor: f32,
}

// SAFETY: the raw handles carry no ownership and are only dereferenced by
// the engine on the thread that performs the attach.
unsafe impl Send for SurfaceContainer {}

impl SurfaceContainer {
    /// Wraps a native view handle together with its physical size
    pub fn new(
        window: RawWindowHandle,
        display: RawDisplayHandle,
        width: u32,
        height: u32,
        scale_factor: f32,
    ) -> Self {
        Self {
            window,
            display,
            width,
            height,
            scale_factor,
        }
    }

    /// Physical width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Physical height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Ratio of physical to logical pixels
    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }
}

impl HasWindowHandle for SurfaceContainer {
    fn window_handle(&self) -> Result<raw_window_handle::WindowHandle<'_>, HandleError> {
        unsafe { Ok(raw_window_handle::WindowHandle::borrow_raw(self.window)) }
    }
}

impl HasDisplayHandle for SurfaceContainer {
    fn display_handle(&self) -> Result<raw_window_handle::DisplayHandle<'_>, HandleError> {
        unsafe { Ok(raw_window_handle::DisplayHandle::borrow_raw(self.display)) }
    }
}

/// Handle to a surface the engine has bound to a host container.
///
/// Deliberately not `Clone`: the host screen owns it exclusively for the
/// duration of presentation and moves it back to the engine on detach.
#[derive(Debug, PartialEq, Eq)]
pub struct EngineSurface {
    id: u64,
}

impl EngineSurface {
    /// Created by the engine when an attach succeeds
    pub fn new(id: u64) -> Self {
        Self { id }
    }

    /// Engine-assigned identifier for this surface
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Operations the embedding engine exposes to its host.
///
/// `attach` and `detach` bracket a surface's lifetime; the delegate handle
/// passed to `attach` is the engine's only path for raising events at the
/// host, and goes quiet once the host revokes the registration.
pub trait EmbeddedEngine: Send {
    /// Binds a rendering surface to the given container and installs the
    /// delegate for this attachment
    fn attach(
        &mut self,
        container: SurfaceContainer,
        delegate: DelegateHandle,
    ) -> Result<EngineSurface, AttachError>;

    /// Returns the surface so the engine can reclaim its resources
    fn detach(&mut self, surface: EngineSurface);

    /// The host container changed size or scale
    fn resize(&mut self, width: u32, height: u32, scale_factor: f32);

    /// Opaque binary payload from the host application
    fn send_message(&mut self, payload: Vec<u8>);
}

/// Shared reference to an engine that outlives any one screen
pub type SharedEngine = Arc<Mutex<dyn EmbeddedEngine>>;

#[cfg(test)]
mod tests {
    use super::*;
    use raw_window_handle::{WebDisplayHandle, WebWindowHandle};

    #[test]
    fn container_exposes_handles_and_metrics() {
        let container = SurfaceContainer::new(
            RawWindowHandle::Web(WebWindowHandle::new(7)),
            RawDisplayHandle::Web(WebDisplayHandle::new()),
            1170,
            2532,
            3.0,
        );
        assert_eq!(container.width(), 1170);
        assert_eq!(container.height(), 2532);
        assert_eq!(container.scale_factor(), 3.0);
        assert!(container.window_handle().is_ok());
        assert!(container.display_handle().is_ok());
    }
}
