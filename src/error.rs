//! Error types for host screen operations

use thiserror::Error;

use crate::screen::PresentationState;

/// Failure reported by the embedding engine while binding a surface to a
/// host container.
///
/// Attach failures are never fatal to the host process; the host screen
/// reports them to the navigation layer so the user lands on native UI
/// instead of a blank surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachError {
    /// The engine could not create a rendering surface for the container
    #[error("surface creation failed: {0}")]
    SurfaceCreation(String),

    /// The container handle was missing or unusable
    #[error("invalid container: {0}")]
    InvalidContainer(String),

    /// The engine is already driving a surface for another screen
    #[error("engine is busy with another attachment")]
    EngineBusy,
}

/// Errors surfaced by [`HostScreen`](crate::HostScreen) operations
#[derive(Debug, Error)]
pub enum HostScreenError {
    /// The operation mutates navigation or view state and must run on the
    /// UI thread
    #[error("must be called on the UI thread")]
    OffUiThread,

    /// `present` was called while an attachment is already live
    #[error("screen is already presented")]
    AlreadyPresented,

    /// The screen has passed the point where it can be presented
    #[error("screen is not presentable in state {0:?}")]
    NotPresentable(PresentationState),

    /// The embedding engine rejected the attach
    #[error(transparent)]
    Attach(#[from] AttachError),

    /// The engine mutex was poisoned by a panic on another thread
    #[error("engine lock poisoned")]
    EnginePoisoned,
}
