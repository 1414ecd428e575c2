//! Host-side screen support for embedded engine views
//!
//! This crate implements the host half of an engine-embedding contract: a
//! native, navigable screen ([`HostScreen`]) that presents a surface rendered
//! by an external embedding engine, and the single-receiver delegate channel
//! through which that engine notifies the host of lifecycle and navigation
//! events.
//!
//! # Architecture
//!
//! - **HostScreen**: owns the presentation state machine and the engine
//!   attachment (surface plus delegate registration, released together)
//! - **EmbeddedEngine**: trait seam to the external engine (attach/detach,
//!   resize, host-to-engine messages)
//! - **Delegate channel**: per-attachment event path from engine threads to
//!   the UI thread, drained by [`HostScreen::pump`]
//! - **UiThread**: explicit affinity token; everything that mutates
//!   navigation state checks it

#![warn(missing_docs)]

mod delegate;
mod engine;
mod error;
mod nav;
mod screen;
mod ui;

pub use delegate::*;
pub use engine::*;
pub use error::*;
pub use nav::*;
pub use screen::*;
pub use ui::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        delegate::{DelegateHandle, EngineDelegate, EngineEvent, TerminationReason},
        engine::{EmbeddedEngine, EngineSurface, SharedEngine, SurfaceContainer},
        error::{AttachError, HostScreenError},
        nav::{NavigationContext, NavigationTarget},
        screen::{HostScreen, PresentationState},
        ui::UiThread,
    };
}
