//! Navigation seam between the host screen and the host application
//!
//! The crate manages exactly one screen's participation in the host's
//! navigation stack. The stack itself belongs to the host application, which
//! implements [`NavigationContext`] and passes it in at construction.

use crate::error::AttachError;

/// Where the engine wants the host to navigate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
    /// Pop exactly one level, back to the native screen below
    Back,
    /// Pop to the root of the navigation stack
    Root,
    /// Replace this screen with the named native route
    Route(String),
}

/// Host-implemented navigation operations the screen may invoke.
///
/// All calls arrive on the UI thread.
pub trait NavigationContext {
    /// Pop this screen off the stack
    fn pop(&mut self);

    /// Pop everything above the stack root
    fn pop_to_root(&mut self);

    /// Replace this screen with the named native route
    fn replace(&mut self, route: &str);

    /// Show a native fallback screen because the engine surface could not
    /// be attached
    fn show_fallback(&mut self, error: &AttachError);
}
