//! Host screen that presents an embedded engine surface
//!
//! A [`HostScreen`] is one native, navigable screen whose content is rendered
//! by an external embedding engine. It owns the attachment (surface plus
//! delegate registration) for the duration of presentation and translates
//! engine-raised events into native navigation actions, always on the UI
//! thread.

use log::{debug, error, warn};

use crate::delegate::{
    DelegateRegistration, EngineDelegate, EngineEvent, TerminationReason, delegate_channel,
};
use crate::engine::{EngineSurface, SharedEngine, SurfaceContainer};
use crate::error::HostScreenError;
use crate::nav::{NavigationContext, NavigationTarget};
use crate::ui::UiThread;

/// Presentation lifecycle of a [`HostScreen`]
///
/// `Created → Presenting → (Presented | EngineFailed) → Dismissing →
/// Destroyed`. An engine termination mid-flight or while presented jumps
/// straight to `Dismissing`. `Destroyed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationState {
    /// Constructed, not yet presented
    Created,
    /// Attach succeeded, waiting for the engine to signal readiness
    Presenting,
    /// The engine surface is live and on screen
    Presented,
    /// The engine could not attach; a native fallback was shown
    EngineFailed,
    /// Teardown has begun; engine events no longer act on navigation
    Dismissing,
    /// Terminal; the attachment is fully released
    Destroyed,
}

/// Surface and delegate registration, acquired and released together.
struct Attachment {
    surface: Option<EngineSurface>,
    registration: DelegateRegistration,
}

/// One native screen hosting an embedded engine surface.
///
/// Generic over the host application's [`NavigationContext`]. All public
/// methods that touch navigation or the attachment are UI-thread only; the
/// engine raises events from its own threads through the
/// [`DelegateHandle`](crate::DelegateHandle) minted at attach, and
/// the host drains them by calling [`pump`](Self::pump) from its UI loop.
pub struct HostScreen<N: NavigationContext> {
    state: PresentationState,
    engine: SharedEngine,
    nav: N,
    ui: UiThread,
    attachment: Option<Attachment>,
    message_handler: Option<Box<dyn FnMut(Vec<u8>)>>,
}

impl<N: NavigationContext> HostScreen<N> {
    /// Creates a screen bound to the given engine and navigation context
    pub fn new(engine: SharedEngine, nav: N, ui: UiThread) -> Self {
        Self {
            state: PresentationState::Created,
            engine,
            nav,
            ui,
            attachment: None,
            message_handler: None,
        }
    }

    /// Current presentation state
    pub fn state(&self) -> PresentationState {
        self.state
    }

    /// Whether the engine surface is live and on screen
    pub fn is_presented(&self) -> bool {
        self.state == PresentationState::Presented
    }

    /// The host navigation context
    pub fn nav(&self) -> &N {
        &self.nav
    }

    /// Installs the handler for binary payloads raised by the engine.
    ///
    /// The handler runs on the UI thread, from [`pump`](Self::pump) or
    /// [`handle_engine_event`](Self::handle_engine_event).
    pub fn set_message_handler(&mut self, handler: impl FnMut(Vec<u8>) + 'static) {
        self.message_handler = Some(Box::new(handler));
    }

    /// Attaches the engine surface to the given container and makes this
    /// screen the delegate receiver for the attachment.
    ///
    /// On attach failure the navigation context is asked to show a native
    /// fallback, the registration is revoked, and the error is returned;
    /// the screen is never left looking at a blank surface.
    pub fn present(&mut self, container: SurfaceContainer) -> Result<(), HostScreenError> {
        self.ui.ensure_current()?;
        match self.state {
            PresentationState::Created => {}
            PresentationState::Presenting | PresentationState::Presented => {
                return Err(HostScreenError::AlreadyPresented);
            }
            state => return Err(HostScreenError::NotPresentable(state)),
        }

        self.transition(PresentationState::Presenting);
        let (handle, registration) = delegate_channel();

        let attach_result = match self.engine.lock() {
            Ok(mut engine) => Some(engine.attach(container, handle)),
            Err(_) => None,
        };
        let Some(attach_result) = attach_result else {
            self.transition(PresentationState::EngineFailed);
            self.transition(PresentationState::Dismissing);
            return Err(HostScreenError::EnginePoisoned);
        };

        match attach_result {
            Ok(surface) => {
                debug!("engine surface {} attached", surface.id());
                self.attachment = Some(Attachment {
                    surface: Some(surface),
                    registration,
                });
                Ok(())
            }
            Err(err) => {
                error!("engine attach failed: {err}");
                self.transition(PresentationState::EngineFailed);
                self.nav.show_fallback(&err);
                // Registration drops here, so no dangling delegate remains.
                self.transition(PresentationState::Dismissing);
                Err(HostScreenError::Attach(err))
            }
        }
    }

    /// Begins orderly teardown: revokes the delegate registration and
    /// returns the surface to the engine.
    ///
    /// Called by the host when its navigation system removes this screen;
    /// it does not itself pop the stack.
    pub fn dismiss(&mut self) -> Result<(), HostScreenError> {
        self.ui.ensure_current()?;
        self.begin_dismiss();
        Ok(())
    }

    /// Forces teardown from any state. Terminal; the screen cannot be
    /// presented again.
    pub fn destroy(&mut self) {
        if self.state == PresentationState::Destroyed {
            return;
        }
        if self.state != PresentationState::Dismissing {
            self.transition(PresentationState::Dismissing);
        }
        self.release_attachment();
        self.transition(PresentationState::Destroyed);
    }

    /// Drains engine events marshaled from other threads and dispatches
    /// them. Call from the host's UI loop, once per tick.
    pub fn pump(&mut self) {
        if !self.ui.is_current() {
            warn!("pump called off the UI thread; ignoring");
            return;
        }
        let events = match &self.attachment {
            Some(attachment) => attachment.registration.drain(),
            None => return,
        };
        for event in events {
            self.on_event(event);
        }
    }

    /// Synchronous dispatch path for engine events raised on the UI thread
    pub fn handle_engine_event(&mut self, event: EngineEvent) -> Result<(), HostScreenError> {
        self.ui.ensure_current()?;
        self.on_event(event);
        Ok(())
    }

    /// Forwards a container size or scale change to the attached engine
    pub fn container_resized(&mut self, width: u32, height: u32, scale_factor: f32) {
        if self.attachment.is_none() {
            debug!("resize with no live attachment; ignoring");
            return;
        }
        if let Ok(mut engine) = self.engine.lock() {
            engine.resize(width, height, scale_factor);
        }
    }

    /// Forwards a binary payload to the attached engine
    pub fn send_message(&mut self, payload: Vec<u8>) {
        if self.attachment.is_none() {
            debug!("message with no live attachment; dropping {} bytes", payload.len());
            return;
        }
        if let Ok(mut engine) = self.engine.lock() {
            engine.send_message(payload);
        }
    }

    fn transition(&mut self, next: PresentationState) {
        if self.state == PresentationState::Destroyed {
            warn!("ignoring transition out of Destroyed to {next:?}");
            return;
        }
        debug!("presentation state {:?} -> {next:?}", self.state);
        self.state = next;
    }

    fn begin_dismiss(&mut self) {
        if matches!(
            self.state,
            PresentationState::Dismissing | PresentationState::Destroyed
        ) {
            return;
        }
        self.transition(PresentationState::Dismissing);
        self.release_attachment();
    }

    fn release_attachment(&mut self) {
        let Some(mut attachment) = self.attachment.take() else {
            return;
        };
        attachment.registration.revoke();
        if let Some(surface) = attachment.surface.take() {
            match self.engine.lock() {
                Ok(mut engine) => {
                    debug!("returning surface {} to engine", surface.id());
                    engine.detach(surface);
                }
                Err(_) => warn!("engine lock poisoned; surface dropped without detach"),
            }
        }
    }
}

impl<N: NavigationContext> EngineDelegate for HostScreen<N> {
    fn on_ready(&mut self) {
        match self.state {
            PresentationState::Presenting => self.transition(PresentationState::Presented),
            state => debug!("ignoring Ready in state {state:?}"),
        }
    }

    fn on_terminated(&mut self, reason: TerminationReason) {
        match self.state {
            PresentationState::Presenting | PresentationState::Presented => {
                error!("engine terminated while attached: {reason}");
                self.nav.pop();
                self.begin_dismiss();
            }
            state => debug!("ignoring termination ({reason}) in state {state:?}"),
        }
    }

    fn on_navigation_request(&mut self, target: NavigationTarget) {
        if !matches!(
            self.state,
            PresentationState::Presenting | PresentationState::Presented
        ) {
            debug!("ignoring navigation request {target:?} in state {:?}", self.state);
            return;
        }
        match target {
            NavigationTarget::Back => self.nav.pop(),
            NavigationTarget::Root => self.nav.pop_to_root(),
            NavigationTarget::Route(ref route) => self.nav.replace(route),
        }
        self.begin_dismiss();
    }

    fn on_message(&mut self, payload: Vec<u8>) {
        if !matches!(
            self.state,
            PresentationState::Presenting | PresentationState::Presented
        ) {
            debug!("dropping {} byte engine message in state {:?}", payload.len(), self.state);
            return;
        }
        if let Some(handler) = self.message_handler.as_mut() {
            handler(payload);
        }
    }

    fn on_event(&mut self, event: EngineEvent) {
        if matches!(
            self.state,
            PresentationState::Dismissing | PresentationState::Destroyed
        ) {
            debug!("discarding engine event after teardown began: {event:?}");
            return;
        }
        match event {
            EngineEvent::Ready => self.on_ready(),
            EngineEvent::Terminated(reason) => self.on_terminated(reason),
            EngineEvent::NavigationRequest(target) => self.on_navigation_request(target),
            EngineEvent::Message(payload) => self.on_message(payload),
        }
    }
}

impl<N: NavigationContext> Drop for HostScreen<N> {
    fn drop(&mut self) {
        self.destroy();
    }
}
