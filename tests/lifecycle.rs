//! End-to-end lifecycle scenarios for a host screen and a scripted engine

use std::sync::{Arc, Mutex};
use std::thread;

use embedded_host::prelude::*;
use raw_window_handle::{RawDisplayHandle, RawWindowHandle, WebDisplayHandle, WebWindowHandle};

/// Scripted engine standing in for the external embedding collaborator
#[derive(Default)]
struct ScriptedEngine {
    fail_attach: bool,
    delegate: Option<DelegateHandle>,
    live_surface: Option<u64>,
    detached: Vec<u64>,
}

impl EmbeddedEngine for ScriptedEngine {
    fn attach(
        &mut self,
        _container: SurfaceContainer,
        delegate: DelegateHandle,
    ) -> Result<EngineSurface, AttachError> {
        if self.fail_attach {
            return Err(AttachError::InvalidContainer("container has no handle".into()));
        }
        self.live_surface = Some(1);
        self.delegate = Some(delegate);
        Ok(EngineSurface::new(1))
    }

    fn detach(&mut self, surface: EngineSurface) {
        self.live_surface = None;
        self.detached.push(surface.id());
    }

    fn resize(&mut self, _width: u32, _height: u32, _scale_factor: f32) {}

    fn send_message(&mut self, _payload: Vec<u8>) {}
}

#[derive(Default)]
struct StackNav {
    depth: usize,
    fallback_shown: bool,
}

impl NavigationContext for StackNav {
    fn pop(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn pop_to_root(&mut self) {
        self.depth = 0;
    }

    fn replace(&mut self, _route: &str) {}

    fn show_fallback(&mut self, error: &AttachError) {
        assert!(matches!(error, AttachError::InvalidContainer(_)));
        self.fallback_shown = true;
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn container() -> SurfaceContainer {
    SurfaceContainer::new(
        RawWindowHandle::Web(WebWindowHandle::new(1)),
        RawDisplayHandle::Web(WebDisplayHandle::new()),
        390,
        844,
        3.0,
    )
}

fn presented_screen() -> (HostScreen<StackNav>, Arc<Mutex<ScriptedEngine>>) {
    init_logging();
    let engine = Arc::new(Mutex::new(ScriptedEngine::default()));
    let shared: SharedEngine = engine.clone();
    let mut screen = HostScreen::new(
        shared,
        StackNav {
            depth: 2,
            fallback_shown: false,
        },
        UiThread::acquire(),
    );
    screen.present(container()).unwrap();
    (screen, engine)
}

#[test]
fn full_lifecycle_ends_destroyed_with_no_registration() {
    let (mut screen, engine) = presented_screen();

    let delegate = engine.lock().unwrap().delegate.clone().unwrap();
    delegate.notify(EngineEvent::Ready);
    screen.pump();
    assert_eq!(screen.state(), PresentationState::Presented);

    screen.dismiss().unwrap();
    screen.destroy();

    assert_eq!(screen.state(), PresentationState::Destroyed);
    assert!(!delegate.is_registered());
    assert!(engine.lock().unwrap().live_surface.is_none());
    assert_eq!(engine.lock().unwrap().detached, vec![1]);
}

#[test]
fn engine_thread_events_are_marshaled_to_ui_thread() {
    let (mut screen, engine) = presented_screen();
    let delegate = engine.lock().unwrap().delegate.clone().unwrap();

    // The engine raises events from its own thread; the screen only sees
    // them when the UI loop pumps.
    let engine_thread = thread::spawn(move || {
        delegate.notify(EngineEvent::Ready);
        delegate.notify(EngineEvent::NavigationRequest(NavigationTarget::Back));
    });
    engine_thread.join().unwrap();

    assert_eq!(screen.state(), PresentationState::Presenting);
    screen.pump();

    assert_eq!(screen.nav().depth, 1);
    assert_eq!(screen.state(), PresentationState::Dismissing);
    assert!(engine.lock().unwrap().live_surface.is_none());
}

#[test]
fn unexpected_termination_never_leaves_dead_surface_presented() {
    let (mut screen, engine) = presented_screen();
    let delegate = engine.lock().unwrap().delegate.clone().unwrap();
    delegate.notify(EngineEvent::Ready);
    screen.pump();

    delegate.notify(EngineEvent::Terminated(TerminationReason::Fault(
        "gpu reset".into(),
    )));
    screen.pump();

    assert_eq!(screen.state(), PresentationState::Dismissing);
    assert_eq!(screen.nav().depth, 1);

    // A stale Ready from the dead attachment must not resurrect the screen.
    delegate.notify(EngineEvent::Ready);
    screen.pump();
    assert_eq!(screen.state(), PresentationState::Dismissing);

    screen.destroy();
    assert_eq!(screen.state(), PresentationState::Destroyed);
    assert!(engine.lock().unwrap().live_surface.is_none());
}

#[test]
fn attach_failure_falls_back_to_native_ui() {
    init_logging();
    let engine = Arc::new(Mutex::new(ScriptedEngine {
        fail_attach: true,
        ..Default::default()
    }));
    let shared: SharedEngine = engine.clone();
    let mut screen = HostScreen::new(shared, StackNav::default(), UiThread::acquire());

    let result = screen.present(container());
    assert!(matches!(result, Err(HostScreenError::Attach(_))));
    assert!(screen.nav().fallback_shown);
    assert_eq!(screen.state(), PresentationState::Dismissing);
    assert!(engine.lock().unwrap().delegate.is_none());

    screen.destroy();
    assert_eq!(screen.state(), PresentationState::Destroyed);
}

#[test]
fn late_events_after_destroy_are_silent_noops() {
    let (mut screen, engine) = presented_screen();
    let delegate = engine.lock().unwrap().delegate.clone().unwrap();
    delegate.notify(EngineEvent::Ready);
    screen.pump();

    screen.destroy();
    let depth_before = screen.nav().depth;

    let engine_thread = thread::spawn(move || {
        delegate.notify(EngineEvent::NavigationRequest(NavigationTarget::Back));
        delegate.notify(EngineEvent::Terminated(TerminationReason::Shutdown));
        assert!(!delegate.is_registered());
    });
    engine_thread.join().unwrap();

    screen.pump();
    assert_eq!(screen.nav().depth, depth_before);
    assert_eq!(screen.state(), PresentationState::Destroyed);
}
