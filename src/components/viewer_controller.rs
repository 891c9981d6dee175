//! Glue between the Dioxus tree and the media viewer core.
//!
//! Components dispatch [`ViewerCommand`]s; the controller applies them to the
//! live viewer, runs the resulting effects (hide timer, spectrum frame loop)
//! and publishes a fresh [`ViewerSnapshot`] for rendering.

use dioxus::prelude::*;

use crate::db::{save_settings, ViewerSettings};
use crate::media::{MediaKind, ViewerCommand, ViewerSnapshot};

#[cfg(target_arch = "wasm32")]
use crate::components::web_backend::{
    find_element, CanvasSurface, WebAnalysis, WebMediaElement, WebPlatform, WebPresentation,
};
#[cfg(target_arch = "wasm32")]
use crate::components::{AUDIO_ELEMENT_ID, VIDEO_ELEMENT_ID, VIDEO_WRAPPER_ID, VISUALIZER_ID};
#[cfg(target_arch = "wasm32")]
use crate::error::{Result, ViewerError};
#[cfg(target_arch = "wasm32")]
use crate::media::{Effects, FrameOutcome, MediaViewer, TimerAction, ViewerParts};
#[cfg(target_arch = "wasm32")]
use dioxus::core::{Runtime, RuntimeGuard};
#[cfg(target_arch = "wasm32")]
use gloo_timers::callback::Timeout;
#[cfg(target_arch = "wasm32")]
use std::{cell::RefCell, rc::Rc};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};
#[cfg(target_arch = "wasm32")]
use web_sys::{window, HtmlCanvasElement, HtmlElement, HtmlMediaElement};

#[cfg(target_arch = "wasm32")]
struct LiveViewer {
    viewer: MediaViewer<WebPlatform>,
    canvas: Option<CanvasSurface>,
    // Dropping a gloo Timeout cancels it.
    hide_timer: Option<Timeout>,
}

#[cfg(target_arch = "wasm32")]
impl LiveViewer {
    fn render_frame(&mut self) -> FrameOutcome {
        match self.canvas.as_mut() {
            Some(canvas) => self.viewer.render_frame(canvas),
            None => {
                self.viewer.halt_spectrum();
                FrameOutcome::Stopped
            }
        }
    }
}

#[derive(Clone)]
pub struct ViewerController {
    snapshot: Signal<ViewerSnapshot>,
    settings: Signal<ViewerSettings>,
    #[cfg(target_arch = "wasm32")]
    live: Rc<RefCell<Option<LiveViewer>>>,
    #[cfg(target_arch = "wasm32")]
    runtime: Rc<Runtime>,
}

impl ViewerController {
    pub fn new(snapshot: Signal<ViewerSnapshot>, settings: Signal<ViewerSettings>) -> Self {
        Self {
            snapshot,
            settings,
            #[cfg(target_arch = "wasm32")]
            live: Rc::new(RefCell::new(None)),
            #[cfg(target_arch = "wasm32")]
            runtime: Runtime::current(),
        }
    }

    /// Current display state; subscribes the calling component.
    pub fn snapshot(&self) -> ViewerSnapshot {
        (self.snapshot)()
    }

    pub fn skip_seconds(&self) -> f64 {
        self.settings.peek().skip_seconds
    }

    pub fn on_click(&self, command: ViewerCommand) -> impl FnMut(MouseEvent) + 'static {
        let controller = self.clone();
        move |_| controller.dispatch(command.clone())
    }

    /// Seek slider input; the slider reports a percentage.
    pub fn on_seek(&self, kind: MediaKind) -> impl FnMut(FormEvent) + 'static {
        let controller = self.clone();
        move |evt: FormEvent| {
            if let Ok(percent) = evt.value().parse::<f64>() {
                controller.dispatch(ViewerCommand::SeekInput(kind, percent));
            }
        }
    }

    pub fn set_brightness(&self, value: f64) {
        self.dispatch(ViewerCommand::SetBrightness(value));
        let brightness = self.snapshot.peek().brightness;
        let mut settings = self.settings;
        settings.with_mut(|s| s.brightness = brightness);
        let stored = settings.peek().clone();
        if let Err(err) = save_settings(&stored) {
            log::warn!("could not persist brightness: {err}");
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn attach(&self, images: Vec<String>) {
        log::debug!(
            "no browser media elements on this target; {} images ignored",
            images.len()
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn dispatch(&self, command: ViewerCommand) {
        log::debug!("viewer unavailable on this target; dropped {command:?}");
    }

    /// Build the live viewer over the mounted overlay elements. Runs once; the
    /// image list is fixed from then on.
    #[cfg(target_arch = "wasm32")]
    pub fn attach(&self, images: Vec<String>) {
        if self.live.borrow().is_some() {
            return;
        }
        match self.build_live(images) {
            Ok(live) => {
                *self.live.borrow_mut() = Some(live);
                log::info!("media viewer attached");
                self.refresh();
            }
            Err(err) => log::error!("media viewer unavailable: {err}"),
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn build_live(&self, images: Vec<String>) -> Result<LiveViewer> {
        let document = window()
            .and_then(|w| w.document())
            .ok_or_else(|| ViewerError::SurfaceUnavailable("no document".to_string()))?;

        let video: HtmlMediaElement = find_element(&document, VIDEO_ELEMENT_ID)?;
        let audio: HtmlMediaElement = find_element(&document, AUDIO_ELEMENT_ID)?;
        let wrapper: HtmlElement = find_element(&document, VIDEO_WRAPPER_ID)?;
        let canvas =
            find_element::<HtmlCanvasElement>(&document, VISUALIZER_ID).and_then(CanvasSurface::new);

        self.listen_media(&video, MediaKind::Video);
        self.listen_media(&audio, MediaKind::Audio);
        self.listen_fullscreen(&document);

        let settings = self.settings.peek().clone();
        let parts = ViewerParts::<WebPlatform> {
            video: WebMediaElement::new(MediaKind::Video, video),
            audio: WebMediaElement::new(MediaKind::Audio, audio.clone()),
            presentation: WebPresentation::new(wrapper),
            analysis: WebAnalysis::new(audio),
        };

        let mut viewer = MediaViewer::new(parts, &settings, images);
        let canvas = match canvas {
            Ok(canvas) => Some(canvas),
            Err(err) => {
                viewer.disable_spectrum(err);
                None
            }
        };

        Ok(LiveViewer {
            viewer,
            canvas,
            hide_timer: None,
        })
    }

    #[cfg(target_arch = "wasm32")]
    pub fn dispatch(&self, command: ViewerCommand) {
        let effects = {
            let Ok(mut guard) = self.live.try_borrow_mut() else {
                log::warn!("viewer busy; dropped {command:?}");
                return;
            };
            let Some(live) = guard.as_mut() else {
                log::debug!("viewer not attached yet; dropped {command:?}");
                return;
            };
            live.viewer.apply(command, js_sys::Date::now())
        };
        self.run_effects(effects);
        self.refresh();
    }

    #[cfg(target_arch = "wasm32")]
    fn run_effects(&self, effects: Effects) {
        if let Some(action) = effects.controls_timer {
            let timer = match action {
                TimerAction::Arm(delay) => {
                    let controller = self.clone();
                    Some(Timeout::new(delay.as_millis() as u32, move || {
                        controller.dispatch(ViewerCommand::ControlsTimerElapsed)
                    }))
                }
                TimerAction::Cancel => None,
            };
            if let Some(live) = self.live.borrow_mut().as_mut() {
                live.hide_timer = timer;
            }
        }
        if effects.start_spectrum {
            start_spectrum_loop(self.live.clone());
        }
    }

    /// Publish the current snapshot if it changed.
    #[cfg(target_arch = "wasm32")]
    pub fn refresh(&self) {
        let next = match self.live.try_borrow() {
            Ok(guard) => guard.as_ref().map(|live| live.viewer.snapshot()),
            Err(_) => None,
        };
        let Some(next) = next else {
            return;
        };
        let _guard = RuntimeGuard::new(self.runtime.clone());
        let mut snapshot = self.snapshot;
        if *snapshot.peek() != next {
            snapshot.set(next);
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn listen_media(&self, element: &HtmlMediaElement, kind: MediaKind) {
        let events = [
            ("timeupdate", ViewerCommand::TimeUpdate(kind)),
            ("loadedmetadata", ViewerCommand::TimeUpdate(kind)),
            ("play", ViewerCommand::DevicePlaying(kind)),
            ("pause", ViewerCommand::DevicePaused(kind)),
        ];
        for (event, command) in events {
            let controller = self.clone();
            let callback = Closure::wrap(Box::new(move |_: web_sys::Event| {
                controller.dispatch(command.clone());
            }) as Box<dyn FnMut(_)>);
            if let Err(err) =
                element.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            {
                log::warn!("could not listen for {event}: {err:?}");
            }
            callback.forget();
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn listen_fullscreen(&self, document: &web_sys::Document) {
        let denied = {
            let controller = self.clone();
            Closure::wrap(Box::new(move |_: web_sys::Event| {
                controller.dispatch(ViewerCommand::FullscreenDenied(
                    "the browser refused the request".to_string(),
                ));
            }) as Box<dyn FnMut(_)>)
        };
        let changed = {
            let controller = self.clone();
            Closure::wrap(Box::new(move |_: web_sys::Event| {
                controller.refresh();
            }) as Box<dyn FnMut(_)>)
        };
        let _ = document
            .add_event_listener_with_callback("fullscreenerror", denied.as_ref().unchecked_ref());
        let _ = document
            .add_event_listener_with_callback("fullscreenchange", changed.as_ref().unchecked_ref());
        denied.forget();
        changed.forget();
    }
}

/// Paint a spectrum frame per display refresh until the viewer reports
/// `Stopped`, then drop the callback.
#[cfg(target_arch = "wasm32")]
fn start_spectrum_loop(live: Rc<RefCell<Option<LiveViewer>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let next = tick.clone();
    let owner = live.clone();

    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let outcome = match live.try_borrow_mut() {
            Ok(mut guard) => match guard.as_mut() {
                Some(live) => live.render_frame(),
                None => FrameOutcome::Stopped,
            },
            // Mid-dispatch; try again next frame.
            Err(_) => FrameOutcome::Continue,
        };
        match outcome {
            FrameOutcome::Continue => {
                let scheduled = next.borrow().as_ref().is_some_and(request_frame);
                if !scheduled {
                    halt_spectrum(&live);
                    let _ = next.borrow_mut().take();
                }
            }
            FrameOutcome::Stopped => {
                log::debug!("spectrum loop stopped");
                let _ = next.borrow_mut().take();
            }
        }
    }) as Box<dyn FnMut()>));

    let scheduled = tick.borrow().as_ref().is_some_and(request_frame);
    if !scheduled {
        halt_spectrum(&owner);
        let _ = tick.borrow_mut().take();
    }
}

#[cfg(target_arch = "wasm32")]
fn request_frame(callback: &Closure<dyn FnMut()>) -> bool {
    let Some(win) = window() else {
        return false;
    };
    match win.request_animation_frame(callback.as_ref().unchecked_ref()) {
        Ok(_) => true,
        Err(err) => {
            log::warn!("requestAnimationFrame failed: {err:?}");
            false
        }
    }
}

/// No frame is queued any more; let the next play start a fresh loop.
#[cfg(target_arch = "wasm32")]
fn halt_spectrum(live: &RefCell<Option<LiveViewer>>) {
    if let Ok(mut guard) = live.try_borrow_mut() {
        if let Some(live) = guard.as_mut() {
            live.viewer.halt_spectrum();
        }
    }
}
