//! The viewer context: every piece of playback state the overlays share,
//! owned in one place and driven by discrete commands.
//!
//! The host (browser bindings or tests) feeds [`ViewerCommand`]s in, executes
//! the returned [`Effects`] (hide timer, first animation frame), and renders
//! from [`ViewerSnapshot`].

use crate::db::ViewerSettings;
use crate::error::ViewerError;
use crate::media::controls::{ControlsGovernor, TimerAction};
use crate::media::device::{known_duration, MediaDevice, MediaKind, Presentation};
use crate::media::lightbox::LightboxNavigator;
use crate::media::progress::ProgressSync;
use crate::media::session::SessionSlot;
use crate::media::spectrum::{
    AnalysisBackend, DrawingSurface, FrameGate, FrameOutcome, SpectrumRenderer,
};
use crate::utils::{download_name, format_time};

/// Concrete device types for one environment.
pub trait ViewerPlatform {
    type Video: MediaDevice;
    type Audio: MediaDevice;
    type Presentation: Presentation;
    type Analysis: AnalysisBackend;
}

pub struct ViewerParts<P: ViewerPlatform> {
    pub video: P::Video,
    pub audio: P::Audio,
    pub presentation: P::Presentation,
    pub analysis: P::Analysis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Video,
    Audio,
    Lightbox,
}

impl From<MediaKind> for Panel {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Video => Panel::Video,
            MediaKind::Audio => Panel::Audio,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewerCommand {
    Open {
        kind: MediaKind,
        url: String,
        title: String,
    },
    OpenImage(usize),
    AdvanceImage(isize),
    TogglePlay(MediaKind),
    SeekRelative(MediaKind, f64),
    /// Seek slider value in `[0, 100]`.
    SeekInput(MediaKind, f64),
    TimeUpdate(MediaKind),
    DevicePaused(MediaKind),
    DevicePlaying(MediaKind),
    PointerActivity,
    ControlsTimerElapsed,
    ToggleFullscreen,
    FullscreenDenied(String),
    SetBrightness(f64),
    Close(Panel),
    DismissNotice,
}

/// Work the host must carry out after a command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Effects {
    pub controls_timer: Option<TimerAction>,
    /// Schedule the first spectrum frame.
    pub start_spectrum: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayView {
    pub open: bool,
    pub title: String,
    pub download_url: String,
    pub download_name: String,
    pub is_playing: bool,
    pub progress_percent: f64,
    pub time_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageView {
    pub index: usize,
    pub total: usize,
    pub src: String,
    pub download_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerSnapshot {
    pub visible: Option<Panel>,
    pub video: OverlayView,
    pub audio: OverlayView,
    pub controls_visible: bool,
    pub fullscreen: bool,
    pub brightness: f64,
    pub image: Option<ImageView>,
    pub notice: Option<String>,
    pub spectrum_enabled: bool,
}

impl Default for ViewerSnapshot {
    fn default() -> Self {
        Self {
            visible: None,
            video: OverlayView::default(),
            audio: OverlayView::default(),
            controls_visible: true,
            fullscreen: false,
            brightness: 1.0,
            image: None,
            notice: None,
            spectrum_enabled: true,
        }
    }
}

pub struct MediaViewer<P: ViewerPlatform> {
    video: SessionSlot<P::Video>,
    audio: SessionSlot<P::Audio>,
    presentation: P::Presentation,
    controls: ControlsGovernor,
    video_progress: ProgressSync,
    audio_progress: ProgressSync,
    spectrum: SpectrumRenderer<P::Analysis>,
    lightbox: LightboxNavigator,
    visible: Option<Panel>,
    brightness: f64,
    notice: Option<String>,
}

impl<P: ViewerPlatform> MediaViewer<P> {
    pub fn new(parts: ViewerParts<P>, settings: &ViewerSettings, images: Vec<String>) -> Self {
        Self {
            video: SessionSlot::new(MediaKind::Video, parts.video),
            audio: SessionSlot::new(MediaKind::Audio, parts.audio),
            presentation: parts.presentation,
            controls: ControlsGovernor::new(settings.hide_delay()),
            video_progress: ProgressSync::new(),
            audio_progress: ProgressSync::new(),
            spectrum: SpectrumRenderer::new(parts.analysis, settings.fft_size()),
            lightbox: LightboxNavigator::new(images),
            visible: None,
            brightness: sanitize_brightness(settings.brightness),
            notice: None,
        }
    }

    pub fn apply(&mut self, command: ViewerCommand, now_ms: f64) -> Effects {
        let mut effects = Effects::default();
        match command {
            ViewerCommand::Open { kind, url, title } => {
                self.open_media(kind, &url, &title, now_ms, &mut effects)
            }
            ViewerCommand::OpenImage(index) => {
                self.dismiss_other_panels(Panel::Lightbox, &mut effects);
                if self.lightbox.open(index).is_some() {
                    self.visible = Some(Panel::Lightbox);
                } else {
                    log::debug!("lightbox requested with an empty gallery");
                }
            }
            ViewerCommand::AdvanceImage(direction) => {
                if self.visible == Some(Panel::Lightbox) {
                    self.lightbox.advance(direction);
                }
            }
            ViewerCommand::TogglePlay(MediaKind::Video) => match self.video.toggle_play() {
                Some(true) => {
                    effects.controls_timer = Some(self.controls.on_activity(now_ms, true));
                }
                Some(false) => effects.controls_timer = Some(self.controls.on_pause(now_ms)),
                None => {}
            },
            ViewerCommand::TogglePlay(MediaKind::Audio) => {
                if self.audio.toggle_play() == Some(true) {
                    effects.start_spectrum = self.arm_spectrum();
                }
            }
            ViewerCommand::SeekRelative(kind, delta) => {
                let moved = match kind {
                    MediaKind::Video => self.video.seek_relative(delta),
                    MediaKind::Audio => self.audio.seek_relative(delta),
                };
                if moved.is_some() && kind == MediaKind::Video {
                    self.touch_video_controls(now_ms, &mut effects);
                }
            }
            ViewerCommand::SeekInput(kind, percent) => {
                let moved = match kind {
                    MediaKind::Video => self
                        .video_progress
                        .on_seek_input(percent)
                        .and_then(|fraction| self.video.seek_absolute(fraction)),
                    MediaKind::Audio => self
                        .audio_progress
                        .on_seek_input(percent)
                        .and_then(|fraction| self.audio.seek_absolute(fraction)),
                };
                if moved.is_some() && kind == MediaKind::Video {
                    self.touch_video_controls(now_ms, &mut effects);
                }
            }
            ViewerCommand::TimeUpdate(MediaKind::Video) => {
                self.video_progress
                    .on_time_update(self.video.current_time(), self.video.duration());
            }
            ViewerCommand::TimeUpdate(MediaKind::Audio) => {
                self.audio_progress
                    .on_time_update(self.audio.current_time(), self.audio.duration());
            }
            ViewerCommand::DevicePaused(MediaKind::Video) => {
                effects.controls_timer = Some(self.controls.on_pause(now_ms));
            }
            // The frame loop notices the pause on its own.
            ViewerCommand::DevicePaused(MediaKind::Audio) => {}
            ViewerCommand::DevicePlaying(MediaKind::Video) => {
                if self.video.is_playing() {
                    effects.controls_timer = Some(self.controls.on_activity(now_ms, true));
                }
            }
            ViewerCommand::DevicePlaying(MediaKind::Audio) => {
                effects.start_spectrum = self.arm_spectrum();
            }
            ViewerCommand::PointerActivity => {
                if self.visible == Some(Panel::Video) {
                    self.touch_video_controls(now_ms, &mut effects);
                }
            }
            ViewerCommand::ControlsTimerElapsed => {
                effects.controls_timer = self
                    .controls
                    .on_timer_elapsed(now_ms, self.video.is_playing());
            }
            ViewerCommand::ToggleFullscreen => {
                if self.visible != Some(Panel::Video) {
                    return effects;
                }
                if self.presentation.is_fullscreen() {
                    self.presentation.exit_fullscreen();
                } else if let Err(err) = self.presentation.request_fullscreen() {
                    self.report(err);
                }
                self.touch_video_controls(now_ms, &mut effects);
            }
            ViewerCommand::FullscreenDenied(reason) => {
                self.report(ViewerError::FullscreenDenied(reason));
            }
            ViewerCommand::SetBrightness(value) => {
                self.brightness = sanitize_brightness(value);
                if self.visible == Some(Panel::Video) {
                    self.touch_video_controls(now_ms, &mut effects);
                }
            }
            ViewerCommand::Close(panel) => self.close_panel(panel, &mut effects),
            ViewerCommand::DismissNotice => self.notice = None,
        }
        effects
    }

    /// Paint one spectrum frame if the audio panel is visible and playing.
    pub fn render_frame<S: DrawingSurface>(&mut self, surface: &mut S) -> FrameOutcome {
        let gate = FrameGate {
            playing: self.audio.is_playing(),
            panel_visible: self.visible == Some(Panel::Audio),
        };
        self.spectrum.frame(gate, surface)
    }

    /// The host has no surface to paint on; turn the visualization off.
    pub fn disable_spectrum(&mut self, reason: ViewerError) {
        self.spectrum.disable(reason);
    }

    /// The host could not schedule the next frame; the loop is gone.
    pub fn halt_spectrum(&mut self) {
        self.spectrum.halt();
    }

    pub fn snapshot(&self) -> ViewerSnapshot {
        ViewerSnapshot {
            visible: self.visible,
            video: overlay_view(&self.video, &self.video_progress),
            audio: overlay_view(&self.audio, &self.audio_progress),
            controls_visible: self.controls.is_visible(),
            fullscreen: self.presentation.is_fullscreen(),
            brightness: self.brightness,
            image: self.image_view(),
            notice: self.notice.clone(),
            spectrum_enabled: self.spectrum.is_enabled(),
        }
    }

    fn open_media(
        &mut self,
        kind: MediaKind,
        url: &str,
        title: &str,
        now_ms: f64,
        effects: &mut Effects,
    ) {
        self.dismiss_other_panels(Panel::from(kind), effects);
        if self.presentation.is_fullscreen() {
            self.presentation.exit_fullscreen();
        }

        match kind {
            MediaKind::Video => {
                self.video.open(url, title);
                self.video_progress.reset();
                self.visible = Some(Panel::Video);
                effects.controls_timer =
                    Some(self.controls.on_activity(now_ms, self.video.is_playing()));
            }
            MediaKind::Audio => {
                self.spectrum.ensure_graph();
                self.audio.open(url, title);
                self.audio_progress.reset();
                self.visible = Some(Panel::Audio);
                effects.start_spectrum = self.arm_spectrum();
            }
        }
    }

    fn close_panel(&mut self, panel: Panel, effects: &mut Effects) {
        match panel {
            Panel::Video => {
                self.video.close();
                if self.presentation.is_fullscreen() {
                    self.presentation.exit_fullscreen();
                }
                self.video_progress.reset();
                self.controls.reset();
                effects.controls_timer = Some(TimerAction::Cancel);
            }
            Panel::Audio => {
                self.audio.close();
                self.audio_progress.reset();
            }
            Panel::Lightbox => {}
        }
        if self.visible == Some(panel) {
            self.visible = None;
        }
    }

    fn dismiss_other_panels(&mut self, keep: Panel, effects: &mut Effects) {
        if let Some(current) = self.visible {
            if current != keep {
                self.close_panel(current, effects);
            }
        }
    }

    fn touch_video_controls(&mut self, now_ms: f64, effects: &mut Effects) {
        effects.controls_timer = Some(
            self.controls
                .on_activity(now_ms, self.video.is_playing()),
        );
    }

    fn arm_spectrum(&mut self) -> bool {
        self.visible == Some(Panel::Audio) && self.audio.is_playing() && self.spectrum.arm()
    }

    fn report(&mut self, err: ViewerError) {
        log::warn!("{err}");
        self.notice = Some(err.to_string());
    }

    fn image_view(&self) -> Option<ImageView> {
        if self.visible != Some(Panel::Lightbox) {
            return None;
        }
        let src = self.lightbox.current_source()?;
        Some(ImageView {
            index: self.lightbox.current_index(),
            total: self.lightbox.len(),
            src: src.to_string(),
            download_name: download_name(src, "image"),
        })
    }

    pub fn visible(&self) -> Option<Panel> {
        self.visible
    }

    pub fn video(&self) -> &SessionSlot<P::Video> {
        &self.video
    }

    pub fn audio(&self) -> &SessionSlot<P::Audio> {
        &self.audio
    }

    pub fn video_mut(&mut self) -> &mut SessionSlot<P::Video> {
        &mut self.video
    }

    pub fn audio_mut(&mut self) -> &mut SessionSlot<P::Audio> {
        &mut self.audio
    }

    pub fn presentation(&self) -> &P::Presentation {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut P::Presentation {
        &mut self.presentation
    }

    pub fn spectrum(&self) -> &SpectrumRenderer<P::Analysis> {
        &self.spectrum
    }
}

fn overlay_view<D: MediaDevice>(slot: &SessionSlot<D>, progress: &ProgressSync) -> OverlayView {
    let Some(session) = slot.session() else {
        return OverlayView::default();
    };
    let duration = known_duration(slot.duration()).unwrap_or(0.0);
    OverlayView {
        open: true,
        title: session.title.clone(),
        download_url: session.source_url.clone(),
        download_name: session.download_name.clone(),
        is_playing: slot.is_playing(),
        progress_percent: progress.percent(),
        time_label: format!(
            "{} / {}",
            format_time(slot.current_time()),
            format_time(duration)
        ),
    }
}

fn sanitize_brightness(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        1.0
    }
}
