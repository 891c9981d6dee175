//! One overlay's playback session over its singleton media element.

use crate::media::device::{known_duration, MediaDevice, MediaKind};
use crate::utils::download_name;

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSession {
    pub kind: MediaKind,
    pub source_url: String,
    pub title: String,
    pub download_name: String,
}

/// Owns the device for one overlay type and whatever session currently uses it.
pub struct SessionSlot<D> {
    kind: MediaKind,
    device: D,
    session: Option<PlaybackSession>,
}

impl<D: MediaDevice> SessionSlot<D> {
    pub fn new(kind: MediaKind, device: D) -> Self {
        Self {
            kind,
            device,
            session: None,
        }
    }

    /// Replace any current session and request playback of `url`.
    ///
    /// Returns once playback has been requested; a rejected request is logged
    /// and the session stays open so the user can press play again.
    pub fn open(&mut self, url: &str, title: &str) -> &PlaybackSession {
        if let Some(previous) = self.session.take() {
            log::debug!(
                "[{}] releasing session for {}",
                self.kind.label(),
                previous.source_url
            );
            self.device.pause();
        }

        self.device.load(url);
        if let Err(err) = self.device.play() {
            log::warn!("[{}] play request for {url} failed: {err}", self.kind.label());
        }

        log::info!("[{}] opened {title:?} ({url})", self.kind.label());
        self.session.insert(PlaybackSession {
            kind: self.kind,
            source_url: url.to_string(),
            title: title.to_string(),
            download_name: download_name(url, title),
        })
    }

    /// Flip play/pause. `None` when nothing is open.
    pub fn toggle_play(&mut self) -> Option<bool> {
        self.session.as_ref()?;
        if self.device.is_paused() {
            if let Err(err) = self.device.play() {
                log::warn!("[{}] resume failed: {err}", self.kind.label());
            }
        } else {
            self.device.pause();
        }
        Some(!self.device.is_paused())
    }

    pub fn seek_relative(&mut self, delta_seconds: f64) -> Option<f64> {
        self.session.as_ref()?;
        if !delta_seconds.is_finite() {
            return None;
        }
        let target = self.device.current_time() + delta_seconds;
        let target = match known_duration(self.device.duration()) {
            Some(duration) => target.clamp(0.0, duration),
            None => target.max(0.0),
        };
        self.device.set_current_time(target);
        Some(target)
    }

    /// Seek to `fraction` of the duration. Unknown durations seek to 0.
    pub fn seek_absolute(&mut self, fraction: f64) -> Option<f64> {
        self.session.as_ref()?;
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let target = known_duration(self.device.duration())
            .map(|duration| fraction * duration)
            .unwrap_or(0.0);
        self.device.set_current_time(target);
        Some(target)
    }

    pub fn close(&mut self) -> Option<PlaybackSession> {
        self.device.pause();
        let closed = self.session.take();
        if let Some(session) = &closed {
            log::info!("[{}] closed {:?}", self.kind.label(), session.title);
        }
        closed
    }

    pub fn session(&self) -> Option<&PlaybackSession> {
        self.session.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.session.is_some() && !self.device.is_paused()
    }

    pub fn current_time(&self) -> f64 {
        let time = self.device.current_time();
        if time.is_finite() {
            time
        } else {
            0.0
        }
    }

    /// Raw device duration; callers decide how to treat unknown values.
    pub fn duration(&self) -> f64 {
        self.device.duration()
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }
}
