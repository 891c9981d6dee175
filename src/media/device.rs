use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Which overlay a playback device belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
}

impl MediaKind {
    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
        }
    }
}

/// A single playable element: play/pause/seek plus position and duration.
///
/// Buffering and decoding stay with the implementation; the controller only
/// issues requests and reads back state.
pub trait MediaDevice {
    fn load(&mut self, url: &str);
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self);
    fn is_paused(&self) -> bool;
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, seconds: f64);
    /// Raw duration as reported by the element. NaN until metadata loads,
    /// infinite for live streams.
    fn duration(&self) -> f64;
}

/// Exclusive full-screen presentation of the video surface.
pub trait Presentation {
    fn is_fullscreen(&self) -> bool;
    fn request_fullscreen(&mut self) -> Result<()>;
    fn exit_fullscreen(&mut self);
}

/// Usable duration, or `None` while it is unknown.
pub fn known_duration(raw: f64) -> Option<f64> {
    (raw.is_finite() && raw > 0.0).then_some(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_durations_are_filtered() {
        assert_eq!(known_duration(f64::NAN), None);
        assert_eq!(known_duration(f64::INFINITY), None);
        assert_eq!(known_duration(0.0), None);
        assert_eq!(known_duration(-3.0), None);
        assert_eq!(known_duration(42.5), Some(42.5));
    }

    #[test]
    fn kinds_serialize_lowercase() {
        let json = serde_json::to_string(&MediaKind::Audio).unwrap();
        assert_eq!(json, "\"audio\"");
        let kind: MediaKind = serde_json::from_str("\"video\"").unwrap();
        assert_eq!(kind, MediaKind::Video);
    }
}
