//! Binding between playback position and the seek slider.

use crate::media::device::known_duration;

/// Below this difference a slider value is the echo of our own update.
const ECHO_TOLERANCE: f64 = 1e-9;

/// Fill percentage for the seek control, never NaN.
pub fn progress_percent(current_time: f64, duration: f64) -> f64 {
    match known_duration(duration) {
        Some(duration) if current_time.is_finite() => {
            (current_time / duration * 100.0).clamp(0.0, 100.0)
        }
        _ => 0.0,
    }
}

/// Absolute time for a slider value in `[0, 100]`.
pub fn time_for_percent(percent: f64, duration: f64) -> f64 {
    let Some(duration) = known_duration(duration) else {
        return 0.0;
    };
    if !percent.is_finite() {
        return 0.0;
    }
    percent.clamp(0.0, 100.0) / 100.0 * duration
}

#[derive(Debug, Clone, Default)]
pub struct ProgressSync {
    percent: f64,
}

impl ProgressSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position notification from the device. Only updates the display value.
    pub fn on_time_update(&mut self, current_time: f64, duration: f64) -> f64 {
        self.percent = progress_percent(current_time, duration);
        self.percent
    }

    /// User moved the slider. Returns the fraction to seek to, or `None` when
    /// the value is just the position we displayed.
    pub fn on_seek_input(&mut self, percent: f64) -> Option<f64> {
        if !percent.is_finite() {
            return None;
        }
        let percent = percent.clamp(0.0, 100.0);
        if (percent - self.percent).abs() < ECHO_TOLERANCE {
            return None;
        }
        self.percent = percent;
        Some(percent / 100.0)
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }

    pub fn reset(&mut self) {
        self.percent = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_round_trips_to_time() {
        for &(current, duration) in &[(0.0, 1.0), (12.3, 97.0), (59.99, 60.0), (3600.0, 7200.5)] {
            let percent = progress_percent(current, duration);
            let back = time_for_percent(percent, duration);
            assert!(
                (back - current).abs() < 1e-9,
                "{current}/{duration} came back as {back}"
            );
        }
    }

    #[test]
    fn unknown_duration_never_yields_nan() {
        for current in [0.0, 5.0, f64::NAN, f64::INFINITY] {
            assert_eq!(progress_percent(current, f64::NAN), 0.0);
            assert_eq!(progress_percent(current, 0.0), 0.0);
        }
        assert_eq!(time_for_percent(50.0, f64::NAN), 0.0);
    }

    #[test]
    fn percent_is_clamped() {
        assert_eq!(progress_percent(120.0, 60.0), 100.0);
        assert_eq!(time_for_percent(150.0, 60.0), 60.0);
        assert_eq!(time_for_percent(-5.0, 60.0), 0.0);
    }

    #[test]
    fn time_update_never_produces_a_seek() {
        let mut sync = ProgressSync::new();
        let percent = sync.on_time_update(30.0, 120.0);
        assert_eq!(percent, 25.0);
        assert_eq!(sync.on_seek_input(percent), None);
    }

    #[test]
    fn user_input_converts_to_a_fraction() {
        let mut sync = ProgressSync::new();
        sync.on_time_update(30.0, 120.0);

        assert_eq!(sync.on_seek_input(50.0), Some(0.5));
        assert_eq!(sync.percent(), 50.0);
        assert_eq!(sync.on_seek_input(50.0), None);
    }

    #[test]
    fn non_finite_input_is_ignored() {
        let mut sync = ProgressSync::new();
        assert_eq!(sync.on_seek_input(f64::NAN), None);
    }
}
