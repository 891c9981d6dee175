//! Auto-hide for the video transport controls.
//!
//! The governor never owns a timer itself. It tells the host what to do with
//! the hide timer via [`TimerAction`], and re-checks elapsed time when the
//! timer fires so a late or stale firing cannot hide the controls early.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlsVisibility {
    Visible,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    Arm(Duration),
    Cancel,
}

#[derive(Debug, Clone)]
pub struct ControlsGovernor {
    state: ControlsVisibility,
    last_activity_ms: f64,
    hide_delay: Duration,
    armed: bool,
}

impl ControlsGovernor {
    pub fn new(hide_delay: Duration) -> Self {
        Self {
            state: ControlsVisibility::Visible,
            last_activity_ms: 0.0,
            hide_delay,
            armed: false,
        }
    }

    /// Pointer movement, clicks, or any transport interaction.
    pub fn on_activity(&mut self, now_ms: f64, playing: bool) -> TimerAction {
        self.state = ControlsVisibility::Visible;
        self.last_activity_ms = now_ms;
        self.armed = playing;
        if playing {
            TimerAction::Arm(self.hide_delay)
        } else {
            TimerAction::Cancel
        }
    }

    /// A paused video never hides its controls.
    pub fn on_pause(&mut self, now_ms: f64) -> TimerAction {
        self.on_activity(now_ms, false)
    }

    /// The hide timer fired. Returns a fresh `Arm` when the timer ran ahead of
    /// `now_ms` (the wall clock is coarser than the timer), so the pending hide
    /// is never lost.
    pub fn on_timer_elapsed(&mut self, now_ms: f64, playing: bool) -> Option<TimerAction> {
        if !(self.armed && playing) {
            return None;
        }
        let delay_ms = self.hide_delay.as_millis() as f64;
        let elapsed = now_ms - self.last_activity_ms;
        if elapsed >= delay_ms {
            self.state = ControlsVisibility::Hidden;
            self.armed = false;
            return None;
        }
        // A clock that stepped backwards can give a negative elapsed time.
        let remaining = (delay_ms - elapsed.max(0.0)).ceil().max(1.0);
        Some(TimerAction::Arm(Duration::from_millis(remaining as u64)))
    }

    pub fn reset(&mut self) {
        self.state = ControlsVisibility::Visible;
        self.armed = false;
    }

    pub fn state(&self) -> ControlsVisibility {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == ControlsVisibility::Visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(5000);

    #[test]
    fn starts_visible() {
        let governor = ControlsGovernor::new(DELAY);
        assert_eq!(governor.state(), ControlsVisibility::Visible);
    }

    #[test]
    fn hides_after_delay_while_playing() {
        let mut governor = ControlsGovernor::new(DELAY);
        assert_eq!(governor.on_activity(1_000.0, true), TimerAction::Arm(DELAY));
        assert_eq!(governor.on_timer_elapsed(6_000.0, true), None);
        assert_eq!(governor.state(), ControlsVisibility::Hidden);
    }

    #[test]
    fn stale_timer_does_not_hide_early() {
        let mut governor = ControlsGovernor::new(DELAY);
        governor.on_activity(0.0, true);
        governor.on_activity(4_000.0, true);

        governor.on_timer_elapsed(5_000.0, true);
        assert!(governor.is_visible());
        governor.on_timer_elapsed(9_000.0, true);
        assert_eq!(governor.state(), ControlsVisibility::Hidden);
    }

    #[test]
    fn early_firing_rearms_for_the_remainder() {
        let mut governor = ControlsGovernor::new(DELAY);
        governor.on_activity(1_000.0, true);

        assert_eq!(
            governor.on_timer_elapsed(5_999.0, true),
            Some(TimerAction::Arm(Duration::from_millis(1)))
        );
        assert!(governor.is_visible());

        assert_eq!(governor.on_timer_elapsed(6_000.0, true), None);
        assert!(!governor.is_visible());
    }

    #[test]
    fn clock_stepping_back_rearms_for_the_full_delay() {
        let mut governor = ControlsGovernor::new(DELAY);
        governor.on_activity(10_000.0, true);

        assert_eq!(
            governor.on_timer_elapsed(9_000.0, true),
            Some(TimerAction::Arm(DELAY))
        );
        assert!(governor.is_visible());
    }

    #[test]
    fn activity_shows_controls_and_restarts_the_timer() {
        let mut governor = ControlsGovernor::new(DELAY);
        governor.on_activity(0.0, true);
        governor.on_timer_elapsed(5_000.0, true);
        assert!(!governor.is_visible());

        assert_eq!(governor.on_activity(7_000.0, true), TimerAction::Arm(DELAY));
        assert!(governor.is_visible());
        governor.on_timer_elapsed(11_999.0, true);
        assert!(governor.is_visible());
    }

    #[test]
    fn pause_forces_visible_and_cancels() {
        let mut governor = ControlsGovernor::new(DELAY);
        governor.on_activity(0.0, true);
        governor.on_timer_elapsed(5_000.0, true);

        assert_eq!(governor.on_pause(5_500.0), TimerAction::Cancel);
        assert!(governor.is_visible());
        assert_eq!(governor.on_timer_elapsed(60_000.0, false), None);
        assert!(governor.is_visible());
    }

    #[test]
    fn never_hides_while_paused() {
        let mut governor = ControlsGovernor::new(DELAY);
        assert_eq!(governor.on_activity(0.0, false), TimerAction::Cancel);
        assert_eq!(governor.on_timer_elapsed(10_000.0, false), None);
        assert!(governor.is_visible());
    }

    #[test]
    fn timer_firing_after_playback_stopped_keeps_controls() {
        let mut governor = ControlsGovernor::new(DELAY);
        governor.on_activity(0.0, true);
        assert_eq!(governor.on_timer_elapsed(5_000.0, false), None);
        assert!(governor.is_visible());
    }
}
