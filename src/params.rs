/*
 * View Parameters Module
 *
 * This module defines the ViewParams struct holding everything the user
 * adjusts through the UI: play state, orbit speed multiplier and the
 * debug overlay toggle. It also provides snapshot-based change detection
 * so the app knows when a UI interaction has to be applied.
 */

use crate::orbit::{clamp_multiplier, MAX_SPEED_MULTIPLIER, MIN_SPEED_MULTIPLIER};

pub struct ViewParams {
    pub is_playing: bool,
    pub speed: f32,
    pub show_debug: bool,

    // Internal state for tracking changes
    previous_values: Option<ParamSnapshot>,
}

// A snapshot of parameter values used for change detection
#[derive(Clone, Copy, PartialEq)]
struct ParamSnapshot {
    is_playing: bool,
    speed: f32,
    show_debug: bool,
}

// What changed since the last snapshot
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParamChanges {
    pub playing_changed: bool,
    pub speed_changed: bool,
    pub any_changed: bool,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            is_playing: true,
            speed: 1.0,
            show_debug: false,
            previous_values: None,
        }
    }
}

impl ViewParams {
    pub fn with_speed(speed: f32) -> Self {
        Self {
            speed: clamp_multiplier(speed),
            ..Self::default()
        }
    }

    fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            is_playing: self.is_playing,
            speed: self.speed,
            show_debug: self.show_debug,
        }
    }

    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(self.snapshot());
    }

    // Compare against the last snapshot; nothing has changed without one
    pub fn detect_changes(&self) -> ParamChanges {
        let Some(prev) = self.previous_values else {
            return ParamChanges::default();
        };
        let current = self.snapshot();
        ParamChanges {
            playing_changed: current.is_playing != prev.is_playing,
            speed_changed: current.speed != prev.speed,
            any_changed: current != prev,
        }
    }

    pub fn get_speed_range() -> std::ops::RangeInclusive<f32> {
        MIN_SPEED_MULTIPLIER..=MAX_SPEED_MULTIPLIER
    }

    pub const SPEED_STEP: f64 = 0.1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_snapshot_means_no_changes() {
        let params = ViewParams::default();
        assert_eq!(params.detect_changes(), ParamChanges::default());
    }

    #[test]
    fn detects_speed_and_play_changes() {
        let mut params = ViewParams::default();
        params.take_snapshot();
        params.speed = 2.0;
        let changes = params.detect_changes();
        assert!(changes.speed_changed && changes.any_changed && !changes.playing_changed);

        params.take_snapshot();
        params.is_playing = false;
        let changes = params.detect_changes();
        assert!(changes.playing_changed && changes.any_changed && !changes.speed_changed);

        params.take_snapshot();
        params.show_debug = true;
        let changes = params.detect_changes();
        assert!(changes.any_changed && !changes.playing_changed && !changes.speed_changed);
    }

    #[test]
    fn initial_speed_is_clamped() {
        assert_eq!(ViewParams::with_speed(12.0).speed, MAX_SPEED_MULTIPLIER);
    }
}
