/*
 * Phase Module
 *
 * This module maps elapsed intro time onto the five animation phases
 * (explosion, star formation, galaxy formation, zoom, complete) and
 * provides the stateful timer that drives the intro scene.
 *
 * The mapping itself is a pure function of elapsed seconds. The timer
 * only adds bookkeeping on top: it reports phase entries and fires the
 * completion event exactly once.
 */

pub const EXPLOSION_END: f32 = 4.0;
pub const STAR_FORMATION_END: f32 = 8.0;
pub const GALAXY_FORMATION_END: f32 = 12.0;
pub const ZOOM_END: f32 = 15.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AnimationPhase {
    Explosion,
    StarFormation,
    GalaxyFormation,
    Zoom,
    Complete,
}

impl AnimationPhase {
    pub const ALL: [AnimationPhase; 5] = [
        AnimationPhase::Explosion,
        AnimationPhase::StarFormation,
        AnimationPhase::GalaxyFormation,
        AnimationPhase::Zoom,
        AnimationPhase::Complete,
    ];

    // Phase active at elapsed time `t` (seconds)
    pub fn at(t: f32) -> Self {
        let t = t.max(0.0);
        if t < EXPLOSION_END {
            AnimationPhase::Explosion
        } else if t < STAR_FORMATION_END {
            AnimationPhase::StarFormation
        } else if t < GALAXY_FORMATION_END {
            AnimationPhase::GalaxyFormation
        } else if t < ZOOM_END {
            AnimationPhase::Zoom
        } else {
            AnimationPhase::Complete
        }
    }

    // Start and end of the phase in seconds; Complete is open-ended
    pub fn window(self) -> (f32, f32) {
        match self {
            AnimationPhase::Explosion => (0.0, EXPLOSION_END),
            AnimationPhase::StarFormation => (EXPLOSION_END, STAR_FORMATION_END),
            AnimationPhase::GalaxyFormation => (STAR_FORMATION_END, GALAXY_FORMATION_END),
            AnimationPhase::Zoom => (GALAXY_FORMATION_END, ZOOM_END),
            AnimationPhase::Complete => (ZOOM_END, f32::INFINITY),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AnimationPhase::Explosion => "Big Bang",
            AnimationPhase::StarFormation => "Star Formation",
            AnimationPhase::GalaxyFormation => "Galaxy Formation",
            AnimationPhase::Zoom => "Solar System",
            AnimationPhase::Complete => "",
        }
    }

    // 1-based position in the sequence, used by the intro progress bar
    pub fn ordinal(self) -> u8 {
        match self {
            AnimationPhase::Explosion => 1,
            AnimationPhase::StarFormation => 2,
            AnimationPhase::GalaxyFormation => 3,
            AnimationPhase::Zoom => 4,
            AnimationPhase::Complete => 5,
        }
    }

    // Fraction of the progress bar filled while this phase is shown
    pub fn bar_fraction(self) -> f32 {
        (self.ordinal().min(4) as f32 / 4.0).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseSample {
    pub phase: AnimationPhase,
    pub progress: f32,
}

// Active phase and normalized progress within it for elapsed time `t`
pub fn sample(t: f32) -> PhaseSample {
    let t = t.max(0.0);
    let phase = AnimationPhase::at(t);
    let progress = match phase {
        AnimationPhase::Complete => 1.0,
        _ => {
            let (start, end) = phase.window();
            ((t - start) / (end - start)).clamp(0.0, 1.0)
        }
    };
    PhaseSample { phase, progress }
}

// Result of advancing the timer by one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    pub sample: PhaseSample,
    pub entered: Option<AnimationPhase>,
    pub completed: bool,
}

pub struct PhaseTimer {
    elapsed: f32,
    phase: AnimationPhase,
    completion_fired: bool,
}

impl Default for PhaseTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseTimer {
    pub fn new() -> Self {
        Self {
            elapsed: 0.0,
            phase: AnimationPhase::Explosion,
            completion_fired: false,
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn sample(&self) -> PhaseSample {
        sample(self.elapsed)
    }

    // Advance by `dt` seconds. Negative deltas are ignored so the phase
    // never moves backward.
    pub fn advance(&mut self, dt: f32) -> Tick {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }

        let current = sample(self.elapsed);
        let entered = if current.phase > self.phase {
            self.phase = current.phase;
            Some(current.phase)
        } else {
            None
        };

        let completed = current.phase == AnimationPhase::Complete && !self.completion_fired;
        if completed {
            self.completion_fired = true;
        }

        Tick {
            sample: current,
            entered,
            completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_boundaries() {
        let cases = [
            (0.0, AnimationPhase::Explosion),
            (3.999, AnimationPhase::Explosion),
            (4.0, AnimationPhase::StarFormation),
            (7.999, AnimationPhase::StarFormation),
            (8.0, AnimationPhase::GalaxyFormation),
            (11.999, AnimationPhase::GalaxyFormation),
            (12.0, AnimationPhase::Zoom),
            (14.999, AnimationPhase::Zoom),
            (15.0, AnimationPhase::Complete),
            (1000.0, AnimationPhase::Complete),
        ];
        for (t, expected) in cases {
            assert_eq!(AnimationPhase::at(t), expected, "t = {}", t);
        }
    }

    #[test]
    fn negative_time_is_start() {
        let s = sample(-3.0);
        assert_eq!(s.phase, AnimationPhase::Explosion);
        assert_eq!(s.progress, 0.0);
    }

    #[test]
    fn progress_within_phase() {
        assert!((sample(2.0).progress - 0.5).abs() < 1e-6);
        assert!((sample(6.0).progress - 0.5).abs() < 1e-6);
        assert!((sample(13.5).progress - 0.5).abs() < 1e-6);
        assert_eq!(sample(20.0).progress, 1.0);
        for i in 0..200 {
            let p = sample(i as f32 * 0.1).progress;
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn timer_reports_each_entry_once() {
        let mut timer = PhaseTimer::new();
        let mut entered = Vec::new();
        for _ in 0..1000 {
            if let Some(phase) = timer.advance(1.0 / 60.0).entered {
                entered.push(phase);
            }
        }
        assert_eq!(
            entered,
            vec![
                AnimationPhase::StarFormation,
                AnimationPhase::GalaxyFormation,
                AnimationPhase::Zoom,
                AnimationPhase::Complete,
            ]
        );
    }

    #[test]
    fn completion_fires_once() {
        let mut timer = PhaseTimer::new();
        let first = timer.advance(16.0);
        assert!(first.completed);
        assert_eq!(timer.phase(), AnimationPhase::Complete);
        for _ in 0..10 {
            assert!(!timer.advance(1.0).completed);
        }
    }

    #[test]
    fn timer_ignores_negative_delta() {
        let mut timer = PhaseTimer::new();
        timer.advance(5.0);
        let tick = timer.advance(-4.0);
        assert_eq!(tick.sample.phase, AnimationPhase::StarFormation);
        assert_eq!(timer.elapsed(), 5.0);
    }

    #[test]
    fn bar_fraction_caps_at_full() {
        assert_eq!(AnimationPhase::Explosion.bar_fraction(), 0.25);
        assert_eq!(AnimationPhase::Zoom.bar_fraction(), 1.0);
        assert_eq!(AnimationPhase::Complete.bar_fraction(), 1.0);
    }
}
