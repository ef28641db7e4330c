/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct with the frame metrics shown
 * by the debug overlay:
 * - FPS (frames per second)
 * - Frame time
 * - Number of primitives drawn in the last frame
 * - Intro elapsed time, when the intro is running
 * - Cinematic tour clock, when the tour is open
 */

use std::cell::Cell;
use std::time::Duration;

#[derive(Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    // Written by the renderer, which only has shared access to the model
    pub drawn_primitives: Cell<usize>,
    pub intro_elapsed: Option<f32>,
    pub tour_time: Option<f32>,
}

impl DebugInfo {
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time.as_secs_f64() * 1000.0),
            format!("Primitives: {}", self.drawn_primitives.get()),
        ];
        if let Some(elapsed) = self.intro_elapsed {
            lines.push(format!("Intro: {:.1} s", elapsed));
        }
        if let Some(time) = self.tour_time {
            lines.push(format!("Tour: {:.1} s", time));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_clocks_only_when_present() {
        let mut info = DebugInfo::default();
        assert_eq!(info.lines().len(), 3);

        info.intro_elapsed = Some(2.5);
        info.tour_time = Some(12.0);
        info.drawn_primitives.set(42);
        let lines = info.lines();
        assert_eq!(lines[2], "Primitives: 42");
        assert_eq!(lines[3], "Intro: 2.5 s");
        assert_eq!(lines[4], "Tour: 12.0 s");
    }
}
