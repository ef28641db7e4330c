/*
 * Intro Module
 *
 * The Big Bang intro scene. It owns the phase timer, the camera and every
 * particle system of the intro, and dispatches each frame to the update
 * rules of the active phase:
 * 1. Explosion: bursts fly outward and fade, a central flash dims
 * 2. Star formation: stars fade in and pulse, the camera moves in
 * 3. Galaxy formation: spirals fade in and spin, stars fade out
 * 4. Zoom: galaxies fade out while the camera sweeps toward the Sun
 *
 * The scene is dropped as soon as the intro completes or is skipped,
 * which releases all of its particle buffers.
 */

use log::{debug, info};
use nannou::prelude::*;
use rand::Rng;

use crate::camera::{intro_camera_position, Camera, Easing, INTRO_START};
use crate::particles::{
    self, explosion_burst, explosion_speed_scale, flash_intensity, frame_scale, scaled_count, spiral_galaxy,
    star_shell, ParticleSystem, EXPLOSION_BURSTS, GALAXY_COUNT, PARTICLES_PER_BURST, POINTS_PER_GALAXY,
    STAR_COUNT,
};
use crate::phase::{AnimationPhase, PhaseSample, PhaseTimer, Tick};
use crate::renderer::{draw_points, draw_sphere};

pub struct IntroScene {
    timer: PhaseTimer,
    easing: Easing,
    pub camera: Camera,
    pub explosions: Vec<ParticleSystem>,
    pub stars: ParticleSystem,
    pub galaxies: Vec<ParticleSystem>,
    pub flash: f32,
}

impl IntroScene {
    pub fn new(rng: &mut impl Rng, density: f32, easing: Easing) -> Self {
        let explosions = (0..EXPLOSION_BURSTS)
            .map(|_| explosion_burst(rng, scaled_count(PARTICLES_PER_BURST, density)))
            .collect();
        let stars = star_shell(rng, scaled_count(STAR_COUNT, density));
        let galaxies = (0..GALAXY_COUNT)
            .map(|g| spiral_galaxy(rng, g, scaled_count(POINTS_PER_GALAXY, density)))
            .collect();

        // The intro camera never turns: it looks down -Z the whole time
        let camera = Camera::new(INTRO_START, INTRO_START - Vec3::Z, 75.0);

        Self {
            timer: PhaseTimer::new(),
            easing,
            camera,
            explosions,
            stars,
            galaxies,
            flash: flash_intensity(0.0),
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.timer.elapsed()
    }

    pub fn sample(&self) -> PhaseSample {
        self.timer.sample()
    }

    pub fn phase(&self) -> AnimationPhase {
        self.timer.phase()
    }

    pub fn particle_count(&self) -> usize {
        self.explosions.iter().map(ParticleSystem::len).sum::<usize>()
            + self.stars.len()
            + self.galaxies.iter().map(ParticleSystem::len).sum::<usize>()
    }

    // Advance the intro by `dt` seconds of wall-clock time
    pub fn update(&mut self, dt: f32) -> Tick {
        let tick = self.timer.advance(dt);
        let elapsed = self.timer.elapsed();
        let frames = frame_scale(dt);

        if let Some(phase) = tick.entered {
            info!("Intro phase: {:?} at {:.2} s", phase, elapsed);
        }

        match tick.sample.phase {
            AnimationPhase::Explosion => {
                self.flash = flash_intensity(elapsed);
                let scale = explosion_speed_scale(tick.sample.progress) * frames;
                for burst in &mut self.explosions {
                    particles::update_explosion(burst, scale, elapsed);
                }
            }
            AnimationPhase::StarFormation => {
                particles::fade_in_stars(&mut self.stars, elapsed, frames);
            }
            AnimationPhase::GalaxyFormation => {
                for (index, galaxy) in self.galaxies.iter_mut().enumerate() {
                    particles::form_galaxy(galaxy, index, frames);
                }
                particles::fade_out_stars(&mut self.stars, frames);
            }
            AnimationPhase::Zoom => {
                for galaxy in &mut self.galaxies {
                    particles::fade_out_galaxy(galaxy, frames);
                }
            }
            AnimationPhase::Complete => {}
        }

        if tick.sample.phase != AnimationPhase::Explosion {
            self.flash = 0.0;
            for burst in &mut self.explosions {
                particles::settle_explosion(burst, elapsed);
            }
        }

        self.camera.position = intro_camera_position(tick.sample, self.easing);
        tick
    }

    pub fn draw(&self, draw: &Draw, window_rect: Rect) -> usize {
        let mut drawn = 0;

        if self.flash > 0.0 {
            let glow = (self.flash / 20.0).clamp(0.0, 1.0);
            let white = Rgb::new(1.0, 1.0, 1.0);
            if draw_sphere(draw, &self.camera, window_rect, Vec3::ZERO, 6.0 + glow * 10.0, white, glow * 0.35).is_some() {
                drawn += 1;
            }
            if draw_sphere(draw, &self.camera, window_rect, Vec3::ZERO, 2.0 + glow * 3.0, white, glow).is_some() {
                drawn += 1;
            }
        }

        for galaxy in &self.galaxies {
            drawn += draw_points(draw, &self.camera, window_rect, galaxy);
        }
        drawn += draw_points(draw, &self.camera, window_rect, &self.stars);
        for burst in &self.explosions {
            drawn += draw_points(draw, &self.camera, window_rect, burst);
        }
        drawn
    }
}

impl Drop for IntroScene {
    fn drop(&mut self) {
        debug!("Intro scene released ({} particles)", self.particle_count());
    }
}
