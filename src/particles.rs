/*
 * Particles Module
 *
 * This module defines the Particle and ParticleSystem types used by the
 * intro and cinematic scenes, the generators that lay out each system
 * (explosion bursts, the star shell, spiral galaxies, era dust clouds),
 * and the per-frame update rules for every phase.
 *
 * A ParticleSystem plays the role of one point cloud sharing a material:
 * origin, orientation, opacity and point size apply to every particle.
 * Individual particles additionally carry their own opacity and scale.
 *
 * Increments that the animation applies "per frame" are expressed for a
 * 60 Hz reference frame and multiplied by `frame_scale`
 * (see `frame_scale`), so the timing holds at any refresh rate.
 */

use nannou::prelude::*;
use rand::Rng;
use std::f32::consts::PI;

use crate::color::hsl_to_rgb;
use crate::phase::EXPLOSION_END;

pub const EXPLOSION_BURSTS: usize = 5;
pub const PARTICLES_PER_BURST: usize = 1000;
pub const STAR_COUNT: usize = 200;
pub const GALAXY_COUNT: usize = 3;
pub const POINTS_PER_GALAXY: usize = 2000;
pub const GALAXY_PEAK_OPACITY: f32 = 0.8;

const REFERENCE_FPS: f32 = 60.0;

#[derive(Clone, Debug)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub color: Rgb,
    pub opacity: f32,
    // Opacity a fading-in particle settles at
    pub peak_opacity: f32,
    pub scale: f32,
}

impl Particle {
    pub fn new(position: Vec3, velocity: Vec3, color: Rgb) -> Self {
        Self {
            position,
            velocity,
            color,
            opacity: 1.0,
            peak_opacity: 1.0,
            scale: 1.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
    pub origin: Vec3,
    pub tilt_x: f32,
    pub spin_y: f32,
    pub opacity: f32,
    pub point_size: f32,
}

impl ParticleSystem {
    pub fn new(particles: Vec<Particle>, point_size: f32) -> Self {
        Self {
            particles,
            origin: Vec3::ZERO,
            tilt_x: 0.0,
            spin_y: 0.0,
            opacity: 1.0,
            point_size,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    // World position of a particle, applying the spin about Y first and
    // then the tilt about X
    pub fn world_position(&self, particle: &Particle) -> Vec3 {
        let spun = rotate_y(particle.position, self.spin_y);
        rotate_x(spun, self.tilt_x) + self.origin
    }

    // Effective alpha of a particle (material opacity times its own)
    pub fn alpha(&self, particle: &Particle) -> f32 {
        (self.opacity * particle.opacity).clamp(0.0, 1.0)
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0 && !self.particles.is_empty()
    }
}

pub fn rotate_x(v: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    vec3(v.x, v.y * c - v.z * s, v.y * s + v.z * c)
}

pub fn rotate_y(v: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    vec3(v.x * c + v.z * s, v.y, -v.x * s + v.z * c)
}

// Number of 60 Hz reference frames covered by a frame of `dt` seconds.
// Capped so a stalled frame does not make the animation jump.
pub fn frame_scale(dt: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        return 0.0;
    }
    (dt * REFERENCE_FPS).min(4.0)
}

// Count scaled by the density setting, never below one
pub fn scaled_count(count: usize, density: f32) -> usize {
    ((count as f32 * density.clamp(0.0, 1.0)).round() as usize).max(1)
}

fn random_direction(rng: &mut impl Rng) -> Vec3 {
    let theta = rng.gen::<f32>() * PI * 2.0;
    let phi = rng.gen::<f32>() * PI;
    vec3(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos())
}

// ---- Explosion ----

// One burst of particles at the origin flying out in random directions
pub fn explosion_burst(rng: &mut impl Rng, count: usize) -> ParticleSystem {
    let particles = (0..count)
        .map(|_| {
            let color = hsl_to_rgb(rng.gen::<f32>() * 0.2 + 0.1, 1.0, 0.5 + rng.gen::<f32>() * 0.5);
            let speed = 0.5 + rng.gen::<f32>() * 1.5;
            Particle::new(Vec3::ZERO, random_direction(rng) * speed, color)
        })
        .collect();
    ParticleSystem::new(particles, 2.0)
}

// Linear fade over the explosion phase; exactly zero from t = 4 onward
pub fn explosion_opacity(elapsed: f32) -> f32 {
    (1.0 - elapsed.max(0.0) / EXPLOSION_END).clamp(0.0, 1.0)
}

// Speed multiplier for the explosion: constant for the first half of the
// phase, then accelerating linearly up to twice the initial speed
pub fn explosion_speed_scale(progress: f32) -> f32 {
    let p = progress.clamp(0.0, 1.0);
    if p <= 0.5 {
        1.0
    } else {
        1.0 + (p - 0.5) * 2.0
    }
}

// Pure update of one explosion particle: new position and opacity
pub fn explosion_step(position: Vec3, velocity: Vec3, scale: f32, elapsed: f32) -> (Vec3, f32) {
    (position + velocity * scale, explosion_opacity(elapsed))
}

pub fn update_explosion(system: &mut ParticleSystem, scale: f32, elapsed: f32) {
    for particle in &mut system.particles {
        let (position, opacity) = explosion_step(particle.position, particle.velocity, scale, elapsed);
        particle.position = position;
        particle.opacity = opacity;
    }
}

// Only the opacity follows the clock once the particles have stopped moving
pub fn settle_explosion(system: &mut ParticleSystem, elapsed: f32) {
    let opacity = explosion_opacity(elapsed);
    for particle in &mut system.particles {
        particle.opacity = opacity;
    }
}

// Brightness of the central flash
pub fn flash_intensity(elapsed: f32) -> f32 {
    (20.0 - elapsed * 5.0).max(0.0)
}

// ---- Stars ----

// Stars on a spherical shell, initially invisible
pub fn star_shell(rng: &mut impl Rng, count: usize) -> ParticleSystem {
    let particles = (0..count)
        .map(|_| {
            let color = hsl_to_rgb(rng.gen::<f32>() * 0.2 + 0.5, 0.5, 0.8);
            let radius = 50.0 + rng.gen::<f32>() * 100.0;
            let mut star = Particle::new(random_direction(rng) * radius, Vec3::ZERO, color);
            star.opacity = 0.0;
            star.peak_opacity = 0.5 + rng.gen::<f32>() * 0.5;
            star
        })
        .collect();
    ParticleSystem::new(particles, 0.6)
}

pub fn star_pulse(elapsed: f32, x: f32) -> f32 {
    1.0 + (elapsed * 2.0 + x).sin() * 0.2
}

pub fn fade_in_stars(system: &mut ParticleSystem, elapsed: f32, frame_scale: f32) {
    for star in &mut system.particles {
        star.opacity = (star.opacity + 0.02 * frame_scale).min(star.peak_opacity);
        star.scale = star_pulse(elapsed, star.position.x);
    }
}

pub fn fade_out_stars(system: &mut ParticleSystem, frame_scale: f32) {
    for star in &mut system.particles {
        star.opacity = (star.opacity - 0.01 * frame_scale).max(0.0);
    }
}

// ---- Galaxies ----

// Two-armed spiral of points; `index` places it along the x axis
pub fn spiral_galaxy(rng: &mut impl Rng, index: usize, count: usize) -> ParticleSystem {
    let n = count.max(1) as f32;
    let particles = (0..count)
        .map(|i| {
            let t = i as f32 / n;
            let angle = t * PI * 4.0;
            let radius = t * 40.0;
            let position = vec3(
                angle.cos() * radius + (rng.gen::<f32>() - 0.5) * 5.0,
                (rng.gen::<f32>() - 0.5) * 2.0,
                angle.sin() * radius + (rng.gen::<f32>() - 0.5) * 5.0,
            );
            let color = hsl_to_rgb(0.6 + rng.gen::<f32>() * 0.2, 0.8, 0.6);
            Particle::new(position, Vec3::ZERO, color)
        })
        .collect();

    let mut galaxy = ParticleSystem::new(particles, 0.8);
    galaxy.origin = vec3((index as f32 - 1.0) * 100.0, 0.0, 0.0);
    galaxy.tilt_x = PI / 4.0;
    galaxy.opacity = 0.0;
    galaxy
}

pub fn form_galaxy(system: &mut ParticleSystem, index: usize, frame_scale: f32) {
    system.opacity = (system.opacity + 0.01 * frame_scale).min(GALAXY_PEAK_OPACITY);
    system.spin_y += 0.005 * (index as f32 + 1.0) * frame_scale;
}

pub fn fade_out_galaxy(system: &mut ParticleSystem, frame_scale: f32) {
    system.opacity = (system.opacity - 0.02 * frame_scale).max(0.0);
}

// ---- Background fields ----

// Uniform cloud of points in a cube of side `extent` centered on the origin
pub fn point_cloud(rng: &mut impl Rng, count: usize, extent: f32, color: Rgb, opacity: f32, point_size: f32) -> ParticleSystem {
    let particles = (0..count)
        .map(|_| {
            let position = vec3(
                (rng.gen::<f32>() - 0.5) * extent,
                (rng.gen::<f32>() - 0.5) * extent,
                (rng.gen::<f32>() - 0.5) * extent,
            );
            Particle::new(position, Vec3::ZERO, color)
        })
        .collect();
    let mut system = ParticleSystem::new(particles, point_size);
    system.opacity = opacity.clamp(0.0, 1.0);
    system
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn explosion_starts_at_origin_with_bounded_speed() {
        let burst = explosion_burst(&mut rng(), 500);
        assert_eq!(burst.len(), 500);
        for p in &burst.particles {
            assert_eq!(p.position, Vec3::ZERO);
            let speed = p.velocity.length();
            assert!(speed >= 0.5 - 1e-4 && speed <= 2.0 + 1e-4, "speed {}", speed);
        }
    }

    #[test]
    fn explosion_opacity_is_monotonic_and_ends_at_zero() {
        let mut previous = explosion_opacity(0.0);
        assert_eq!(previous, 1.0);
        let mut t = 0.0;
        while t < EXPLOSION_END {
            let current = explosion_opacity(t);
            assert!(current <= previous);
            assert!((0.0..=1.0).contains(&current));
            previous = current;
            t += 1.0 / 60.0;
        }
        assert_eq!(explosion_opacity(EXPLOSION_END), 0.0);
        assert_eq!(explosion_opacity(9.0), 0.0);
    }

    #[test]
    fn explosion_speed_is_constant_then_accelerating() {
        assert_eq!(explosion_speed_scale(0.0), 1.0);
        assert_eq!(explosion_speed_scale(0.5), 1.0);
        assert!(explosion_speed_scale(0.75) > 1.0);
        assert_eq!(explosion_speed_scale(1.0), 2.0);
    }

    #[test]
    fn explosion_particles_move_outward() {
        let mut burst = explosion_burst(&mut rng(), 50);
        update_explosion(&mut burst, 1.0, 0.5);
        let first: Vec<f32> = burst.particles.iter().map(|p| p.position.length()).collect();
        update_explosion(&mut burst, 1.0, 0.6);
        for (p, before) in burst.particles.iter().zip(first) {
            assert!(p.position.length() > before);
            assert!((p.opacity - explosion_opacity(0.6)).abs() < 1e-6);
        }
    }

    #[test]
    fn settle_zeroes_explosion_after_phase() {
        let mut burst = explosion_burst(&mut rng(), 10);
        settle_explosion(&mut burst, EXPLOSION_END);
        assert!(burst.particles.iter().all(|p| p.opacity == 0.0));
    }

    #[test]
    fn stars_fade_in_to_their_peak_and_out_to_zero() {
        let mut stars = star_shell(&mut rng(), 100);
        for star in &stars.particles {
            assert_eq!(star.opacity, 0.0);
            let r = star.position.length();
            assert!(r >= 50.0 - 1e-3 && r <= 150.0 + 1e-3);
        }
        for _ in 0..200 {
            fade_in_stars(&mut stars, 5.0, 1.0);
        }
        for star in &stars.particles {
            assert_eq!(star.opacity, star.peak_opacity);
            assert!(star.scale >= 0.8 && star.scale <= 1.2);
        }
        for _ in 0..200 {
            fade_out_stars(&mut stars, 1.0);
        }
        assert!(stars.particles.iter().all(|s| s.opacity == 0.0));
    }

    #[test]
    fn galaxy_fades_in_to_cap_and_spins() {
        let mut galaxy = spiral_galaxy(&mut rng(), 2, 100);
        assert_eq!(galaxy.origin.x, 100.0);
        assert_eq!(galaxy.opacity, 0.0);
        for _ in 0..300 {
            form_galaxy(&mut galaxy, 2, 1.0);
        }
        assert_eq!(galaxy.opacity, GALAXY_PEAK_OPACITY);
        assert!((galaxy.spin_y - 300.0 * 0.015).abs() < 1e-3);
        for _ in 0..100 {
            fade_out_galaxy(&mut galaxy, 1.0);
        }
        assert_eq!(galaxy.opacity, 0.0);
    }

    #[test]
    fn world_position_applies_origin_and_rotation() {
        let mut system = ParticleSystem::new(vec![Particle::new(vec3(1.0, 0.0, 0.0), Vec3::ZERO, Rgb::new(1.0, 1.0, 1.0))], 1.0);
        system.origin = vec3(10.0, 0.0, 0.0);
        system.spin_y = PI / 2.0;
        let p = system.world_position(&system.particles[0]);
        assert!((p - vec3(10.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn alpha_is_clamped() {
        let mut system = ParticleSystem::new(vec![Particle::new(Vec3::ZERO, Vec3::ZERO, Rgb::new(1.0, 1.0, 1.0))], 1.0);
        system.opacity = 2.0;
        assert_eq!(system.alpha(&system.particles[0]), 1.0);
    }

    #[test]
    fn frame_scale_handles_bad_deltas() {
        assert_eq!(frame_scale(0.0), 0.0);
        assert_eq!(frame_scale(-1.0), 0.0);
        assert_eq!(frame_scale(f32::NAN), 0.0);
        assert!((frame_scale(1.0 / 60.0) - 1.0).abs() < 1e-5);
        assert_eq!(frame_scale(10.0), 4.0);
    }

    #[test]
    fn density_scales_counts() {
        assert_eq!(scaled_count(1000, 1.0), 1000);
        assert_eq!(scaled_count(1000, 0.5), 500);
        assert_eq!(scaled_count(1000, 0.0), 1);
    }
}
