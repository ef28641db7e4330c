/*
 * Orbit Module
 *
 * This module defines the OrbitingBody type and the OrbitSimulator that
 * advances every planet along its circular orbit. Each frame the angle of
 * a body grows by its angular speed times the user speed multiplier and
 * wraps into [0, 2π).
 *
 * Angles are kept in f64 so long sessions do not drift; positions are
 * produced in f32 for drawing.
 */

use nannou::prelude::*;
use rand::Rng;
use std::f64::consts::TAU;

use crate::color::from_hex;

pub const MIN_SPEED_MULTIPLIER: f32 = 0.1;
pub const MAX_SPEED_MULTIPLIER: f32 = 3.0;

// Visual orbit table: id, orbit radius, angular speed (rad per frame at 1x),
// sphere size, color, emissive tint, has rings
pub const PLANET_ORBITS: [(&str, f32, f64, f32, u32, u32, bool); 8] = [
    ("mercury", 25.0, 0.04, 1.5, 0x8c7853, 0x3a2a1a, false),
    ("venus", 35.0, 0.03, 2.2, 0xffc649, 0x6a4a20, false),
    ("earth", 45.0, 0.025, 2.3, 0x4a90e2, 0x1a3a5a, false),
    ("mars", 55.0, 0.02, 1.8, 0xe27b58, 0x5a2a1a, false),
    ("jupiter", 75.0, 0.01, 5.0, 0xc88b3a, 0x4a3a1a, false),
    ("saturn", 95.0, 0.008, 4.5, 0xfad5a5, 0x6a5a3a, true),
    ("uranus", 115.0, 0.006, 3.0, 0x4fd0e7, 0x2a5a6a, false),
    ("neptune", 135.0, 0.005, 3.0, 0x4b70dd, 0x1a3a6a, false),
];

// Next orbital angle, wrapped into [0, 2π)
pub fn step_angle(angle: f64, angular_speed: f64, multiplier: f64) -> f64 {
    (angle + angular_speed * multiplier).rem_euclid(TAU)
}

#[derive(Clone, Debug)]
pub struct OrbitingBody {
    pub id: String,
    pub radius: f32,
    pub angular_speed: f64,
    pub angle: f64,
    pub size: f32,
    pub color: Rgb,
    pub emissive: Rgb,
    pub has_rings: bool,
}

impl OrbitingBody {
    // Position in the orbital (xz) plane
    pub fn position(&self) -> Vec3 {
        let angle = self.angle as f32;
        vec3(angle.cos() * self.radius, 0.0, angle.sin() * self.radius)
    }

    pub fn step(&mut self, multiplier: f64) {
        self.angle = step_angle(self.angle, self.angular_speed, multiplier);
    }
}

pub struct OrbitSimulator {
    pub bodies: Vec<OrbitingBody>,
    pub playing: bool,
    speed_multiplier: f32,
}

impl OrbitSimulator {
    pub fn new(bodies: Vec<OrbitingBody>) -> Self {
        Self {
            bodies,
            playing: true,
            speed_multiplier: 1.0,
        }
    }

    // The eight planets at random starting angles
    pub fn solar_system(rng: &mut impl Rng) -> Self {
        let bodies = PLANET_ORBITS
            .iter()
            .map(|&(id, radius, angular_speed, size, color, emissive, has_rings)| OrbitingBody {
                id: id.to_string(),
                radius,
                angular_speed,
                angle: rng.gen::<f64>() * TAU,
                size,
                color: from_hex(color),
                emissive: from_hex(emissive),
                has_rings,
            })
            .collect();
        Self::new(bodies)
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    pub fn set_speed_multiplier(&mut self, multiplier: f32) {
        self.speed_multiplier = clamp_multiplier(multiplier);
    }

    // Advance every body by one reference frame; no-op while paused
    pub fn step(&mut self) {
        self.advance(1.0);
    }

    // Advance by `frame_scale` reference frames (see particles::frame_scale)
    pub fn advance(&mut self, frame_scale: f32) {
        if !self.playing || !frame_scale.is_finite() || frame_scale <= 0.0 {
            return;
        }
        let multiplier = self.speed_multiplier as f64 * frame_scale as f64;
        for body in &mut self.bodies {
            body.step(multiplier);
        }
    }

    pub fn body(&self, id: &str) -> Option<&OrbitingBody> {
        self.bodies.iter().find(|body| body.id == id)
    }
}

pub fn clamp_multiplier(multiplier: f32) -> f32 {
    if multiplier.is_finite() {
        multiplier.clamp(MIN_SPEED_MULTIPLIER, MAX_SPEED_MULTIPLIER)
    } else {
        1.0
    }
}

// Closed circle of `segments` + 1 points tracing an orbit in the xz plane
pub fn orbit_path(radius: f32, segments: usize) -> Vec<Vec3> {
    let segments = segments.max(3);
    (0..=segments)
        .map(|i| {
            let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
            vec3(angle.cos() * radius, 0.0, angle.sin() * radius)
        })
        .collect()
}
