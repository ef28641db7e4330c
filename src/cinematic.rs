/*
 * Cinematic Era Tour Scene
 *
 * A small 3D scene for Earth's geological eras: one sphere and one dust
 * cloud per era, laid out along the x axis. The camera glides to the
 * selected era and gently bobs while the tour plays. Playback state
 * (current era, auto-advance) lives in `eras::CinematicTour`.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::camera::Camera;
use crate::color::parse_hex;
use crate::eras::{CinematicTour, Era, ERAS};
use crate::particles::{point_cloud, ParticleSystem};
use crate::renderer::{draw_points, draw_sphere};

pub const ERA_SPACING: f32 = 8.0;
pub const ERA_SPHERE_RADIUS: f32 = 2.0;
pub const CLOUD_POINTS: usize = 1000;

const CAMERA_START: Vec3 = nannou::glam::const_vec3!([0.0, 3.0, 8.0]);
// Fraction of the remaining distance covered per reference frame
const CAMERA_LERP: f32 = 0.05;
const CLOUD_SPIN: f32 = 0.05;

pub fn era_color(era: &Era) -> Rgb {
    parse_hex(era.color).unwrap_or(Rgb::new(1.0, 1.0, 1.0))
}

pub fn era_x(index: usize) -> f32 {
    index as f32 * ERA_SPACING
}

// Exponential approach toward `target`, frame-rate independent
pub fn approach(current: f32, target: f32, frame_scale: f32) -> f32 {
    let t = 1.0 - (1.0 - CAMERA_LERP).powf(frame_scale.max(0.0));
    current + (target - current) * t
}

pub struct CinematicScene {
    pub tour: CinematicTour,
    pub camera: Camera,
    clouds: Vec<ParticleSystem>,
    background: ParticleSystem,
    time: f32,
}

impl CinematicScene {
    pub fn new(rng: &mut impl Rng, density: f32) -> Self {
        let count = crate::particles::scaled_count(CLOUD_POINTS, density);
        let clouds = ERAS
            .iter()
            .enumerate()
            .map(|(index, era)| {
                let mut cloud = point_cloud(rng, count, 10.0, era_color(era), 0.6, 0.05);
                cloud.origin = vec3(era_x(index), 0.0, 0.0);
                cloud
            })
            .collect();
        let background = point_cloud(
            rng,
            crate::particles::scaled_count(2000, density),
            200.0,
            Rgb::new(1.0, 1.0, 1.0),
            0.6,
            0.3,
        );

        Self {
            tour: CinematicTour::new(),
            camera: Camera::new(CAMERA_START, Vec3::ZERO, 60.0),
            clouds,
            background,
            time: 0.0,
        }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn update(&mut self, dt: f32, frame_scale: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.time += dt;
        }
        self.tour.update(dt);

        let target_x = era_x(self.tour.current());
        let mut position = self.camera.position;
        position.x = approach(position.x, target_x, frame_scale);
        if self.tour.playing {
            position.y = (self.time * 0.3).sin() * 0.5 + 3.0;
        }
        self.camera.position = position;
        self.camera.look_at(vec3(target_x, 0.0, 0.0));

        for cloud in &mut self.clouds {
            cloud.spin_y = self.time * CLOUD_SPIN;
        }
    }

    pub fn draw(&self, draw: &Draw, window_rect: Rect) -> usize {
        let mut drawn = draw_points(draw, &self.camera, window_rect, &self.background);
        let bob = (self.time * 0.5).sin() * 0.1;

        for (index, era) in ERAS.iter().enumerate() {
            let center = vec3(era_x(index), bob, 0.0);
            let alpha = if index == self.tour.current() { 1.0 } else { 0.6 };
            if draw_sphere(draw, &self.camera, window_rect, center, ERA_SPHERE_RADIUS, era_color(era), alpha).is_some() {
                drawn += 1;
            }
        }
        for cloud in &self.clouds {
            drawn += draw_points(draw, &self.camera, window_rect, cloud);
        }
        drawn
    }
}
