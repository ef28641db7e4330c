/*
 * Solar System Scene
 *
 * The interactive view shown after the intro: the Sun, eight orbiting
 * planets with their orbit lines, Saturn's rings and a static background
 * starfield. The camera is driven by an OrbitRig (drag to rotate, wheel
 * to zoom) and the planet under the cursor is highlighted.
 */

use nannou::prelude::*;
use rand::Rng;
use std::cmp::Ordering;

use crate::camera::{Camera, OrbitRig};
use crate::color::{brighten, from_hex};
use crate::orbit::{orbit_path, OrbitSimulator, OrbitingBody};
use crate::particles::{point_cloud, ParticleSystem};
use crate::renderer::{draw_path, draw_points, draw_sphere};

pub const SUN_RADIUS: f32 = 10.0;
pub const STARFIELD_COUNT: usize = 10_000;
pub const STARFIELD_EXTENT: f32 = 2000.0;
pub const HOVER_SCALE: f32 = 1.15;

const SUN_COLOR: u32 = 0xffd27f;
const ORBIT_LINE_COLOR: u32 = 0x444444;
const ORBIT_SEGMENTS: usize = 64;
const RING_SEGMENTS: usize = 96;
const RING_BANDS: usize = 6;

pub struct SolarScene {
    pub camera: Camera,
    pub rig: OrbitRig,
    pub starfield: ParticleSystem,
    pub orbits: OrbitSimulator,
    orbit_paths: Vec<Vec<Vec3>>,
    pub hovered: Option<String>,
}

impl SolarScene {
    pub fn new(rng: &mut impl Rng, starfield_count: usize) -> Self {
        let eye = vec3(0.0, 50.0, 150.0);
        let rig = OrbitRig::from_eye(eye, Vec3::ZERO);
        let mut camera = Camera::new(eye, Vec3::ZERO, 75.0);
        rig.apply_to(&mut camera);

        let starfield = point_cloud(
            rng,
            starfield_count,
            STARFIELD_EXTENT,
            Rgb::new(1.0, 1.0, 1.0),
            0.8,
            0.7,
        );
        let orbits = OrbitSimulator::solar_system(rng);
        let orbit_paths = orbits
            .bodies
            .iter()
            .map(|body| orbit_path(body.radius, ORBIT_SEGMENTS))
            .collect();

        Self {
            camera,
            rig,
            starfield,
            orbits,
            orbit_paths,
            hovered: None,
        }
    }

    // Advance orbits by `frame_scale` reference frames and follow the rig
    pub fn update(&mut self, frame_scale: f32) {
        self.orbits.advance(frame_scale);
        self.rig.apply_to(&mut self.camera);
    }

    // Planet under the cursor: the closest one whose projected disc
    // (slightly enlarged) contains the point
    pub fn pick(&self, cursor: Vec2, window_rect: Rect) -> Option<&OrbitingBody> {
        self.orbits
            .bodies
            .iter()
            .filter_map(|body| {
                let projected = self.camera.project(body.position(), window_rect)?;
                let radius = body.size * projected.scale * HOVER_SCALE;
                (projected.screen.distance(cursor) <= radius).then_some((body, projected.depth))
            })
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
            .map(|(body, _)| body)
    }

    // Refresh the hover highlight; returns true when it changed
    pub fn update_hover(&mut self, cursor: Vec2, window_rect: Rect) -> bool {
        let hovered = self.pick(cursor, window_rect).map(|body| body.id.clone());
        if hovered != self.hovered {
            self.hovered = hovered;
            true
        } else {
            false
        }
    }

    // Screen point just above the hovered planet, where its name is shown
    pub fn hover_anchor(&self, window_rect: Rect) -> Option<Vec2> {
        let body = self.orbits.body(self.hovered.as_deref()?)?;
        let projected = self.camera.project(body.position(), window_rect)?;
        let radius = body.size * HOVER_SCALE * projected.scale;
        Some(projected.screen + vec2(0.0, radius + 18.0))
    }

    pub fn draw(&self, draw: &Draw, window_rect: Rect) -> usize {
        let camera = &self.camera;
        let mut drawn = draw_points(draw, camera, window_rect, &self.starfield);

        let line_color = from_hex(ORBIT_LINE_COLOR);
        for path in &self.orbit_paths {
            drawn += draw_path(draw, camera, window_rect, path, line_color, 0.3, 1.0);
        }

        // Painter's algorithm: farthest first, the Sun included
        let mut order: Vec<(f32, Option<&OrbitingBody>)> = self
            .orbits
            .bodies
            .iter()
            .map(|body| (self.depth_of(body.position()), Some(body)))
            .collect();
        order.push((self.depth_of(Vec3::ZERO), None));
        order.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

        for (_, body) in order {
            drawn += match body {
                Some(body) => self.draw_planet(draw, window_rect, body),
                None => self.draw_sun(draw, window_rect),
            };
        }
        drawn
    }

    fn depth_of(&self, point: Vec3) -> f32 {
        (point - self.camera.position).dot(self.camera.forward)
    }

    fn draw_sun(&self, draw: &Draw, window_rect: Rect) -> usize {
        let color = from_hex(SUN_COLOR);
        let mut drawn = 0;
        if draw_sphere(draw, &self.camera, window_rect, Vec3::ZERO, SUN_RADIUS * 1.2, color, 0.3).is_some() {
            drawn += 1;
        }
        if draw_sphere(draw, &self.camera, window_rect, Vec3::ZERO, SUN_RADIUS, color, 1.0).is_some() {
            drawn += 1;
        }
        drawn
    }

    fn draw_planet(&self, draw: &Draw, window_rect: Rect, body: &OrbitingBody) -> usize {
        let hovered = self.hovered.as_deref() == Some(body.id.as_str());
        let (size, emissive) = if hovered {
            (body.size * HOVER_SCALE, 0.8)
        } else {
            (body.size, 0.4)
        };
        let center = body.position();
        let mut drawn = 0;

        if body.has_rings {
            drawn += self.draw_rings(draw, window_rect, center, size, body.color);
        }

        let glow = brighten(body.color, emissive * 0.5);
        if draw_sphere(draw, &self.camera, window_rect, center, size * HOVER_SCALE, glow, 0.15).is_some() {
            drawn += 1;
        }
        let lit = Rgb::new(
            (body.color.red + body.emissive.red * emissive).min(1.0),
            (body.color.green + body.emissive.green * emissive).min(1.0),
            (body.color.blue + body.emissive.blue * emissive).min(1.0),
        );
        if draw_sphere(draw, &self.camera, window_rect, center, size, lit, 1.0).is_some() {
            drawn += 1;
        }
        drawn
    }

    // Flat ring between 1.5 and 2.5 times the planet size, tilted a little
    fn draw_rings(&self, draw: &Draw, window_rect: Rect, center: Vec3, size: f32, color: Rgb) -> usize {
        let mut drawn = 0;
        for band in 0..RING_BANDS {
            let t = band as f32 / (RING_BANDS - 1) as f32;
            let radius = size * (1.5 + t);
            let ring: Vec<Vec3> = orbit_path(radius, RING_SEGMENTS)
                .into_iter()
                .map(|p| crate::particles::rotate_x(p, 0.4) + center)
                .collect();
            drawn += draw_path(draw, &self.camera, window_rect, &ring, color, 0.6, 1.5);
        }
        drawn
    }
}
