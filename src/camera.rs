/*
 * Camera Module
 *
 * This module defines the perspective Camera used by every scene and the
 * two rigs that move it: the scripted intro path (a pure function of the
 * phase sample) and the user-controlled orbit rig of the solar system
 * view, which rotates on drag and zooms on the mouse wheel.
 *
 * Projection goes from world space straight to nannou's window space
 * (origin at the window center, y up), so scenes can hand the result
 * directly to `Draw`.
 */

use nannou::prelude::*;

use crate::phase::{AnimationPhase, PhaseSample};

// A projected world point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    pub screen: Vec2,
    pub depth: f32,
    // Pixels per world unit at this depth
    pub scale: f32,
}

pub struct Camera {
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    pub right: Vec3,
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(position: Vec3, target: Vec3, fov_y_degrees: f32) -> Self {
        let mut camera = Self {
            position,
            forward: -Vec3::Z,
            up: Vec3::Y,
            right: Vec3::X,
            fov_y: fov_y_degrees.to_radians(),
            near: 0.1,
            far: 10_000.0,
        };
        camera.look_at(target);
        camera
    }

    pub fn look_at(&mut self, target: Vec3) {
        let forward = (target - self.position).normalize_or_zero();
        if forward == Vec3::ZERO {
            return;
        }
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        // Looking straight up or down: keep the previous right vector
        let right = if right == Vec3::ZERO { self.right } else { right };
        self.forward = forward;
        self.right = right;
        self.up = right.cross(forward).normalize_or_zero();
    }

    // Focal length in pixels for a window of the given height
    pub fn focal_length(&self, window_height: f32) -> f32 {
        (window_height * 0.5) / (self.fov_y * 0.5).tan()
    }

    // Project a world point into window space; None when behind the near
    // plane or past the far plane
    pub fn project(&self, point: Vec3, window_rect: Rect) -> Option<Projected> {
        let relative = point - self.position;
        let depth = relative.dot(self.forward);
        if depth < self.near || depth > self.far {
            return None;
        }

        let focal = self.focal_length(window_rect.h());
        let scale = focal / depth;
        let x = relative.dot(self.right) * scale;
        let y = relative.dot(self.up) * scale;

        Some(Projected {
            screen: vec2(x, y) + window_rect.xy(),
            depth,
            scale,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    Smooth,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Smooth => t * t * (3.0 - 2.0 * t),
        }
    }
}

pub const INTRO_START: Vec3 = nannou::glam::const_vec3!([0.0, 0.0, 100.0]);

// Camera position along the scripted intro path
pub fn intro_camera_position(sample: PhaseSample, easing: Easing) -> Vec3 {
    let p = easing.apply(sample.progress);
    match sample.phase {
        AnimationPhase::Explosion => INTRO_START,
        AnimationPhase::StarFormation => vec3(0.0, 0.0, 100.0 - p * 20.0),
        AnimationPhase::GalaxyFormation => vec3(p * 50.0, 0.0, 80.0),
        AnimationPhase::Zoom => vec3(50.0 + p * 50.0, 0.0, 80.0 - p * 30.0),
        AnimationPhase::Complete => vec3(100.0, 0.0, 50.0),
    }
}

// Camera orbiting a target point; drives the solar system view
pub struct OrbitRig {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub is_dragging: bool,
    pub last_cursor_pos: Vec2,
    pub sensitivity: f32,
}

impl OrbitRig {
    // Rig whose initial eye position is `eye`, looking at `target`
    pub fn from_eye(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length().max(1.0);
        let pitch = (offset.y / distance).clamp(-1.0, 1.0).asin();
        let yaw = offset.x.atan2(offset.z);
        Self {
            target,
            yaw,
            pitch,
            distance,
            min_distance: 30.0,
            max_distance: 600.0,
            is_dragging: false,
            last_cursor_pos: Vec2::ZERO,
            sensitivity: 0.005,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + vec3(cp * sy, sp, cp * cy) * self.distance
    }

    pub fn apply_to(&self, camera: &mut Camera) {
        camera.position = self.eye();
        camera.look_at(self.target);
    }

    // Handle mouse wheel events for zooming
    pub fn zoom(&mut self, scroll_delta: f32) {
        let zoom_factor = 1.0 - scroll_delta * 0.1;
        self.distance = (self.distance * zoom_factor).clamp(self.min_distance, self.max_distance);
    }

    pub fn start_drag(&mut self, position: Vec2) {
        self.last_cursor_pos = position;
        self.is_dragging = true;
    }

    // Rotate around the target while dragging
    pub fn drag(&mut self, position: Vec2) {
        if !self.is_dragging {
            return;
        }
        let delta = position - self.last_cursor_pos;
        if delta.length_squared() > 0.0 {
            self.yaw -= delta.x * self.sensitivity;
            self.pitch = (self.pitch - delta.y * self.sensitivity).clamp(-1.4, 1.4);
            self.last_cursor_pos = position;
        }
    }

    pub fn end_drag(&mut self) {
        self.is_dragging = false;
    }
}
