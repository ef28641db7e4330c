/*
 * Renderer Module
 *
 * This module draws the active scene (intro, cinematic tour or solar
 * system), the optional debug overlay and the egui panels.
 *
 * Scenes are 3D; every primitive is projected through the scene camera
 * and drawn with nannou's 2D `Draw` API:
 * - particles as small squares sized by perspective
 * - spheres as discs
 * - orbit lines and rings as polylines
 * Points behind the camera or outside the window are skipped.
 */

use log::error;
use nannou::prelude::*;

use crate::app::Model;
use crate::camera::{Camera, Projected};
use crate::color::with_alpha;
use crate::particles::ParticleSystem;
use crate::ui;

// Alpha below which a primitive is not worth drawing
const MIN_VISIBLE_ALPHA: f32 = 0.004;
const MAX_POINT_SIZE: f32 = 40.0;

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let window_rect = app.window_rect();

    let drawn = if let Some(intro) = &model.intro {
        intro.draw(&draw, window_rect)
    } else if let Some(cinematic) = &model.cinematic {
        cinematic.draw(&draw, window_rect)
    } else {
        let drawn = model.solar.draw(&draw, window_rect);
        if let (Some(name), Some(anchor)) = (model.hovered_planet_name(), model.solar.hover_anchor(window_rect)) {
            ui::draw_hover_label(&draw, name, anchor);
        }
        drawn
    };
    model.debug_info.drawn_primitives.set(drawn);

    if model.params.show_debug {
        ui::draw_debug_info(&draw, &model.debug_info, window_rect);
    }

    if let Err(e) = draw.to_frame(app, &frame) {
        error!("Failed to render scene: {:?}", e);
    }

    if let Err(e) = model.egui.draw_to_frame(&frame) {
        error!("Failed to render UI: {:?}", e);
    }
}

fn on_screen(point: Vec2, margin: f32, window_rect: Rect) -> bool {
    point.x >= window_rect.left() - margin
        && point.x <= window_rect.right() + margin
        && point.y >= window_rect.bottom() - margin
        && point.y <= window_rect.top() + margin
}

// Draw every visible particle of a system; returns the number drawn
pub fn draw_points(draw: &Draw, camera: &Camera, window_rect: Rect, system: &ParticleSystem) -> usize {
    if !system.is_visible() {
        return 0;
    }

    let mut drawn = 0;
    for particle in &system.particles {
        let alpha = system.alpha(particle);
        if alpha < MIN_VISIBLE_ALPHA {
            continue;
        }
        let Some(projected) = camera.project(system.world_position(particle), window_rect) else {
            continue;
        };
        let size = (system.point_size * particle.scale * projected.scale).clamp(1.0, MAX_POINT_SIZE);
        if !on_screen(projected.screen, size, window_rect) {
            continue;
        }
        draw.rect()
            .xy(projected.screen)
            .w_h(size, size)
            .color(with_alpha(particle.color, alpha));
        drawn += 1;
    }
    drawn
}

// Draw a sphere as a disc; returns its projection when it was drawn
pub fn draw_sphere(
    draw: &Draw,
    camera: &Camera,
    window_rect: Rect,
    center: Vec3,
    radius: f32,
    color: Rgb,
    alpha: f32,
) -> Option<Projected> {
    if alpha < MIN_VISIBLE_ALPHA {
        return None;
    }
    let projected = camera.project(center, window_rect)?;
    let screen_radius = (radius * projected.scale).max(0.5);
    if !on_screen(projected.screen, screen_radius, window_rect) {
        return None;
    }
    draw.ellipse()
        .xy(projected.screen)
        .radius(screen_radius)
        .color(with_alpha(color, alpha));
    Some(projected)
}

// Draw a 3D polyline, splitting it wherever a point cannot be projected
pub fn draw_path(draw: &Draw, camera: &Camera, window_rect: Rect, points: &[Vec3], color: Rgb, alpha: f32, weight: f32) -> usize {
    let color = with_alpha(color, alpha);
    let mut runs = 0;
    let mut run: Vec<Vec2> = Vec::with_capacity(points.len());

    let mut flush = |run: &mut Vec<Vec2>| {
        if run.len() >= 2 {
            draw.polyline()
                .weight(weight)
                .points_colored(run.drain(..).map(|p| (p, color)));
            runs += 1;
        }
        run.clear();
    };

    for &point in points {
        match camera.project(point, window_rect) {
            Some(projected) => run.push(projected.screen),
            None => flush(&mut run),
        }
    }
    flush(&mut run);
    runs
}
