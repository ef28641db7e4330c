/*
 * Input Module
 *
 * This module handles user input events.
 *
 * Features:
 * - Orbit camera rotation with mouse drag (solar system view)
 * - Zooming with mouse wheel or trackpad
 * - Planet hover highlight and click selection
 * - Keyboard shortcuts: Space play/pause, Escape close or skip,
 *   arrow keys step through the cinematic tour
 * - Forwarding raw window events to egui
 */

use nannou::prelude::*;
use nannou::winit::event::{MouseButton, MouseScrollDelta, TouchPhase};

use crate::app::{self, Model};

// The solar system view takes input only when no other scene covers it
fn solar_active(model: &Model) -> bool {
    model.intro.is_none() && model.cinematic.is_none()
}

// Mouse moved event handler
pub fn mouse_moved(app: &App, model: &mut Model, pos: Point2) {
    let new_pos = Vec2::new(pos.x, pos.y);

    if solar_active(model) {
        if model.solar.rig.is_dragging {
            model.solar.rig.drag(new_pos);
        } else {
            model.solar.update_hover(new_pos, app.window_rect());
        }
    }

    // Always update the stored mouse position
    model.mouse_position = new_pos;
}

// Mouse pressed event handler
pub fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left || !solar_active(model) {
        return;
    }
    // Check if the click is on the UI before handling it
    if model.egui.ctx().is_pointer_over_area() {
        return;
    }

    let clicked = model
        .solar
        .pick(model.mouse_position, app.window_rect())
        .map(|body| body.id.clone());

    match clicked {
        Some(id) => app::select_planet(model, id),
        None => model.solar.rig.start_drag(model.mouse_position),
    }
}

// Mouse released event handler
pub fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        model.solar.rig.end_drag();
    }
}

// Mouse wheel event handler for zooming
pub fn mouse_wheel(_app: &App, model: &mut Model, delta: MouseScrollDelta, _phase: TouchPhase) {
    if !solar_active(model) || model.egui.ctx().is_pointer_over_area() {
        return;
    }
    match delta {
        MouseScrollDelta::LineDelta(_x, y) => {
            model.solar.rig.zoom(y);
        }
        MouseScrollDelta::PixelDelta(pos) => {
            // Handle pixel delta (trackpads)
            model.solar.rig.zoom(pos.y as f32 * 0.01);
        }
    }
}

// Keyboard shortcuts
pub fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    if model.egui.ctx().wants_keyboard_input() {
        return;
    }
    match key {
        Key::Space => {
            if let Some(cinematic) = &mut model.cinematic {
                cinematic.tour.toggle_playing();
            } else if model.intro.is_none() {
                model.params.is_playing = !model.params.is_playing;
            }
        }
        Key::Escape => {
            if model.intro.is_some() {
                app::finish_intro(model, true);
            } else if model.cinematic.is_some() {
                app::close_cinematic(model);
            } else if model.show_geological {
                model.show_geological = false;
            } else {
                model.selected_planet = None;
            }
        }
        Key::Left => {
            if let Some(cinematic) = &mut model.cinematic {
                cinematic.tour.previous();
            }
        }
        Key::Right => {
            if let Some(cinematic) = &mut model.cinematic {
                cinematic.tour.next();
            }
        }
        _ => {}
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
