/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui:
 * - the intro overlay (skip button, phase label, progress bar)
 * - header, info card and the control panel of the solar system view
 * - the planet info panel and the geological eras panel
 * - the cinematic tour details
 *
 * Panels only format what they are given. Anything that changes the
 * application state is reported back through UiActions and applied by the
 * app module, which also applies parameter changes detected by ViewParams.
 */

use nannou::prelude::*;
use nannou_egui::{egui, Egui};

use crate::color::{parse_hex, to_egui};
use crate::debug::DebugInfo;
use crate::eras::{CinematicTour, ERAS};
use crate::params::ViewParams;
use crate::phase::PhaseSample;
use crate::planets::{format_grouped, format_mass, format_million_km, format_rotation_hours, PlanetFact};

// What the UI needs to know about the application this frame
pub struct UiView<'a> {
    pub intro: Option<PhaseSample>,
    pub has_seen_intro: bool,
    pub selected_planet: Option<&'a PlanetFact>,
    pub show_geological: bool,
    pub tour: Option<&'a mut CinematicTour>,
}

// Requests raised by the UI during one frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiActions {
    pub skip_intro: bool,
    pub reset: bool,
    pub replay_intro: bool,
    pub close_planet: bool,
    pub open_geological: bool,
    pub close_geological: bool,
    pub open_cinematic: bool,
    pub close_cinematic: bool,
}

pub const DATA_SOURCES: &str = "NASA Planetary Fact Sheet, ESA Space Science";
pub const DATA_ATTRIBUTION: &str = "Data: NASA, ESA";

const ACCENT: egui::Color32 = egui::Color32::from_rgb(120, 170, 255);

// Update the UI and return the actions requested this frame
pub fn update_ui(egui: &mut Egui, params: &mut ViewParams, debug_info: &DebugInfo, view: UiView) -> UiActions {
    let mut actions = UiActions::default();

    let ctx = egui.begin_frame();

    if let Some(sample) = view.intro {
        intro_overlay(&ctx, sample, &mut actions);
    } else if let Some(tour) = view.tour {
        cinematic_window(&ctx, tour, &mut actions);
    } else {
        header(&ctx);
        info_card(&ctx);
        attribution(&ctx);
        control_panel(&ctx, params, debug_info, view.has_seen_intro, &mut actions);
        if let Some(planet) = view.selected_planet {
            planet_window(&ctx, planet, &mut actions);
        }
        if view.show_geological {
            geological_window(&ctx, &mut actions);
        }
    }

    actions
}

fn intro_overlay(ctx: &egui::CtxRef, sample: PhaseSample, actions: &mut UiActions) {
    egui::Window::new("skip_intro")
        .title_bar(false)
        .resizable(false)
        .anchor(egui::Align2::RIGHT_TOP, [-20.0, 20.0])
        .show(ctx, |ui| {
            if ui.button("Skip intro").clicked() {
                actions.skip_intro = true;
            }
        });

    let label = sample.phase.label();
    if label.is_empty() {
        return;
    }
    egui::Window::new("intro_phase")
        .title_bar(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -40.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(label);
            });
            ui.add(egui::ProgressBar::new(sample.phase.bar_fraction()).desired_width(320.0));
        });
}

fn header(ctx: &egui::CtxRef) {
    egui::Window::new("header")
        .title_bar(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_TOP, [0.0, 10.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Cosmic Evolution Simulator");
                ui.label("From the Big Bang to the Solar System");
            });
        });
}

fn info_card(ctx: &egui::CtxRef) {
    egui::Window::new("info_card")
        .title_bar(false)
        .resizable(false)
        .anchor(egui::Align2::LEFT_BOTTOM, [10.0, -10.0])
        .show(ctx, |ui| {
            ui.colored_label(ACCENT, "Explore the planets");
            ui.label("Drag to rotate, scroll to zoom.");
            ui.label("Click a planet to see its details.");
        });
}

fn attribution(ctx: &egui::CtxRef) {
    egui::Window::new("attribution")
        .title_bar(false)
        .resizable(false)
        .anchor(egui::Align2::RIGHT_BOTTOM, [-10.0, -10.0])
        .show(ctx, |ui| {
            ui.small(DATA_ATTRIBUTION);
        });
}

fn control_panel(
    ctx: &egui::CtxRef,
    params: &mut ViewParams,
    debug_info: &DebugInfo,
    has_seen_intro: bool,
    actions: &mut UiActions,
) {
    egui::Window::new("Controls")
        .default_pos([10.0, 10.0])
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let play_label = if params.is_playing { "Pause" } else { "Play" };
                if ui.button(play_label).clicked() {
                    params.is_playing = !params.is_playing;
                }
                if ui.button("Reset").clicked() {
                    actions.reset = true;
                }
            });

            ui.add(
                egui::Slider::new(&mut params.speed, ViewParams::get_speed_range())
                    .step_by(ViewParams::SPEED_STEP)
                    .text("Speed"),
            );

            if has_seen_intro && ui.button("Replay intro").clicked() {
                actions.replay_intro = true;
            }

            ui.separator();
            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            if params.show_debug {
                ui.label(format!("FPS: {:.1}", debug_info.fps));
            }
        });
}

fn color_swatch(ui: &mut egui::Ui, color: egui::Color32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(16.0, 16.0), egui::Sense::hover());
    ui.painter().rect_filled(rect, 3.0, color);
}

fn planet_window(ctx: &egui::CtxRef, planet: &PlanetFact, actions: &mut UiActions) {
    let mut open = true;
    egui::Window::new(&planet.name)
        .id(egui::Id::new("planet_info"))
        .open(&mut open)
        .resizable(false)
        .anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(color) = planet.color_rgb() {
                    color_swatch(ui, to_egui(color));
                }
                ui.heading(&planet.name);
            });
            ui.label(&planet.info);
            ui.separator();

            egui::Grid::new("planet_facts").striped(true).show(ui, |ui| {
                let rows = [
                    ("Mass", format!("{} kg", format_mass(planet.mass_kg))),
                    ("Radius", format!("{} km", format_grouped(planet.radius_km))),
                    (
                        "Distance from Sun",
                        format!(
                            "{} million km ({} AU)",
                            format_million_km(planet.distance_km),
                            planet.distance_au
                        ),
                    ),
                    ("Mean temperature", format!("{} °C", planet.mean_temp_c)),
                    ("Orbital period", format!("{} days", format_grouped(planet.orbital_period_days))),
                    ("Rotation period", format!("{} hours", format_rotation_hours(planet.rotation_period_hours))),
                    ("Atmosphere", planet.atmosphere.clone()),
                    ("Moons", planet.moons.to_string()),
                ];
                for (name, value) in rows {
                    ui.label(name);
                    ui.label(value);
                    ui.end_row();
                }
            });

            if !planet.composition.is_empty() {
                ui.separator();
                ui.label("Composition");
                ui.horizontal_wrapped(|ui| {
                    for (element, share) in &planet.composition {
                        ui.colored_label(ACCENT, format!("{} {}%", element, share));
                    }
                });
            }

            if planet.has_era_panels() {
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Geological eras").clicked() {
                        actions.open_geological = true;
                    }
                    if ui.button("Cinematic tour").clicked() {
                        actions.open_cinematic = true;
                    }
                });
            }

            ui.separator();
            ui.small(format!("Sources: {}", DATA_SOURCES));
        });
    if !open {
        actions.close_planet = true;
    }
}

fn geological_window(ctx: &egui::CtxRef, actions: &mut UiActions) {
    let mut open = true;
    egui::Window::new("Geological Eras of Earth")
        .open(&mut open)
        .default_width(420.0)
        .show(ctx, |ui| {
            for (index, era) in ERAS.iter().enumerate() {
                let color = parse_hex(era.color).map(to_egui).unwrap_or(ACCENT);
                ui.horizontal(|ui| {
                    ui.colored_label(color, format!("{}.", index + 1));
                    ui.colored_label(color, era.name);
                });
                ui.label(format!("{} ({})", era.period, era.duration));
                ui.label(era.characteristics);
                ui.separator();
            }
        });
    if !open {
        actions.close_geological = true;
    }
}

fn cinematic_window(ctx: &egui::CtxRef, tour: &mut CinematicTour, actions: &mut UiActions) {
    let era = tour.era();
    let color = parse_hex(era.color).map(to_egui).unwrap_or(ACCENT);

    egui::Window::new("Cinematic Tour")
        .resizable(false)
        .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
        .default_width(360.0)
        .show(ctx, |ui| {
            ui.colored_label(color, era.name);
            ui.heading(era.headline);
            ui.label(format!("{} ({})", era.period, era.duration));
            ui.separator();

            ui.label(format!("Climate: {}", era.climate));
            ui.label("Key events");
            for event in era.key_events {
                ui.label(format!("• {}", event));
            }
            ui.label("Life forms");
            ui.horizontal_wrapped(|ui| {
                for life in era.life_forms {
                    ui.label(format!("{} {}", life.icon, life.name));
                }
            });
            ui.label(format!("Transition: {}", era.transition));
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("◀").clicked() {
                    tour.previous();
                }
                let play_label = if tour.playing { "Pause" } else { "Play" };
                if ui.button(play_label).clicked() {
                    tour.toggle_playing();
                }
                if ui.button("▶").clicked() {
                    tour.next();
                }
            });
            ui.horizontal(|ui| {
                for (index, era) in ERAS.iter().enumerate() {
                    if ui.selectable_label(index == tour.current(), "●").on_hover_text(era.name).clicked() {
                        tour.select(index);
                    }
                }
            });

            ui.separator();
            if ui.button("Close").clicked() {
                actions.close_cinematic = true;
            }
        });
}

// Name of the planet under the cursor, centered on `position`
pub fn draw_hover_label(draw: &Draw, name: &str, position: Vec2) {
    draw.rect()
        .xy(position)
        .w_h(name.chars().count() as f32 * 12.0 + 30.0, 30.0)
        .color(rgba(0.0, 0.0, 0.0, 0.7));
    draw.text(name)
        .xy(position)
        .color(WHITE)
        .font_size(16);
}

// Draw debug information on the screen
pub fn draw_debug_info(draw: &Draw, debug_info: &DebugInfo, window_rect: Rect) {
    let lines = debug_info.lines();

    // Create a background panel in the bottom-right corner
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 200.0;
    let panel_height = line_height * lines.len() as f32 + margin;
    let panel_x = window_rect.right() - panel_width / 2.0;
    let panel_y = window_rect.bottom() + panel_height / 2.0;

    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.right() - panel_width + margin;
    let text_y = window_rect.bottom() + panel_height - margin;

    for (i, text) in lines.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        // Position the text with a fixed offset from the left edge
        draw.text(text)
            .x_y(text_x + 70.0, y)
            .color(WHITE)
            .font_size(14);
    }
}
