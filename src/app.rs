/*
 * Application Module
 *
 * This module defines the main application model and the per-frame update.
 * The model owns one scene per view:
 * - the intro, present only while it plays
 * - the solar system, always present
 * - the cinematic era tour, present only while it is open
 *
 * Each frame the update runs the egui panels, applies the actions they
 * report and any parameter changes, then advances the scene on screen.
 * The solar system keeps orbiting underneath the intro and the tour.
 */

use log::{debug, info, warn};
use nannou::prelude::*;
use nannou_egui::Egui;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::camera::Easing;
use crate::cinematic::CinematicScene;
use crate::config::Config;
use crate::debug::DebugInfo;
use crate::input;
use crate::intro::IntroScene;
use crate::orbit::OrbitSimulator;
use crate::params::{ParamChanges, ViewParams};
use crate::particles::{frame_scale, scaled_count};
use crate::phase::Tick;
use crate::persist::IntroFlagStore;
use crate::planets::PlanetCatalog;
use crate::renderer;
use crate::solar::{SolarScene, STARFIELD_COUNT};
use crate::ui::{self, UiActions, UiView};

// Main model for the application
pub struct Model {
    pub egui: Egui,
    pub params: ViewParams,
    pub debug_info: DebugInfo,
    pub intro: Option<IntroScene>,
    pub solar: SolarScene,
    pub cinematic: Option<CinematicScene>,
    pub catalog: PlanetCatalog,
    pub flag_store: IntroFlagStore,
    pub has_seen_intro: bool,
    pub selected_planet: Option<String>,
    pub show_geological: bool,
    pub mouse_position: Vec2,
    pub rng: StdRng,
    pub density: f32,
    pub easing: Easing,
}

impl Model {
    // Display name of the planet under the cursor
    pub fn hovered_planet_name(&self) -> Option<&str> {
        let id = self.solar.hovered.as_deref()?;
        Some(self.catalog.lookup(id).map(|planet| planet.name.as_str()).unwrap_or(id))
    }
}

fn load_catalog(config: &Config) -> PlanetCatalog {
    let loaded = match &config.planets {
        Some(path) => PlanetCatalog::load(path),
        None => PlanetCatalog::bundled(),
    };
    match loaded {
        Ok(catalog) => {
            info!("Loaded {} planet records", catalog.len());
            catalog
        }
        Err(e) => {
            warn!("Failed to load planet data: {:#}", e);
            PlanetCatalog::empty()
        }
    }
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let config = Config::global();

    // 80% of the primary monitor, or a fixed size when it is unknown
    let (window_width, window_height) = app
        .primary_monitor()
        .map(|monitor| {
            let size = monitor.size();
            (size.width as f32 * 0.8, size.height as f32 * 0.8)
        })
        .unwrap_or((1280.0, 800.0));

    let window_id = app
        .new_window()
        .title("Cosmic Evolution")
        .size(window_width as u32, window_height as u32)
        .view(renderer::view)
        .mouse_moved(input::mouse_moved)
        .mouse_pressed(input::mouse_pressed)
        .mouse_released(input::mouse_released)
        .mouse_wheel(input::mouse_wheel)
        .key_pressed(input::key_pressed)
        .raw_event(input::raw_window_event)
        .build()
        .expect("Failed to build window");

    let window = app.window(window_id).expect("Window closed during startup");
    let egui = Egui::from_window(&window);

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let density = config.density();
    let easing = Easing::from(config.easing);

    let catalog = load_catalog(config);
    let flag_store = IntroFlagStore::new(&config.state_dir);
    let has_seen_intro = flag_store.has_seen_intro();

    let mut params = ViewParams::with_speed(config.speed());
    let mut solar = SolarScene::new(&mut rng, scaled_count(STARFIELD_COUNT, density));
    solar.orbits.set_speed_multiplier(params.speed);
    solar.orbits.playing = params.is_playing;
    params.take_snapshot();

    let intro = if config.show_intro(has_seen_intro) {
        info!("Starting intro");
        Some(IntroScene::new(&mut rng, density, easing))
    } else {
        info!("Intro already seen; opening the solar system");
        None
    };

    Model {
        egui,
        params,
        debug_info: DebugInfo::default(),
        intro,
        solar,
        cinematic: None,
        catalog,
        flag_store,
        has_seen_intro,
        selected_planet: None,
        show_geological: false,
        mouse_position: Vec2::ZERO,
        rng,
        density,
        easing,
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    // Update debug info
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;
    model.debug_info.intro_elapsed = model.intro.as_ref().map(IntroScene::elapsed);
    model.debug_info.tour_time = model.cinematic.as_ref().map(CinematicScene::time);

    let view = UiView {
        intro: model.intro.as_ref().map(IntroScene::sample),
        has_seen_intro: model.has_seen_intro,
        selected_planet: model.selected_planet.as_deref().and_then(|id| model.catalog.lookup(id)),
        show_geological: model.show_geological,
        tour: model.cinematic.as_mut().map(|scene| &mut scene.tour),
    };
    let actions = ui::update_ui(&mut model.egui, &mut model.params, &model.debug_info, view);
    apply_actions(model, actions);

    // Panels, keyboard shortcuts and reset all edit params; apply them once
    apply_param_changes(&mut model.params, &mut model.solar.orbits);

    let dt = update.since_last.as_secs_f32();
    let tick = step_scenes(&mut model.intro, &mut model.cinematic, &mut model.solar, dt);
    if tick.is_some_and(|tick| tick.completed) {
        finish_intro(model, false);
    }
}

// Push params edited since the last snapshot into the orbit stepper
pub fn apply_param_changes(params: &mut ViewParams, orbits: &mut OrbitSimulator) -> ParamChanges {
    let changes = params.detect_changes();
    if changes.playing_changed {
        orbits.playing = params.is_playing;
        info!("Orbits {}", if params.is_playing { "resumed" } else { "paused" });
    }
    if changes.speed_changed {
        orbits.set_speed_multiplier(params.speed);
        debug!("Orbit speed set to {:.1}x", orbits.speed_multiplier());
    }
    params.take_snapshot();
    changes
}

// Advance the intro or the tour, whichever is open, and always the orbits.
// Returns the intro tick while the intro runs.
pub fn step_scenes(
    intro: &mut Option<IntroScene>,
    cinematic: &mut Option<CinematicScene>,
    solar: &mut SolarScene,
    dt: f32,
) -> Option<Tick> {
    let frames = frame_scale(dt);
    let tick = match (intro.as_mut(), cinematic.as_mut()) {
        (Some(intro), _) => Some(intro.update(dt)),
        (None, Some(cinematic)) => {
            cinematic.update(dt, frames);
            None
        }
        (None, None) => None,
    };
    solar.update(frames);
    tick
}

fn apply_actions(model: &mut Model, actions: UiActions) {
    if actions.skip_intro {
        finish_intro(model, true);
    }
    if actions.reset {
        reset(model);
    }
    if actions.replay_intro {
        replay_intro(model);
    }
    if actions.close_planet {
        model.selected_planet = None;
        model.show_geological = false;
    }
    if actions.open_geological {
        model.show_geological = true;
    }
    if actions.close_geological {
        model.show_geological = false;
    }
    if actions.open_cinematic {
        open_cinematic(model);
    }
    if actions.close_cinematic {
        close_cinematic(model);
    }
}

// End the intro, either on completion or on skip, and persist the flag
pub fn finish_intro(model: &mut Model, skipped: bool) {
    if model.intro.take().is_none() {
        return;
    }
    if skipped {
        info!("Intro skipped");
    } else {
        info!("Intro complete");
    }

    model.has_seen_intro = true;
    if let Err(e) = model.flag_store.mark_seen() {
        warn!("Failed to record intro as seen: {:#}", e);
    }
}

// Start the intro again; the persisted flag stays set
pub fn replay_intro(model: &mut Model) {
    if model.intro.is_some() {
        return;
    }
    info!("Replaying intro");
    model.cinematic = None;
    model.selected_planet = None;
    model.show_geological = false;
    model.intro = Some(IntroScene::new(&mut model.rng, model.density, model.easing));
}

// Pause the orbits and close the planet panels; orbit angles are kept
pub fn reset(model: &mut Model) {
    model.params.is_playing = false;
    model.selected_planet = None;
    model.show_geological = false;
    model.solar.rig.end_drag();
}

pub fn select_planet(model: &mut Model, id: String) {
    match model.catalog.lookup(&id) {
        Some(planet) => info!("Selected {}", planet.name),
        None => warn!("No data for planet '{}'", id),
    }
    model.selected_planet = Some(id);
}

pub fn open_cinematic(model: &mut Model) {
    if model.cinematic.is_none() {
        info!("Opening cinematic era tour");
        model.cinematic = Some(CinematicScene::new(&mut model.rng, model.density));
    }
}

pub fn close_cinematic(model: &mut Model) {
    if model.cinematic.take().is_some() {
        debug!("Closed cinematic era tour");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbit::MAX_SPEED_MULTIPLIER;

    fn angles(solar: &SolarScene) -> Vec<f64> {
        solar.orbits.bodies.iter().map(|b| b.angle).collect()
    }

    fn synced(rng: &mut StdRng) -> (ViewParams, OrbitSimulator) {
        let mut params = ViewParams::default();
        let orbits = OrbitSimulator::solar_system(rng);
        params.take_snapshot();
        (params, orbits)
    }

    #[test]
    fn untouched_params_leave_orbits_alone() {
        let (mut params, mut orbits) = synced(&mut StdRng::seed_from_u64(1));
        orbits.playing = false;
        let changes = apply_param_changes(&mut params, &mut orbits);
        assert_eq!(changes, ParamChanges::default());
        assert!(!orbits.playing);
    }

    #[test]
    fn play_toggle_reaches_the_orbits_once() {
        let (mut params, mut orbits) = synced(&mut StdRng::seed_from_u64(2));
        // Space bar and reset flip the flag directly
        params.is_playing = false;
        let changes = apply_param_changes(&mut params, &mut orbits);
        assert!(changes.playing_changed && !changes.speed_changed);
        assert!(!orbits.playing);
        assert!(!apply_param_changes(&mut params, &mut orbits).any_changed);

        params.is_playing = true;
        apply_param_changes(&mut params, &mut orbits);
        assert!(orbits.playing);
    }

    #[test]
    fn speed_changes_are_clamped_into_the_stepper() {
        let (mut params, mut orbits) = synced(&mut StdRng::seed_from_u64(3));
        params.speed = 2.5;
        assert!(apply_param_changes(&mut params, &mut orbits).speed_changed);
        assert_eq!(orbits.speed_multiplier(), 2.5);

        params.speed = 12.0;
        apply_param_changes(&mut params, &mut orbits);
        assert_eq!(orbits.speed_multiplier(), MAX_SPEED_MULTIPLIER);
    }

    #[test]
    fn orbits_keep_moving_under_the_tour() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut solar = SolarScene::new(&mut rng, 10);
        let mut cinematic = Some(CinematicScene::new(&mut rng, 0.05));
        let before = angles(&solar);

        let tick = step_scenes(&mut None, &mut cinematic, &mut solar, 1.0 / 60.0);
        assert!(tick.is_none());
        assert!(cinematic.as_ref().is_some_and(|scene| scene.time() > 0.0));
        assert_ne!(angles(&solar), before);
    }

    #[test]
    fn orbits_keep_moving_under_the_intro() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut solar = SolarScene::new(&mut rng, 10);
        let mut intro = Some(IntroScene::new(&mut rng, 0.05, Easing::Linear));
        let before = angles(&solar);

        let tick = step_scenes(&mut intro, &mut None, &mut solar, 1.0 / 60.0);
        assert!(tick.is_some_and(|tick| !tick.completed));
        assert_ne!(angles(&solar), before);
    }

    #[test]
    fn paused_orbits_hold_under_every_scene() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut solar = SolarScene::new(&mut rng, 10);
        solar.orbits.playing = false;
        let mut cinematic = Some(CinematicScene::new(&mut rng, 0.05));
        let before = angles(&solar);

        step_scenes(&mut None, &mut cinematic, &mut solar, 1.0 / 60.0);
        step_scenes(&mut None, &mut None, &mut solar, 1.0 / 60.0);
        assert_eq!(angles(&solar), before);
    }
}
