/*
 * Cosmic Evolution - Module Definitions
 *
 * This file defines the module structure for the cosmic evolution
 * visualization: an animated intro from the Big Bang to the formation of
 * galaxies, followed by an interactive solar system with planet facts and a
 * tour of Earth's geological eras.
 */

// Re-export key components for easier access
pub use app::Model;
pub use camera::{Camera, Easing, OrbitRig};
pub use config::Config;
pub use debug::DebugInfo;
pub use orbit::{step_angle, OrbitSimulator, OrbitingBody};
pub use params::ViewParams;
pub use particles::{Particle, ParticleSystem};
pub use persist::IntroFlagStore;
pub use phase::{AnimationPhase, PhaseSample, PhaseTimer};
pub use planets::{PlanetCatalog, PlanetFact};

// Define modules
pub mod app;
pub mod camera;
pub mod cinematic;
pub mod color;
pub mod config;
pub mod debug;
pub mod eras;
pub mod input;
pub mod intro;
pub mod orbit;
pub mod params;
pub mod particles;
pub mod persist;
pub mod phase;
pub mod planets;
pub mod renderer;
pub mod solar;
pub mod ui;
