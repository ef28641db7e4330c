/*
 * Cosmic Evolution
 *
 * An animated journey from the Big Bang to the Solar System:
 * 1. Big Bang: an explosion of hot particles
 * 2. Star formation: the first stars light up
 * 3. Galaxy formation: spiral galaxies take shape
 * 4. Zoom: the camera sweeps in toward the Sun
 *
 * After the intro the solar system can be explored interactively. The
 * intro plays once; later runs open straight on the solar system.
 */

use clap::Parser;
use cosmic_evolution::app;
use cosmic_evolution::Config;

fn main() {
    let config = Config::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::debug!("{:?}", config);

    config.install();
    nannou::app(app::model).update(app::update).run();
}
