/*
 * Configuration Module
 *
 * Command line options, parsed once in main and installed here so the
 * nannou model builder (a plain fn without arguments) can read them.
 */

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::OnceLock;

use crate::camera::Easing;
use crate::orbit::clamp_multiplier;

static CONFIG: OnceLock<Config> = OnceLock::new();

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EasingArg {
    Linear,
    Smooth,
}

impl From<EasingArg> for Easing {
    fn from(arg: EasingArg) -> Self {
        match arg {
            EasingArg::Linear => Easing::Linear,
            EasingArg::Smooth => Easing::Smooth,
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[command(name = "cosmic_evolution", about = "From the Big Bang to the Solar System")]
pub struct Config {
    /// Directory holding the persisted "intro seen" flag
    #[arg(long, default_value = ".")]
    pub state_dir: PathBuf,

    /// Planet data file to use instead of the bundled one
    #[arg(long)]
    pub planets: Option<PathBuf>,

    /// Play the intro even if it has been seen before
    #[arg(long, conflicts_with = "skip_intro")]
    pub replay_intro: bool,

    /// Never play the intro
    #[arg(long)]
    pub skip_intro: bool,

    /// Initial orbit speed multiplier (0.1 to 3.0)
    #[arg(long, default_value_t = 1.0)]
    pub speed: f32,

    /// Seed for particle layout and starting orbit angles
    #[arg(long)]
    pub seed: Option<u64>,

    /// Fraction of the full particle counts to generate (0.05 to 1.0)
    #[arg(long, default_value_t = 1.0)]
    pub density: f32,

    /// Camera interpolation used by the intro
    #[arg(long, value_enum, default_value_t = EasingArg::Linear)]
    pub easing: EasingArg,
}

impl Default for Config {
    fn default() -> Self {
        Config::parse_from(["cosmic_evolution"])
    }
}

impl Config {
    pub fn speed(&self) -> f32 {
        clamp_multiplier(self.speed)
    }

    pub fn density(&self) -> f32 {
        if self.density.is_finite() {
            self.density.clamp(0.05, 1.0)
        } else {
            1.0
        }
    }

    // Whether to open on the intro, given the persisted flag
    pub fn show_intro(&self, has_seen_intro: bool) -> bool {
        if self.skip_intro {
            false
        } else {
            self.replay_intro || !has_seen_intro
        }
    }

    // Make this the configuration returned by `Config::global`; only the
    // first call has an effect
    pub fn install(self) {
        let _ = CONFIG.set(self);
    }

    pub fn global() -> &'static Config {
        CONFIG.get_or_init(Config::default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.state_dir, PathBuf::from("."));
        assert_eq!(config.speed(), 1.0);
        assert_eq!(config.density(), 1.0);
        assert_eq!(config.easing, EasingArg::Linear);
        assert!(config.planets.is_none());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = Config::parse_from(["cosmic_evolution", "--speed", "9", "--density", "0"]);
        assert_eq!(config.speed(), 3.0);
        assert_eq!(config.density(), 0.05);
    }

    #[test]
    fn intro_visibility() {
        let config = Config::default();
        assert!(config.show_intro(false));
        assert!(!config.show_intro(true));

        let replay = Config::parse_from(["cosmic_evolution", "--replay-intro"]);
        assert!(replay.show_intro(true));

        let skip = Config::parse_from(["cosmic_evolution", "--skip-intro"]);
        assert!(!skip.show_intro(false));
    }

    #[test]
    fn replay_and_skip_conflict() {
        assert!(Config::try_parse_from(["cosmic_evolution", "--replay-intro", "--skip-intro"]).is_err());
    }

    #[test]
    fn easing_flag() {
        let config = Config::parse_from(["cosmic_evolution", "--easing", "smooth"]);
        assert_eq!(Easing::from(config.easing), Easing::Smooth);
    }
}
