/*
 * Planets Module
 *
 * Static planet facts shown by the info panel. The catalog is compiled in
 * from data/planets.json and can be replaced by a file given on the
 * command line. Loading is the only fallible step; lookups simply return
 * None for unknown ids, which the UI renders as "no panel".
 */

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use crate::color::parse_hex;

const BUNDLED_PLANETS: &str = include_str!("../data/planets.json");

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanetFact {
    pub id: String,
    pub name: String,
    pub mass_kg: f64,
    pub radius_km: f64,
    pub distance_au: f64,
    pub distance_km: f64,
    pub mean_temp_c: f64,
    pub composition: BTreeMap<String, f64>,
    pub atmosphere: String,
    pub moons: u32,
    pub orbital_period_days: f64,
    pub rotation_period_hours: f64,
    pub info: String,
    pub color: String,
}

impl PlanetFact {
    pub fn color_rgb(&self) -> Option<nannou::color::Rgb> {
        parse_hex(&self.color)
    }

    // Only Earth links to the geological and cinematic era panels
    pub fn has_era_panels(&self) -> bool {
        self.id == "earth"
    }
}

#[derive(Debug, Deserialize)]
struct PlanetFile {
    planets: Vec<PlanetFact>,
}

#[derive(Clone, Debug, Default)]
pub struct PlanetCatalog {
    planets: Vec<PlanetFact>,
}

impl PlanetCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_PLANETS).context("parse bundled planet data")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).with_context(|| format!("read planet data: {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parse planet data: {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let file: PlanetFile = serde_json::from_str(text)?;
        let mut seen = HashSet::new();
        for planet in &file.planets {
            if !seen.insert(planet.id.as_str()) {
                bail!("duplicate planet id '{}'", planet.id);
            }
        }
        Ok(Self { planets: file.planets })
    }

    pub fn planets(&self) -> &[PlanetFact] {
        &self.planets
    }

    pub fn len(&self) -> usize {
        self.planets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }

    pub fn lookup(&self, id: &str) -> Option<&PlanetFact> {
        self.planets.iter().find(|planet| planet.id == id)
    }
}

// Mass in exponential notation with two decimals, e.g. "5.97e24"
pub fn format_mass(kg: f64) -> String {
    format!("{:.2e}", kg)
}

// Distance in millions of kilometres with two decimals
pub fn format_million_km(km: f64) -> String {
    format!("{:.2}", km / 1_000_000.0)
}

// Rotation period as an absolute value; retrograde spin is stored negative
pub fn format_rotation_hours(hours: f64) -> String {
    format!("{:.1}", hours.abs())
}

// Number with thousands separators, keeping up to two decimals
pub fn format_grouped(value: f64) -> String {
    let negative = value < 0.0;
    let rounded = (value.abs() * 100.0).round() / 100.0;
    let whole = rounded.trunc() as u64;
    let fraction = ((rounded - rounded.trunc()) * 100.0).round() as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if fraction > 0 {
        let decimals = format!("{:02}", fraction);
        grouped.push('.');
        grouped.push_str(decimals.trim_end_matches('0'));
    }
    if negative {
        grouped.insert(0, '-');
    }
    grouped
}
