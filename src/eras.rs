/*
 * Eras Module
 *
 * Static descriptions of Earth's four geological eras, used by the
 * geological eras panel and the cinematic tour, plus the tour's playback
 * state (current era, auto-advance timer).
 */

pub struct LifeForm {
    pub icon: &'static str,
    pub name: &'static str,
}

pub struct Era {
    pub name: &'static str,
    pub period: &'static str,
    pub duration: &'static str,
    pub characteristics: &'static str,
    pub color: &'static str,
    // Cinematic tour details
    pub headline: &'static str,
    pub climate: &'static str,
    pub transition: &'static str,
    pub key_events: &'static [&'static str],
    pub life_forms: &'static [LifeForm],
}

pub static ERAS: [Era; 4] = [
    Era {
        name: "Precambrian",
        period: "4.6 billion to 541 million years ago",
        duration: "~4 billion years",
        characteristics: "Formation of the Earth, the first single-celled organisms, the early oceans and atmosphere",
        color: "#F48C06",
        headline: "Formation of the Earth and the first life",
        climate: "Oxygen-free atmosphere, hot and acidic oceans",
        transition: "Rising oxygen levels set the stage for the Cambrian explosion",
        key_events: &[
            "Earth forms from cosmic dust",
            "The first oceans appear",
            "The first bacteria emerge",
            "Cyanobacteria start producing oxygen",
            "Eukaryotic cells appear",
            "Early multicellular organisms",
        ],
        life_forms: &[
            LifeForm { icon: "🦠", name: "Early bacteria" },
            LifeForm { icon: "🌿", name: "Cyanobacteria" },
            LifeForm { icon: "🔬", name: "Single-celled organisms" },
            LifeForm { icon: "🧬", name: "Soft-bodied organisms" },
        ],
    },
    Era {
        name: "Paleozoic",
        period: "541 to 252 million years ago",
        duration: "~289 million years",
        characteristics: "Cambrian explosion, the first fish, plants and insects, early forests, the first reptiles",
        color: "#0077B6",
        headline: "Life bursts out in the seas and onto land",
        climate: "Warm and humid, with dense forests",
        transition: "The Permian extinction, the largest in Earth's history",
        key_events: &[
            "Cambrian explosion of animal diversity",
            "The first fish appear",
            "Plants move onto land",
            "Giant insects appear",
            "Vast coal forests",
            "The first reptiles walk on land",
            "Permian extinction wipes out 96% of species",
        ],
        life_forms: &[
            LifeForm { icon: "🦐", name: "Trilobites" },
            LifeForm { icon: "🐟", name: "Armored fish" },
            LifeForm { icon: "🌿", name: "Giant ferns" },
            LifeForm { icon: "🦗", name: "Giant insects" },
            LifeForm { icon: "🦎", name: "Amphibians and reptiles" },
        ],
    },
    Era {
        name: "Mesozoic",
        period: "252 to 66 million years ago",
        duration: "~186 million years",
        characteristics: "The age of dinosaurs, the first birds and mammals, flowering plants, a mass extinction",
        color: "#06A77D",
        headline: "The age of dinosaurs",
        climate: "Warm and dry, without polar ice caps",
        transition: "A giant asteroid impact ended the dinosaurs",
        key_events: &[
            "Dinosaurs dominate",
            "Flowering plants appear",
            "Pollinating insects",
            "Marine and flying reptiles",
            "Small mammals appear",
            "The first true birds",
            "Asteroid impact and the end of the dinosaurs",
        ],
        life_forms: &[
            LifeForm { icon: "🦕", name: "Herbivorous dinosaurs" },
            LifeForm { icon: "🦖", name: "Carnivorous dinosaurs" },
            LifeForm { icon: "🦅", name: "Pterosaurs" },
            LifeForm { icon: "🐊", name: "Giant crocodiles" },
            LifeForm { icon: "🐭", name: "Small mammals" },
        ],
    },
    Era {
        name: "Cenozoic",
        period: "66 million years ago to today",
        duration: "~66 million years",
        characteristics: "The age of mammals, the rise of humans, modern mountain ranges, ice ages",
        color: "#7209B7",
        headline: "The age of mammals and the rise of humans",
        climate: "Gradual cooling and recurring ice ages",
        transition: "Humans emerge and begin reshaping the environment",
        key_events: &[
            "Mammals grow large",
            "Forests and grasslands spread",
            "The Alps and Himalayas rise",
            "Ice ages",
            "The first hominids",
            "Homo sapiens appears",
            "Human civilizations develop",
        ],
        life_forms: &[
            LifeForm { icon: "🦣", name: "Mammoths" },
            LifeForm { icon: "🦏", name: "Large mammals" },
            LifeForm { icon: "🐴", name: "Early horses" },
            LifeForm { icon: "🐋", name: "Whales" },
            LifeForm { icon: "🦍", name: "Primates and humans" },
        ],
    },
];

// Seconds each era stays on screen while the tour plays
pub const TOUR_INTERVAL: f32 = 8.0;

pub struct CinematicTour {
    current: usize,
    pub playing: bool,
    since_advance: f32,
}

impl Default for CinematicTour {
    fn default() -> Self {
        Self::new()
    }
}

impl CinematicTour {
    pub fn new() -> Self {
        Self {
            current: 0,
            playing: true,
            since_advance: 0.0,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn era(&self) -> &'static Era {
        &ERAS[self.current]
    }

    pub fn next(&mut self) {
        self.select((self.current + 1) % ERAS.len());
    }

    pub fn previous(&mut self) {
        self.select((self.current + ERAS.len() - 1) % ERAS.len());
    }

    // Jump to an era; out-of-range indices are ignored. The auto-play
    // timer keeps running, only toggling play restarts it.
    pub fn select(&mut self, index: usize) {
        if index < ERAS.len() {
            self.current = index;
        }
    }

    pub fn toggle_playing(&mut self) {
        self.playing = !self.playing;
        self.since_advance = 0.0;
    }

    // Advance the auto-play timer; returns true when the era changed
    pub fn update(&mut self, dt: f32) -> bool {
        if !self.playing || !dt.is_finite() || dt <= 0.0 {
            return false;
        }
        self.since_advance += dt;
        if self.since_advance >= TOUR_INTERVAL {
            self.current = (self.current + 1) % ERAS.len();
            self.since_advance = 0.0;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::parse_hex;

    #[test]
    fn every_era_is_complete() {
        for era in &ERAS {
            assert!(parse_hex(era.color).is_some());
            assert!(!era.key_events.is_empty());
            assert!(!era.life_forms.is_empty());
        }
        assert_eq!(ERAS[0].name, "Precambrian");
        assert_eq!(ERAS[3].name, "Cenozoic");
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let mut tour = CinematicTour::new();
        tour.previous();
        assert_eq!(tour.current(), 3);
        tour.next();
        assert_eq!(tour.current(), 0);
        tour.select(2);
        assert_eq!(tour.current(), 2);
        tour.select(9);
        assert_eq!(tour.current(), 2);
    }

    #[test]
    fn auto_advance_every_interval() {
        let mut tour = CinematicTour::new();
        let mut changes = 0;
        for _ in 0..(60 * 33) {
            if tour.update(1.0 / 60.0) {
                changes += 1;
            }
        }
        assert_eq!(changes, 4);
        assert_eq!(tour.current(), 0);
    }

    #[test]
    fn manual_navigation_keeps_the_timer_running() {
        let mut tour = CinematicTour::new();
        assert!(!tour.update(5.0));
        tour.next();
        assert_eq!(tour.current(), 1);
        assert!(tour.update(3.1));
        assert_eq!(tour.current(), 2);
    }

    #[test]
    fn toggling_play_restarts_the_timer() {
        let mut tour = CinematicTour::new();
        assert!(!tour.update(5.0));
        tour.toggle_playing();
        tour.toggle_playing();
        assert!(!tour.update(7.0));
        assert!(tour.update(1.5));
    }

    #[test]
    fn paused_tour_stays_put() {
        let mut tour = CinematicTour::new();
        tour.toggle_playing();
        assert!(!tour.update(100.0));
        assert_eq!(tour.current(), 0);
    }
}
