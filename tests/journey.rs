// End-to-end checks that run the scenes headless, the way the app drives
// them frame by frame.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::tempdir;

use cosmic_evolution::camera::Easing;
use cosmic_evolution::intro::IntroScene;
use cosmic_evolution::orbit::step_angle;
use cosmic_evolution::phase::AnimationPhase;
use cosmic_evolution::solar::SolarScene;
use cosmic_evolution::{Config, IntroFlagStore, PlanetCatalog};

#[test]
fn intro_runs_through_every_phase_in_order() {
    let mut intro = IntroScene::new(&mut StdRng::seed_from_u64(42), 0.05, Easing::Smooth);
    let mut seen = vec![intro.phase()];
    let mut completions = 0;

    // 30 Hz for 16 seconds
    for _ in 0..480 {
        let tick = intro.update(1.0 / 30.0);
        if let Some(phase) = tick.entered {
            assert!(phase > *seen.last().unwrap());
            seen.push(phase);
        }
        if tick.completed {
            completions += 1;
        }
        for burst in &intro.explosions {
            assert!(burst.particles.iter().all(|p| (0.0..=1.0).contains(&p.opacity)));
        }
        assert!((0.0..=1.0).contains(&intro.stars.opacity));
        assert!(intro.galaxies.iter().all(|g| (0.0..=1.0).contains(&g.opacity)));
    }

    assert_eq!(seen, AnimationPhase::ALL.to_vec());
    assert_eq!(completions, 1);
}

#[test]
fn first_run_shows_intro_and_later_runs_do_not() {
    let dir = tempdir().unwrap();
    let store = IntroFlagStore::new(dir.path());
    let config = Config::default();

    assert!(config.show_intro(store.has_seen_intro()));

    let mut intro = IntroScene::new(&mut StdRng::seed_from_u64(1), 0.05, Easing::Linear);
    while !intro.update(0.25).completed {}
    drop(intro);
    store.mark_seen().unwrap();
    store.mark_seen().unwrap();

    let reopened = IntroFlagStore::new(dir.path());
    assert!(!config.show_intro(reopened.has_seen_intro()));
}

#[test]
fn every_orbiting_planet_has_facts() {
    let catalog = PlanetCatalog::bundled().unwrap();
    let scene = SolarScene::new(&mut StdRng::seed_from_u64(5), 10);
    for body in &scene.orbits.bodies {
        let planet = catalog.lookup(&body.id).unwrap();
        assert_eq!(planet.id, body.id);
    }
    assert_eq!(catalog.planets().iter().filter(|p| p.id == "earth").count(), 1);
}

#[test]
fn solar_scene_orbits_follow_the_stepper() {
    let mut scene = SolarScene::new(&mut StdRng::seed_from_u64(6), 10);
    scene.orbits.set_speed_multiplier(1.5);
    let start: Vec<f64> = scene.orbits.bodies.iter().map(|b| b.angle).collect();

    for _ in 0..120 {
        scene.update(1.0);
    }

    for (body, initial) in scene.orbits.bodies.iter().zip(start) {
        let mut expected = initial;
        for _ in 0..120 {
            expected = step_angle(expected, body.angular_speed, 1.5);
        }
        assert!((body.angle - expected).abs() < 1e-9);
    }
}
