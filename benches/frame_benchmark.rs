/*
 * Frame Benchmark
 *
 * Measures the per-frame work of each scene without a window: explosion
 * and galaxy particle updates, a full intro tick and the orbit stepper.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use cosmic_evolution::camera::Easing;
use cosmic_evolution::intro::IntroScene;
use cosmic_evolution::orbit::OrbitSimulator;
use cosmic_evolution::particles::{explosion_burst, form_galaxy, spiral_galaxy, update_explosion};

fn bench_explosion(c: &mut Criterion) {
    let mut group = c.benchmark_group("explosion_update");

    for count in [100, 500, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &n| {
            let mut burst = explosion_burst(&mut StdRng::seed_from_u64(1), n);
            b.iter(|| update_explosion(black_box(&mut burst), 1.0, 1.0));
        });
    }

    group.finish();
}

fn bench_galaxy(c: &mut Criterion) {
    c.bench_function("galaxy_form", |b| {
        let mut galaxy = spiral_galaxy(&mut StdRng::seed_from_u64(2), 1, 2000);
        b.iter(|| form_galaxy(black_box(&mut galaxy), 1, 1.0));
    });
}

fn bench_intro_tick(c: &mut Criterion) {
    c.bench_function("intro_tick", |b| {
        let mut intro = IntroScene::new(&mut StdRng::seed_from_u64(3), 1.0, Easing::Linear);
        b.iter(|| black_box(intro.update(1.0 / 60.0)));
    });
}

fn bench_orbits(c: &mut Criterion) {
    c.bench_function("orbit_step", |b| {
        let mut orbits = OrbitSimulator::solar_system(&mut StdRng::seed_from_u64(4));
        b.iter(|| black_box(&mut orbits).step());
    });
}

criterion_group!(benches, bench_explosion, bench_galaxy, bench_intro_tick, bench_orbits);
criterion_main!(benches);
