// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Steiner PSO Swarm Benchmarks
// ─────────────────────────────────────────────────────────────────────
//! Criterion benchmarks for the particle and swarm hot paths, on a cheap
//! analytic fitness so only PSO overhead is measured.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use steiner_swarm::{Particle, Swarm};
use steiner_types::PsoParams;

fn sphere(p: &[f64]) -> f64 {
    p.iter().map(|x| x * x).sum()
}

// ── Particle ────────────────────────────────────────────────────────

fn bench_particle_step(c: &mut Criterion) {
    let params = PsoParams::default();
    let mut p = Particle::new(&[1.0, 1.0], &sphere, &params, StdRng::seed_from_u64(1));
    let lower = [-10.0, -10.0];
    let upper = [10.0, 10.0];
    c.bench_function("particle_step_2d", |b| {
        b.iter(|| p.step(&sphere, &params, &lower, &upper, black_box(&[0.0, 0.0])))
    });
}

// ── Swarm.optimize() ────────────────────────────────────────────────

fn bench_swarm_optimize(c: &mut Criterion) {
    let lower = [-10.0, -10.0];
    let upper = [10.0, 10.0];
    c.bench_function("swarm_optimize_15x30", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(7);
            let mut swarm =
                Swarm::new(15, &[3.0, 3.0], &sphere, PsoParams::default(), &mut rng).unwrap();
            swarm.optimize(&lower, &upper, black_box(30))
        })
    });
}

fn bench_swarm_optimize_parallel(c: &mut Criterion) {
    let lower = [-10.0, -10.0];
    let upper = [10.0, 10.0];
    c.bench_function("swarm_optimize_64x30_parallel", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(7);
            let mut swarm = Swarm::new(64, &[3.0, 3.0], &sphere, PsoParams::default(), &mut rng)
                .unwrap()
                .with_parallel(true);
            swarm.optimize(&lower, &upper, black_box(30))
        })
    });
}

criterion_group!(
    benches,
    bench_particle_step,
    bench_swarm_optimize,
    bench_swarm_optimize_parallel,
);
criterion_main!(benches);
