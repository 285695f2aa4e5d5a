use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sattrain::propagation::solve_kepler_equation;

/// Uniform random in [0, 2π)
#[inline]
fn rand_angle(rng: &mut StdRng) -> f64 {
    rng.random::<f64>() * std::f64::consts::TAU
}

/// Typical elliptic regime: e ∈ [0.0, 0.7]
fn bench_typical(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xDEADBEEF);
    let samples = 10_000usize;

    c.bench_function("solve_kepler_equation/typical_e<=0.7", |b| {
        b.iter_batched(
            || {
                // Pre-generate inputs to avoid RNG cost in the timed section
                (0..samples)
                    .map(|_| (rand_angle(&mut rng), rng.random_range(0.0..=0.7)))
                    .collect::<Vec<_>>()
            },
            |cases| {
                for (mean_anomaly, eccentricity) in cases {
                    let e = solve_kepler_equation(black_box(mean_anomaly), black_box(eccentricity))
                        .unwrap();
                    black_box(e);
                }
            },
            BatchSize::LargeInput,
        )
    });
}

/// Near-circular regime of LEO constellations: e ≈ 1e-4
fn bench_near_circular(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xFEEDFACE);
    let samples = 10_000usize;
    let e = 1e-4;

    c.bench_function("solve_kepler_equation/near_circular_e=1e-4", |b| {
        b.iter_batched(
            || {
                (0..samples)
                    .map(|_| rand_angle(&mut rng))
                    .collect::<Vec<_>>()
            },
            |cases| {
                for mean_anomaly in cases {
                    let ecc_anomaly =
                        solve_kepler_equation(black_box(mean_anomaly), black_box(e)).unwrap();
                    black_box(ecc_anomaly);
                }
            },
            BatchSize::LargeInput,
        )
    });
}

/// Fixed high-eccentricity case, useful for stability profiling.
fn bench_fixed_stress(c: &mut Criterion) {
    let mean_anomaly = 5.930_860_541_086_263_f64;
    let eccentricity = 0.75_f64;

    c.bench_function("solve_kepler_equation/fixed_stress_case", |b| {
        b.iter(|| {
            let e = solve_kepler_equation(black_box(mean_anomaly), black_box(eccentricity));
            black_box(e.ok());
        })
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_typical, bench_near_circular, bench_fixed_stress
);
criterion_main!(benches);
