use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sattrain::clustering::{launch_groups, ClusterParams};
use sattrain::elements::{OrbitalRow, OrbitalTable};

/// Build a jittered walker-like constellation: `planes` orbital planes,
/// each carrying `clusters` phase clusters of `per_cluster` satellites.
fn synthetic_constellation(
    rng: &mut StdRng,
    planes: usize,
    clusters: usize,
    per_cluster: usize,
) -> OrbitalTable {
    let mut table = Vec::with_capacity(planes * clusters * per_cluster);
    for p in 0..planes {
        // Half-offset keeps every jittered plane clear of the 0°/360° seam
        let raan = (p as f64 + 0.5) * 360.0 / planes as f64;
        for c in 0..clusters {
            let center = (c as f64) * 360.0 / clusters as f64;
            for k in 0..per_cluster {
                table.push(OrbitalRow {
                    id: format!("P{p}-C{c}-{k}"),
                    inclination: 53.0,
                    raan: raan + rng.random_range(-0.3..0.3),
                    phase: (center + rng.random_range(-1.0..1.0)).rem_euclid(360.0),
                    perigee_altitude: 547.3,
                    apogee_altitude: 552.8,
                });
            }
        }
    }
    table
}

fn bench_small_constellation(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xDEADBEEF);
    let params = ClusterParams::default();
    let table = synthetic_constellation(&mut rng, 3, 4, 5);

    c.bench_function("launch_groups/3_planes_60_sats", |b| {
        b.iter_batched(
            || table.clone(),
            |input| black_box(launch_groups(input, &params)),
            BatchSize::LargeInput,
        )
    });
}

fn bench_large_constellation(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xBADF00D);
    let params = ClusterParams::default();
    let table = synthetic_constellation(&mut rng, 12, 5, 10);

    c.bench_function("launch_groups/12_planes_600_sats", |b| {
        b.iter_batched(
            || table.clone(),
            |input| black_box(launch_groups(input, &params)),
            BatchSize::LargeInput,
        )
    });
}

/// Degenerate case where every satellite lands in one plane, so the whole
/// cost sits in ring normalization and gap refinement.
fn bench_single_plane(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xFEEDFACE);
    let params = ClusterParams::default();
    let table = synthetic_constellation(&mut rng, 1, 8, 25);

    c.bench_function("launch_groups/1_plane_200_sats", |b| {
        b.iter_batched(
            || table.clone(),
            |input| black_box(launch_groups(input, &params)),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_small_constellation, bench_large_constellation, bench_single_plane
);
criterion_main!(benches);
