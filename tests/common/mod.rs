use rand::rngs::StdRng;
use rand::Rng;

use sattrain::angles::normalize_degrees;
use sattrain::elements::{OrbitalRow, OrbitalTable};

pub fn synthetic_row(id: String, raan: f64, phase: f64) -> OrbitalRow {
    OrbitalRow {
        id,
        inclination: 53.0,
        raan: normalize_degrees(raan),
        phase: normalize_degrees(phase),
        perigee_altitude: 547.3,
        apogee_altitude: 552.8,
    }
}

/// Build a constellation of well-separated planes, each holding tight
/// deployment clusters with randomized in-cluster spread.
///
/// `planes` pairs a RAAN center with the phase centers of its clusters; every
/// cluster receives `per_cluster` rows jittered by ±0.3° in RAAN and ±1.0° in
/// phase. Plane centers must stay tens of degrees apart for the partition to
/// be unambiguous.
pub fn jittered_constellation(
    rng: &mut StdRng,
    planes: &[(f64, &[f64])],
    per_cluster: usize,
) -> OrbitalTable {
    let mut table = Vec::new();
    for (p, (raan_center, clusters)) in planes.iter().enumerate() {
        for (c, phase_center) in clusters.iter().enumerate() {
            for k in 0..per_cluster {
                table.push(synthetic_row(
                    format!("P{p}-C{c}-{k}"),
                    raan_center + rng.random_range(-0.3..0.3),
                    phase_center + rng.random_range(-1.0..1.0),
                ));
            }
        }
    }
    table
}

pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
