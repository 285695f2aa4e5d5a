//! # Phase-gap outlier detection
//!
//! Tukey-fence detection of oversized gaps between consecutive satellites on a
//! ring. An oversized gap is the signature of a boundary between two launch
//! batches drifting at slightly different rates.
//!
//! ## Overview
//! -----------------
//! The fence is the classical upper Tukey bound `Q3 + scale·IQR`, with quartiles
//! taken by the **nearest-rank** method. Nearest-rank keeps the fence on an
//! actually observed gap value, which behaves well on the very small samples
//! produced by a single launch (a handful of gaps, sometimes two or three).
//!
//! Gaps listed in the ignore set take no part in the fence and are never
//! reported: they sit on ring seams or batch edges where a large value is
//! structural, not a boundary signal.

use ordered_float::OrderedFloat;

use crate::constants::Degree;

/// Nearest-rank index of quantile `q` on a sorted slice of length `n`.
#[inline]
fn q_index(n: usize, q: f64) -> usize {
    // Nearest-rank on [0, n-1] using linear index; robust for small n.
    let pos = q * (n as f64 - 1.0);
    let idx = pos.round() as isize;
    idx.clamp(0, (n as isize) - 1) as usize
}

/// Quantile `q` of an already sorted slice using the nearest-rank method.
///
/// Returns `None` on an empty slice.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    Some(sorted[q_index(sorted.len(), q)])
}

/// Indices of the gaps lying strictly above the Tukey fence `Q3 + scale·IQR`.
///
/// The fence is computed over the gaps **not** listed in `ignore`. Ignored
/// indices are never reported, whatever their value. The comparison is strict,
/// so a gap sitting exactly on the fence is kept. `NaN` gaps never compare
/// greater and are therefore never flagged.
///
/// Arguments
/// ---------
/// * `gaps`: gap value per ring position, degrees.
/// * `ignore`: indices excluded from both the fence population and the report.
/// * `scale`: IQR multiplier of the fence.
///
/// Return
/// ------
/// * Indices of outlier gaps in increasing order. Empty when the non-ignored
///   population is empty or no gap clears the fence.
pub fn gap_outliers(gaps: &[Degree], ignore: &[usize], scale: f64) -> Vec<usize> {
    let mut population: Vec<f64> = gaps
        .iter()
        .enumerate()
        .filter(|(i, _)| !ignore.contains(i))
        .map(|(_, g)| *g)
        .collect();

    population.sort_unstable_by_key(|g| OrderedFloat(*g));

    let (Some(q1), Some(q3)) = (quantile(&population, 0.25), quantile(&population, 0.75)) else {
        return Vec::new();
    };
    let fence = q3 + scale * (q3 - q1);

    gaps.iter()
        .enumerate()
        .filter(|(i, g)| !ignore.contains(i) && **g > fence)
        .map(|(i, _)| i)
        .collect()
}
