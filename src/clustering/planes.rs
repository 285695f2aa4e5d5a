//! # Orbital plane partitioning
//!
//! Groups an [`OrbitalTable`] into orbital planes, satellites sharing a
//! near-identical right ascension of the ascending node.
//!
//! ## Overview
//! -----------------
//! Plane membership is decided on the **spread** of a candidate window rather
//! than on consecutive gaps: rows are sorted by RAAN and a prefix window grows
//! as long as the population standard deviation of its RAAN values stays below
//! a threshold. The moment one more row would push the spread to the threshold
//! or beyond, the plane closes and a new window opens at that row. A window of
//! a single row has zero spread, so every row lands in exactly one plane and
//! the sweep terminates after N steps.
//!
//! A second, coarser grouping by **inclination shell** is also provided for
//! constellations flying several shells at distinct inclinations.

use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::constants::{Degree, SHELL_EPSILON};
use crate::elements::{OrbitalRow, OrbitalTable};

/// Population standard deviation (ddof = 0) of a value slice.
fn population_std(values: &[Degree]) -> Degree {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// Partition a table into orbital planes by RAAN proximity.
///
/// Rows are sorted by RAAN ascending, then consumed front to back: a plane is
/// the longest prefix of the remaining rows whose RAAN population standard
/// deviation stays strictly below `limit`. Rows with a `NaN` RAAN fail every
/// spread test and end up isolated in single-row planes.
///
/// Arguments
/// ---------
/// * `table`: the rows to partition, consumed.
/// * `limit`: spread threshold in degrees (strict upper bound).
///
/// Return
/// ------
/// * The planes in RAAN-ascending discovery order. Their concatenation holds
///   every input row exactly once.
///
/// See also
/// --------
/// * [`crate::clustering::ring::Ring::from_plane`] – Next stage of the pipeline.
pub fn split_by_raan(table: OrbitalTable, limit: Degree) -> Vec<OrbitalTable> {
    let sorted: Vec<OrbitalRow> = table
        .into_iter()
        .sorted_by_key(|row| OrderedFloat(row.raan))
        .collect();

    let mut planes = Vec::new();
    let mut remaining = sorted.as_slice();
    while !remaining.is_empty() {
        let raans: Vec<Degree> = remaining.iter().map(|row| row.raan).collect();

        let mut len = 1;
        while len < remaining.len() && population_std(&raans[..len + 1]) < limit {
            len += 1;
        }

        planes.push(remaining[..len].to_vec());
        remaining = &remaining[len..];
    }
    planes
}

/// Group a table by inclination shell.
///
/// Each delimiter `d` claims the rows whose inclination falls in the half-open
/// interval `[d - SHELL_EPSILON, d + SHELL_EPSILON)`, in delimiter order; a row
/// claimed by one shell is not offered to the next. Rows matching no shell are
/// returned separately.
///
/// Arguments
/// ---------
/// * `table`: the rows to group, consumed.
/// * `delimiters`: shell center inclinations in degrees (e.g.
///   [`crate::constants::STARLINK_SHELLS`]).
///
/// Return
/// ------
/// * One group per delimiter (possibly empty), plus the leftover rows.
pub fn inclination_shells(
    table: OrbitalTable,
    delimiters: &[Degree],
) -> (Vec<OrbitalTable>, OrbitalTable) {
    let mut leftovers = table;
    let mut shells = Vec::with_capacity(delimiters.len());

    for delimiter in delimiters {
        let (claimed, rest): (OrbitalTable, OrbitalTable) = leftovers
            .into_iter()
            .partition(|row: &OrbitalRow| {
                row.inclination >= delimiter - SHELL_EPSILON
                    && row.inclination < delimiter + SHELL_EPSILON
            });
        shells.push(claimed);
        leftovers = rest;
    }

    (shells, leftovers)
}
