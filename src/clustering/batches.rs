//! # Batch splitting and refinement
//!
//! Cuts a [`Ring`] into launch batches at statistically oversized phase gaps,
//! then refines the cut to a fixed point.
//!
//! ## Overview
//! -----------------
//! A batch boundary shows up as a gap much larger than its neighbours. One
//! split pass flags such gaps with the Tukey fence of [`gap_outliers`] and
//! opens a new batch **at** every flagged member, its oversized gap becoming
//! the new batch's index-0 gap. Because a batch's own statistics change once
//! it is taken in isolation, passes repeat over the flat list of current
//! batches until one full pass leaves the count unchanged. The count never
//! decreases and is bounded by the member total, so the loop always
//! terminates.
//!
//! Per-pass ignore sets: every batch ignores index 0 (its opening boundary or
//! the ring seam); the batch currently sitting last in sequence also ignores
//! its final gap, which inherits the ring's closing arc when the seam rides at
//! the far end (see [`ClusterParams::ignore_trailing_gap`]).

use std::fmt;

use crate::clustering::outlier::gap_outliers;
use crate::clustering::ring::Ring;
use crate::clustering::ClusterParams;
use crate::constants::{Degree, RingMembers, SatId};

/// A contiguous arc of a ring identified as one deployment cluster.
///
/// Members stay in ring order (adjusted phase descending) and keep the gap
/// they carried in the parent ring, so the member at index 0 holds the gap
/// that opened the batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub members: RingMembers,
}

impl Batch {
    pub fn new(members: RingMembers) -> Self {
        Batch { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Satellite identifiers in batch order.
    pub fn ids(&self) -> Vec<SatId> {
        self.members.iter().map(|m| m.row.id.clone()).collect()
    }

    fn gaps(&self) -> Vec<Degree> {
        self.members.iter().map(|m| m.gap).collect()
    }
}

/// Compact mode prints a one-line summary; alternate mode (`{:#}`) prints the
/// member table, one line per satellite. The phase column shows the ring's
/// adjusted phase, not the raw one.
impl fmt::Display for Batch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !f.alternate() {
            let opening = self.members.first().map_or(0.0, |m| m.gap);
            return write!(
                f,
                "Batch({} members, opening gap {:.2}°)",
                self.len(),
                opening
            );
        }

        writeln!(
            f,
            "{:>4}  {:>14} {:>8} {:>8} {:>9} {:>8} {:>9} {:>9}",
            "", "sat-id", "inc", "raan", "phase", "gap", "perigee", "apogee"
        )?;
        for (i, m) in self.members.iter().enumerate() {
            writeln!(
                f,
                "{:>4}  {:>14} {:>8.2} {:>8.2} {:>9.2} {:>8.2} {:>9.2} {:>9.2}",
                i,
                m.row.id,
                m.row.inclination,
                m.row.raan,
                m.adjusted_phase,
                m.gap,
                m.row.perigee_altitude,
                m.row.apogee_altitude
            )?;
        }
        Ok(())
    }
}

/// One split pass over a single batch.
///
/// Flagged members open new batches; with no flagged member the batch comes
/// back unchanged. Slices of the parent keep its ordering and gap values, so
/// no recomputation is needed.
fn split_once(batch: Batch, ignore: &[usize], scale: f64) -> Vec<Batch> {
    let outliers = gap_outliers(&batch.gaps(), ignore, scale);
    if outliers.is_empty() {
        return vec![batch];
    }

    let mut result = Vec::with_capacity(outliers.len() + 1);
    let mut start = 0;
    for boundary in outliers {
        result.push(Batch::new(batch.members[start..boundary].iter().cloned().collect()));
        start = boundary;
    }
    result.push(Batch::new(batch.members[start..].iter().cloned().collect()));
    result
}

/// Refine a batch list to its fixed point.
///
/// Each pass re-splits every batch of the worklist with the ignore policy
/// described in the module documentation. The pass count is bounded by the
/// total number of members; reapplying this function to its own output
/// returns it unchanged.
pub fn refine_batches(batches: Vec<Batch>, params: &ClusterParams) -> Vec<Batch> {
    let mut batches = batches;
    let mut count = 0;

    while batches.len() != count {
        count = batches.len();

        let mut next = Vec::with_capacity(count);
        for (i, batch) in batches.into_iter().enumerate() {
            let mut ignore = vec![0];
            if i == count - 1 && params.ignore_trailing_gap && batch.len() > 1 {
                ignore.push(batch.len() - 1);
            }
            next.extend(split_once(batch, &ignore, params.iqr_scale));
        }
        batches = next;
    }
    batches
}

/// Decompose a ring into its refined launch batches.
///
/// Arguments
/// ---------
/// * `ring`: the canonical ring of one plane, consumed.
/// * `params`: clustering parameters (fence scale and edge-gap policy).
///
/// Return
/// ------
/// * The batches in ring order. Their concatenation reconstructs the ring
///   exactly; an empty ring yields no batch and a single-member ring exactly
///   one.
pub fn split_ring(ring: Ring, params: &ClusterParams) -> Vec<Batch> {
    if ring.is_empty() {
        return Vec::new();
    }
    refine_batches(vec![Batch::new(ring.members)], params)
}

#[cfg(test)]
mod batches_test {
    use super::*;
    use crate::elements::OrbitalRow;

    fn ring_from_phases(phases: &[Degree]) -> Ring {
        let plane = phases
            .iter()
            .enumerate()
            .map(|(i, phase)| OrbitalRow {
                id: format!("s{i}"),
                inclination: 53.0,
                raan: 100.0,
                phase: *phase,
                perigee_altitude: 550.0,
                apogee_altitude: 550.0,
            })
            .collect();
        Ring::from_plane(plane)
    }

    fn phases_of(batch: &Batch) -> Vec<Degree> {
        batch.members.iter().map(|m| m.row.phase).collect()
    }

    #[test]
    fn test_uniform_ring_is_one_batch() {
        let ring = ring_from_phases(&[0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0]);
        let batches = split_ring(ring, &ClusterParams::default());

        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 8);
    }

    #[test]
    fn test_two_clusters_split() {
        let ring = ring_from_phases(&[0.0, 1.0, 2.0, 3.0, 180.0, 181.0, 182.0, 183.0]);
        let batches = split_ring(ring, &ClusterParams::default());

        assert_eq!(batches.len(), 2);
        assert_eq!(phases_of(&batches[0]), vec![183.0, 182.0, 181.0, 180.0]);
        assert_eq!(phases_of(&batches[1]), vec![3.0, 2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_refinement_needs_second_pass() {
        // The 200° straggler survives the first pass (the 15° gap hides below
        // the full-ring fence) and is only isolated once its cluster's own
        // statistics apply.
        let ring = ring_from_phases(&[
            0.0, 1.0, 2.0, 3.0, 120.0, 121.0, 122.0, 200.0, 215.0, 216.0, 217.0, 218.0,
        ]);
        let batches = split_ring(ring, &ClusterParams::default());

        assert_eq!(batches.len(), 4);
        assert_eq!(phases_of(&batches[0]), vec![218.0, 217.0, 216.0, 215.0]);
        assert_eq!(phases_of(&batches[1]), vec![200.0]);
        assert_eq!(phases_of(&batches[2]), vec![122.0, 121.0, 120.0]);
        assert_eq!(phases_of(&batches[3]), vec![3.0, 2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_refinement_is_idempotent() {
        let ring = ring_from_phases(&[
            0.0, 1.0, 2.0, 3.0, 120.0, 121.0, 122.0, 200.0, 215.0, 216.0, 217.0, 218.0,
        ]);
        let params = ClusterParams::default();

        let batches = split_ring(ring, &params);
        let again = refine_batches(batches.clone(), &params);
        assert_eq!(again, batches);
    }

    #[test]
    fn test_batches_partition_the_ring() {
        let ring = ring_from_phases(&[
            0.0, 1.0, 2.0, 3.0, 120.0, 121.0, 122.0, 200.0, 215.0, 216.0, 217.0, 218.0,
        ]);
        let ring_order: Vec<Degree> = ring.members.iter().map(|m| m.row.phase).collect();
        let batches = split_ring(ring, &ClusterParams::default());

        // Concatenating the batches reconstructs the ring exactly.
        let flattened: Vec<Degree> = batches.iter().flat_map(phases_of).collect();
        assert_eq!(flattened, ring_order);
    }

    #[test]
    fn test_trailing_gap_policy() {
        // The 50° gap before the trailing member reads as the ring's closing
        // arc: shielded under the default policy, a boundary once the shield
        // is off.
        let ring = ring_from_phases(&[0.0, 50.0, 51.0, 52.0, 53.0]);
        assert_eq!(split_ring(ring.clone(), &ClusterParams::default()).len(), 1);

        let unshielded = ClusterParams::builder()
            .ignore_trailing_gap(false)
            .build()
            .unwrap();
        let batches = split_ring(ring, &unshielded);
        assert_eq!(batches.len(), 2);
        assert_eq!(phases_of(&batches[1]), vec![0.0]);
    }

    #[test]
    fn test_single_member_ring() {
        let batches = split_ring(ring_from_phases(&[42.0]), &ClusterParams::default());

        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 1);
        assert_eq!(batches[0].members[0].gap, 360.0);
    }

    #[test]
    fn test_empty_ring() {
        assert!(split_ring(ring_from_phases(&[]), &ClusterParams::default()).is_empty());
    }
}
