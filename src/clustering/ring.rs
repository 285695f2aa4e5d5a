//! # Phase-ring normalization
//!
//! Turns the rows of one orbital plane into a **ring**: a closed circular
//! ordering by in-plane phase, annotated with the angular gap separating each
//! satellite from its predecessor.
//!
//! ## Overview
//! -----------------
//! The ring is built in four steps:
//! 1. sort rows by raw phase ascending and compute forward gaps, closing the
//!    circle with the wraparound gap at index 0;
//! 2. locate the **seam**, the largest gap (first occurrence on ties) — the
//!    widest empty arc of the ring, which must never be cut through by a batch;
//! 3. rotate: every phase from the seam onward is counted one revolution
//!    earlier, then the whole sequence is shifted so its top sits at 0. The
//!    resulting *adjusted phases* run from 0 downward and are an ordering
//!    device only, the stored rows keep their `[0, 360)` values;
//! 4. sort by adjusted phase descending and recompute gaps. The seam gap lands
//!    at index 0, closing the ring against the last member.
//!
//! The defining invariant: gaps are non-negative and sum to 360° exactly (one
//! full turn), whatever the input. A single-row ring carries the whole circle
//! as its seam gap.

use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use smallvec::SmallVec;

use crate::angles::forward_gap;
use crate::constants::{Degree, RingMembers};
use crate::elements::{OrbitalRow, OrbitalTable};

/// One satellite on a ring.
///
/// `adjusted_phase` is 0 for the ring top and ≤ 0 for everyone else; `gap` is
/// the angular distance from the previous member in ring order, with the
/// member at index 0 carrying the closing seam gap.
#[derive(Debug, Clone, PartialEq)]
pub struct RingMember {
    pub row: OrbitalRow,
    pub adjusted_phase: Degree,
    pub gap: Degree,
}

/// A plane's rows in canonical circular order.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    pub members: RingMembers,
}

/// Index of the largest gap, first occurrence on ties.
fn seam_index(gaps: &[Degree]) -> usize {
    let mut seam = 0;
    for (i, gap) in gaps.iter().enumerate().skip(1) {
        if *gap > gaps[seam] {
            seam = i;
        }
    }
    seam
}

impl Ring {
    /// Normalize one plane into its canonical ring.
    ///
    /// Arguments
    /// ---------
    /// * `plane`: the plane's rows, consumed; order does not matter.
    ///
    /// Return
    /// ------
    /// * The ring in descending adjusted-phase order, seam gap at index 0.
    ///   An empty plane yields an empty ring.
    pub fn from_plane(plane: OrbitalTable) -> Self {
        if plane.is_empty() {
            return Ring {
                members: SmallVec::new(),
            };
        }

        let mut rows = plane;
        rows.sort_by_key(|row| OrderedFloat(row.phase));

        let last = rows.len() - 1;
        let raw_gaps: Vec<Degree> = (0..rows.len())
            .map(|i| {
                if i == 0 {
                    forward_gap(rows[last].phase, rows[0].phase)
                } else {
                    rows[i].phase - rows[i - 1].phase
                }
            })
            .collect();

        let seam = seam_index(&raw_gaps);

        // Phases from the seam onward are counted one revolution earlier, then
        // everything is shifted so the top of the ring sits at 0.
        let mut members: RingMembers = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                let rotated = if i >= seam { row.phase - 360.0 } else { row.phase };
                RingMember {
                    row,
                    adjusted_phase: rotated,
                    gap: 0.0,
                }
            })
            .collect();

        let top = members
            .iter()
            .map(|m| m.adjusted_phase)
            .fold(f64::NEG_INFINITY, f64::max);
        for member in members.iter_mut() {
            member.adjusted_phase -= top;
        }

        members.sort_by_key(|m| Reverse(OrderedFloat(m.adjusted_phase)));
        recompute_gaps(&mut members);

        Ring { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Gap value of every member, in ring order.
    pub fn gaps(&self) -> Vec<Degree> {
        self.members.iter().map(|m| m.gap).collect()
    }
}

/// Recompute gaps over a descending adjusted-phase sequence.
///
/// Interior gaps are plain differences to the predecessor; the member at index
/// 0 closes the ring against the last one, travelling in the direction of
/// decreasing phase, so coincident end members yield a full turn.
fn recompute_gaps(members: &mut RingMembers) {
    let first = members[0].adjusted_phase;
    let last = members[members.len() - 1].adjusted_phase;

    for i in 1..members.len() {
        members[i].gap = members[i - 1].adjusted_phase - members[i].adjusted_phase;
    }
    members[0].gap = forward_gap(first, last);
}
