//! # Launch-batch clustering
//!
//! This module defines the [`ClusterParams`] configuration struct and the
//! [`launch_groups`] orchestrator that decomposes a satellite table into
//! orbital planes and deployment batches.
//!
//! ## Purpose
//!
//! Satellites launched together stay recognizable long after deployment: they
//! share an orbital plane and travel as tight packs along it, separated from
//! neighbouring packs by conspicuously large phase gaps. The pipeline exploits
//! exactly that signature:
//!
//! 1. **Plane partitioning** – rows are grouped by RAAN spread
//!    ([`planes::split_by_raan`]).
//! 2. **Ring normalization** – each plane is ordered by phase into a closed
//!    ring with per-member gaps ([`ring::Ring::from_plane`]).
//! 3. **Batch splitting** – oversized gaps, flagged by an IQR fence, cut the
//!    ring; the cut repeats per batch until stable
//!    ([`batches::split_ring`]).
//!
//! The result is a nested planes → batches → rows structure, ready for
//! reporting or for feeding a visibility-pass predictor batch by batch.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sattrain::clustering::{launch_groups, ClusterParams};
//! use sattrain::elements::OrbitalTable;
//!
//! let params = ClusterParams::builder()
//!     .raan_std_limit(1.25)
//!     .iqr_scale(1.0)
//!     .build()
//!     .unwrap();
//!
//! # let table: OrbitalTable = Vec::new();
//! let groups = launch_groups(table, &params);
//! println!("{groups}");
//! ```
//!
//! ## See also
//!
//! * [`crate::sattrain::Sattrain`] – Façade wiring TLE ingestion and
//!   propagation into this pipeline.

use std::cmp::Ordering::{Equal, Greater};
use std::fmt;

use crate::elements::{OrbitalRow, OrbitalTable};
use crate::sattrain_errors::SattrainError;

pub mod batches;
pub mod outlier;
pub mod planes;
pub mod ring;

use batches::{split_ring, Batch};
use ring::Ring;

/// Configuration parameters controlling the behavior of [`launch_groups`].
///
/// Fields
/// -----------------
/// * `raan_std_limit` – strict upper bound on the RAAN population standard
///   deviation of one plane, degrees. Rows sort into a plane as long as the
///   spread stays below this value.
/// * `iqr_scale` – multiplier of the interquartile range in the gap outlier
///   fence `Q3 + iqr_scale·IQR`. The default of 1.0 is deliberately tighter
///   than the classical Tukey 1.5: deployment packs are compact and a soft
///   fence misses real boundaries.
/// * `ignore_trailing_gap` – whether the batch sitting last in sequence also
///   excludes its final gap from the fence statistics. The trailing gap can
///   inherit the ring's closing arc, which is structural rather than a
///   boundary signal; disabling this reproduces the behavior of splitting on
///   it anyway.
///
/// Defaults
/// -----------------
/// * `raan_std_limit`: 1.25°
/// * `iqr_scale`: 1.0
/// * `ignore_trailing_gap`: true
///
/// Notes & Validation
/// -----------------
/// * `raan_std_limit > 0`, `iqr_scale ≥ 0`; `NaN` is rejected by both checks.
///
/// See also
/// -----------------
/// * [`launch_groups`] – Consumes these parameters.
/// * [`outlier::gap_outliers`] – The fence the `iqr_scale` feeds.
#[derive(Debug, Clone)]
pub struct ClusterParams {
    pub raan_std_limit: f64,
    pub iqr_scale: f64,
    pub ignore_trailing_gap: bool,
}

impl ClusterParams {
    /// Construct a new [`ClusterParams`] with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`ClusterParamsBuilder`] to configure custom parameters.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use sattrain::clustering::ClusterParams;
    ///
    /// let params = ClusterParams::builder()
    ///     .raan_std_limit(2.0)
    ///     .iqr_scale(1.5)
    ///     .ignore_trailing_gap(false)
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn builder() -> ClusterParamsBuilder {
        ClusterParamsBuilder::new()
    }
}

impl Default for ClusterParams {
    fn default() -> Self {
        ClusterParams {
            raan_std_limit: 1.25,
            iqr_scale: 1.0,
            ignore_trailing_gap: true,
        }
    }
}

/// Builder for [`ClusterParams`], with validation.
#[derive(Debug, Clone)]
pub struct ClusterParamsBuilder {
    params: ClusterParams,
}

impl Default for ClusterParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClusterParamsBuilder {
    /// Create a new builder initialized with default values.
    pub fn new() -> Self {
        Self {
            params: ClusterParams::default(),
        }
    }

    pub fn raan_std_limit(mut self, v: f64) -> Self {
        self.params.raan_std_limit = v;
        self
    }
    pub fn iqr_scale(mut self, v: f64) -> Self {
        self.params.iqr_scale = v;
        self
    }
    pub fn ignore_trailing_gap(mut self, v: bool) -> Self {
        self.params.ignore_trailing_gap = v;
        self
    }

    /// Return true iff x > 0.0 and comparable (i.e., not NaN).
    #[inline]
    fn gt0(x: f64) -> bool {
        x.partial_cmp(&0.0) == Some(Greater)
    }

    /// Return true iff x >= 0.0 and comparable (i.e., not NaN).
    #[inline]
    fn ge0(x: f64) -> bool {
        matches!(x.partial_cmp(&0.0), Some(Greater) | Some(Equal))
    }

    /// Finalize the builder and produce a [`ClusterParams`] instance.
    ///
    /// Returns
    /// -----------------
    /// * `Ok(ClusterParams)` if all values are valid.
    /// * `Err(SattrainError::InvalidClusterParameter)` otherwise.
    pub fn build(self) -> Result<ClusterParams, SattrainError> {
        let p = &self.params;

        if !Self::gt0(p.raan_std_limit) {
            return Err(SattrainError::InvalidClusterParameter(
                "raan_std_limit must be > 0".into(),
            ));
        }
        if !Self::ge0(p.iqr_scale) {
            return Err(SattrainError::InvalidClusterParameter(
                "iqr_scale must be non-negative".into(),
            ));
        }

        Ok(self.params)
    }
}

impl fmt::Display for ClusterParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            const PARAM_COL: usize = 32; // width reserved for "name = value"
            writeln!(f, "Launch Clustering Parameters")?;
            writeln!(f, "----------------------------")?;

            macro_rules! line {
                ($fmt:expr, $val:expr, $comment:expr) => {{
                    let s = format!($fmt, $val);
                    let pad = if s.len() < PARAM_COL {
                        " ".repeat(PARAM_COL - s.len())
                    } else {
                        " ".to_string()
                    };
                    writeln!(f, "  {}{}# {}", s, pad, $comment)
                }};
            }

            line!(
                "raan_std_limit      = {:.3}°",
                self.raan_std_limit,
                "Max RAAN spread of one plane"
            )?;
            line!(
                "iqr_scale           = {:.3}",
                self.iqr_scale,
                "IQR multiplier of the gap fence"
            )?;
            line!(
                "ignore_trailing_gap = {}",
                self.ignore_trailing_gap,
                "Shield the last batch's closing gap"
            )?;

            Ok(())
        } else {
            write!(
                f,
                "ClusterParams(raan_std_limit={:.2}°, iqr_scale={:.2}, ignore_trailing_gap={})",
                self.raan_std_limit, self.iqr_scale, self.ignore_trailing_gap,
            )
        }
    }
}

/// Batches of one orbital plane, in ring order.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneBatches {
    pub batches: Vec<Batch>,
}

/// The full plane → batch decomposition of one satellite table.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchGroups {
    pub planes: Vec<PlaneBatches>,
}

impl LaunchGroups {
    /// Total number of rows across every plane and batch.
    pub fn satellite_count(&self) -> usize {
        self.rows().count()
    }

    /// Every row of the decomposition, plane by plane, batch by batch.
    pub fn rows(&self) -> impl Iterator<Item = &OrbitalRow> {
        self.planes
            .iter()
            .flat_map(|plane| plane.batches.iter())
            .flat_map(|batch| batch.members.iter())
            .map(|member| &member.row)
    }
}

/// Decompose a satellite table into planes of launch batches.
///
/// Arguments
/// ---------
/// * `table`: one row per satellite at a common epoch, consumed.
/// * `params`: clustering parameters (see [`ClusterParams`]).
///
/// Return
/// ------
/// * One batch list per plane, in RAAN-ascending plane order. Every input row
///   appears in exactly one batch; an empty table yields an empty structure.
pub fn launch_groups(table: OrbitalTable, params: &ClusterParams) -> LaunchGroups {
    let planes = planes::split_by_raan(table, params.raan_std_limit)
        .into_iter()
        .map(|plane| PlaneBatches {
            batches: split_ring(Ring::from_plane(plane), params),
        })
        .collect();

    LaunchGroups { planes }
}

/// Compact mode prints plane/batch/satellite counts; alternate mode (`{:#}`)
/// renders the full report, one member table per batch.
impl fmt::Display for LaunchGroups {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !f.alternate() {
            let batches: usize = self.planes.iter().map(|p| p.batches.len()).sum();
            return write!(
                f,
                "LaunchGroups({} planes, {} batches, {} satellites)",
                self.planes.len(),
                batches,
                self.satellite_count(),
            );
        }

        for (i, plane) in self.planes.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "Plane {} of {}", i + 1, self.planes.len())?;
            for (j, batch) in plane.batches.iter().enumerate() {
                writeln!(f, "\nGroup {} of {}", j + 1, plane.batches.len())?;
                write!(f, "{batch:#}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod clustering_test {
    use super::*;
    use std::collections::HashSet;

    fn row(id: &str, raan: f64, phase: f64) -> OrbitalRow {
        OrbitalRow {
            id: id.to_string(),
            inclination: 53.0,
            raan,
            phase,
            perigee_altitude: 550.0,
            apogee_altitude: 550.0,
        }
    }

    fn two_plane_table() -> OrbitalTable {
        vec![
            row("a0", 10.0, 0.0),
            row("a1", 10.1, 1.0),
            row("a2", 10.2, 2.0),
            row("a3", 10.3, 3.0),
            row("b0", 80.0, 0.0),
            row("b1", 80.1, 1.0),
            row("b2", 80.2, 2.0),
            row("b3", 80.3, 180.0),
            row("b4", 80.4, 181.0),
            row("b5", 80.5, 182.0),
        ]
    }

    #[test]
    fn test_builder_defaults() {
        let params = ClusterParams::default();
        assert_eq!(params.raan_std_limit, 1.25);
        assert_eq!(params.iqr_scale, 1.0);
        assert!(params.ignore_trailing_gap);
    }

    #[test]
    fn test_builder_rejects_bad_values() {
        assert!(matches!(
            ClusterParams::builder().raan_std_limit(-1.0).build(),
            Err(SattrainError::InvalidClusterParameter(_))
        ));
        assert!(matches!(
            ClusterParams::builder().raan_std_limit(f64::NAN).build(),
            Err(SattrainError::InvalidClusterParameter(_))
        ));
        assert!(matches!(
            ClusterParams::builder().iqr_scale(-0.1).build(),
            Err(SattrainError::InvalidClusterParameter(_))
        ));
        assert!(ClusterParams::builder().iqr_scale(0.0).build().is_ok());
    }

    #[test]
    fn test_launch_groups_structure() {
        let groups = launch_groups(two_plane_table(), &ClusterParams::default());

        assert_eq!(groups.planes.len(), 2);
        assert_eq!(groups.planes[0].batches.len(), 1);
        assert_eq!(groups.planes[1].batches.len(), 2);
    }

    #[test]
    fn test_launch_groups_cover_every_row_once() {
        let table = two_plane_table();
        let expected: HashSet<String> = table.iter().map(|r| r.id.clone()).collect();

        let groups = launch_groups(table, &ClusterParams::default());
        let seen: Vec<String> = groups.rows().map(|r| r.id.clone()).collect();

        assert_eq!(seen.len(), expected.len());
        assert_eq!(seen.into_iter().collect::<HashSet<_>>(), expected);
    }

    #[test]
    fn test_launch_groups_empty_table() {
        let groups = launch_groups(Vec::new(), &ClusterParams::default());
        assert!(groups.planes.is_empty());
        assert_eq!(groups.satellite_count(), 0);
    }

    #[test]
    fn test_report_layout() {
        let groups = launch_groups(two_plane_table(), &ClusterParams::default());

        let compact = format!("{groups}");
        assert_eq!(compact, "LaunchGroups(2 planes, 3 batches, 10 satellites)");

        let report = format!("{groups:#}");
        assert!(report.contains("Plane 1 of 2"));
        assert!(report.contains("Plane 2 of 2"));
        assert!(report.contains("Group 2 of 2"));
        assert!(report.contains("sat-id"));
        assert!(report.contains("b3"));
    }
}
