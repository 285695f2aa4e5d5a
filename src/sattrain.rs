//! # Sattrain: TLE store, launch catalog, and clustering context
//!
//! This module defines the [`Sattrain`](crate::sattrain::Sattrain) struct, the central façade that wires together:
//!
//! 1. **TLE store** — the parsed element sets ([`Tle`](crate::tle::Tle)), with a lazy
//!    satellite-id index for direct lookup.
//! 2. **Launch catalog** — the "group-launch" name to international-designator
//!    mapping ([`LaunchCatalog`](crate::catalog::LaunchCatalog)).
//! 3. **Clustering pipeline** — plane and batch decomposition of one launch at a
//!    caller-supplied epoch ([`launch_groups`](crate::clustering::launch_groups)).
//! 4. **Pass windows** — batch-level visibility aggregation over an external
//!    [`PassPredictor`](crate::passes::PassPredictor).
//!
//! The design emphasizes *lazy initialization* and *idempotent caching*:
//! - The satellite-id index is built on first lookup via
//!   [`OnceCell`](once_cell::sync::OnceCell), then reused.
//! - TLEs and catalog are parsed once at construction and never re-read.
//!
//! ## Typical usage
//!
//! ```rust, no_run
//! use camino::Utf8Path;
//! use hifitime::Epoch;
//! use sattrain::clustering::ClusterParams;
//! use sattrain::sattrain::Sattrain;
//!
//! // Instantiate the context from a TLE file and a launch catalog
//! let context = Sattrain::from_files(
//!     Utf8Path::new("starlink.tle"),
//!     Utf8Path::new("launches.json"),
//!     ClusterParams::default(),
//! )
//! .unwrap();
//!
//! // Decompose Starlink group 4, launch 7 into planes of batches
//! let epoch = Epoch::from_gregorian_utc(2023, 1, 1, 0, 0, 0, 0);
//! let groups = context.launch_groups(4, 7, epoch).unwrap();
//! println!("{groups:#}");
//! ```
//!
//! ## See also
//! ------------
//! * [`ClusterParams`](crate::clustering::ClusterParams) – Pipeline tuning knobs.
//! * [`Propagator`](crate::propagation::Propagator) – Mean-element propagation seam.
//! * [`PassPredictor`](crate::passes::PassPredictor) – External pass-geometry seam.

use std::collections::HashMap;

use ahash::RandomState;
use camino::Utf8Path;
use hifitime::Epoch;
use once_cell::sync::OnceCell;

use crate::catalog::LaunchCatalog;
use crate::clustering::batches::Batch;
use crate::clustering::{launch_groups, ClusterParams, LaunchGroups};
use crate::constants::SatId;
use crate::elements::{table_from_elements, OrbitalTable};
use crate::passes::{batch_window, BatchWindow, Observer, PassPredictor};
use crate::propagation::Propagator;
use crate::sattrain_errors::SattrainError;
use crate::tle::{read_tle_file, Tle};

#[derive(Debug, Clone)]
pub struct Sattrain {
    tles: Vec<Tle>,
    catalog: LaunchCatalog,
    params: ClusterParams,
    sat_index: OnceCell<HashMap<SatId, usize, RandomState>>,
}

impl Sattrain {
    /// Construct a new [`Sattrain`] context from already-parsed inputs.
    ///
    /// The satellite-id index is **not** built yet; it is lazily initialized
    /// the first time a lookup needs it.
    ///
    /// Arguments
    /// -----------------
    /// * `tles`: The parsed TLE set, typically one whole constellation.
    /// * `catalog`: The launch catalog resolving batch names.
    /// * `params`: Clustering parameters applied by [`launch_groups`](Sattrain::launch_groups).
    pub fn new(tles: Vec<Tle>, catalog: LaunchCatalog, params: ClusterParams) -> Self {
        Sattrain {
            tles,
            catalog,
            params,
            sat_index: OnceCell::new(),
        }
    }

    /// Construct a [`Sattrain`] context from a TLE file and a catalog file.
    ///
    /// Arguments
    /// -----------------
    /// * `tle_path`: Path to a three-line-per-satellite TLE file.
    /// * `catalog_path`: Path to the JSON launch catalog.
    /// * `params`: Clustering parameters applied by [`launch_groups`](Sattrain::launch_groups).
    ///
    /// Return
    /// ----------
    /// * A new [`Sattrain`] instance, or a [`SattrainError`] if either file
    ///   cannot be read or parsed.
    ///
    /// See also
    /// ------------
    /// * [`read_tle_file`] – Underlying TLE loader.
    /// * [`LaunchCatalog::from_json_file`] – Underlying catalog loader.
    pub fn from_files(
        tle_path: &Utf8Path,
        catalog_path: &Utf8Path,
        params: ClusterParams,
    ) -> Result<Self, SattrainError> {
        Ok(Sattrain::new(
            read_tle_file(tle_path)?,
            LaunchCatalog::from_json_file(catalog_path)?,
            params,
        ))
    }

    pub fn tles(&self) -> &[Tle] {
        &self.tles
    }

    pub fn catalog(&self) -> &LaunchCatalog {
        &self.catalog
    }

    pub fn params(&self) -> &ClusterParams {
        &self.params
    }

    /// Lazily built satellite-id → TLE-position index.
    ///
    /// When two TLEs share an id (stale duplicate in the input file), the
    /// later entry wins, matching the usual "latest element set last" file
    /// convention.
    fn sat_index(&self) -> &HashMap<SatId, usize, RandomState> {
        self.sat_index.get_or_init(|| {
            self.tles
                .iter()
                .enumerate()
                .map(|(i, tle)| (tle.satellite_id(), i))
                .collect()
        })
    }

    /// Resolve a [`Tle`] from a satellite identifier.
    ///
    /// Arguments
    /// -----------------
    /// * `id`: The satellite identifier (e.g. `"1130"` for `STARLINK-1130`).
    ///
    /// Return
    /// ----------
    /// * The matching TLE, or [`SattrainError::SatelliteNotFound`].
    ///
    /// See also
    /// ------------
    /// * [`Tle::satellite_id`] – The identifier convention used as key.
    pub fn get_tle_from_satellite_id(&self, id: &str) -> Result<&Tle, SattrainError> {
        self.sat_index()
            .get(id)
            .map(|&i| &self.tles[i])
            .ok_or_else(|| SattrainError::SatelliteNotFound(id.to_string()))
    }

    /// All TLEs belonging to the launch known as `group`-`launch`.
    ///
    /// Arguments
    /// -----------------
    /// * `group`: The Starlink shell group number.
    /// * `launch`: The launch number within the group.
    ///
    /// Return
    /// ----------
    /// * The matching TLEs in file order, or:
    ///   - [`SattrainError::UnknownLaunch`] if the catalog has no such name,
    ///   - [`SattrainError::NoTleForLaunch`] if the catalog resolves the name
    ///     but no TLE carries its designator.
    pub fn tles_for_launch(&self, group: u32, launch: u32) -> Result<Vec<&Tle>, SattrainError> {
        let designator = self.catalog.designator_for(group, launch)?;

        let tles: Vec<&Tle> = self
            .tles
            .iter()
            .filter(|tle| tle.launch_designator == designator)
            .collect();

        if tles.is_empty() {
            return Err(SattrainError::NoTleForLaunch(designator));
        }
        Ok(tles)
    }

    /// Build the orbital table of one launch at a given epoch.
    ///
    /// Every member TLE is propagated to `epoch` and flattened into one
    /// [`OrbitalRow`](crate::elements::OrbitalRow) of scalar angles and
    /// apsides.
    ///
    /// Arguments
    /// -----------------
    /// * `group`, `launch`: The batch name, resolved through the catalog.
    /// * `epoch`: The common evaluation epoch.
    ///
    /// Return
    /// ----------
    /// * The table, one row per member, or any catalog/propagation error.
    ///
    /// See also
    /// ------------
    /// * [`Propagator::elements_at`] – Per-satellite propagation.
    pub fn batch_rows(
        &self,
        group: u32,
        launch: u32,
        epoch: Epoch,
    ) -> Result<OrbitalTable, SattrainError> {
        let tles = self.tles_for_launch(group, launch)?;

        let mut elements = Vec::with_capacity(tles.len());
        for tle in tles {
            elements.push((tle.satellite_id(), tle.elements_at(epoch)?));
        }
        Ok(table_from_elements(elements))
    }

    /// Decompose one launch into planes of deployment batches.
    ///
    /// This is the full pipeline: catalog resolution, propagation to `epoch`,
    /// RAAN plane partition, ring normalization, and gap-outlier batch
    /// splitting, using this context's [`ClusterParams`].
    ///
    /// Arguments
    /// -----------------
    /// * `group`, `launch`: The batch name, resolved through the catalog.
    /// * `epoch`: The common evaluation epoch.
    ///
    /// Return
    /// ----------
    /// * The nested planes → batches structure, or any upstream error.
    ///
    /// See also
    /// ------------
    /// * [`launch_groups`](crate::clustering::launch_groups) – The clustering stage alone.
    pub fn launch_groups(
        &self,
        group: u32,
        launch: u32,
        epoch: Epoch,
    ) -> Result<LaunchGroups, SattrainError> {
        let table = self.batch_rows(group, launch, epoch)?;
        Ok(launch_groups(table, &self.params))
    }

    /// Visibility window of one batch over an observer.
    ///
    /// Thin wrapper over [`batch_window`](crate::passes::batch_window) that
    /// feeds it the batch's member identifiers in batch order.
    pub fn batch_window(
        &self,
        predictor: &impl PassPredictor,
        batch: &Batch,
        observer: &Observer,
        start: Epoch,
    ) -> Result<BatchWindow, SattrainError> {
        batch_window(predictor, &batch.ids(), observer, start)
    }
}
