//! # Visibility-pass aggregation
//!
//! Batch-level windows over an external pass-prediction service.
//!
//! ## Overview
//! -----------------
//! Computing rise/max/set geometry needs a full observation model (topocentric
//! frames, refraction, illumination) that this crate deliberately does not
//! carry. The [`PassPredictor`] trait is the seam: any engine able to answer
//! "first pass of satellite X over observer Y after epoch T" plugs in, and the
//! functions here only aggregate its answers batch-wise.
//!
//! A deployment batch travels as a pack, so its members cross the sky as one
//! train: [`batch_window`] reduces the per-member passes to a single
//! appears/maximum/disappears window for the whole batch, while
//! [`nth_visible_passes`] walks each member to its n-th visible pass for
//! per-satellite reporting.
//!
//! Both searches give up past [`PASS_SEARCH_HORIZON`] days so a batch that
//! never turns visible (daylight passes, eclipsed season) terminates with a
//! clean outcome instead of iterating forever.

use hifitime::{Duration, Epoch};
use std::fmt;

#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};

use crate::constants::{Degree, Kilometer, SatId, PASS_SEARCH_HORIZON};
use crate::sattrain_errors::SattrainError;

/// Geodetic position of the ground observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    /// Geodetic latitude in degrees, north positive.
    pub latitude: Degree,
    /// Longitude in degrees, east positive.
    pub longitude: Degree,
    /// Height above the reference ellipsoid in kilometers.
    pub elevation: Kilometer,
}

impl Observer {
    pub fn new(latitude: Degree, longitude: Degree, elevation: Kilometer) -> Self {
        Observer {
            latitude,
            longitude,
            elevation,
        }
    }
}

/// One sampled instant of a pass: where the satellite sits in the local sky.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassInstant {
    pub epoch: Epoch,
    /// Elevation above the horizon, degrees.
    pub altitude: Degree,
    /// Compass azimuth, degrees clockwise from north.
    pub azimuth: Degree,
}

impl fmt::Display for PassInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}    alt: {:.2}    az: {:.2}",
            self.epoch, self.altitude, self.azimuth
        )
    }
}

/// One horizon-to-horizon pass of a satellite over an observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassEvent {
    pub rise: PassInstant,
    pub max: PassInstant,
    pub set: PassInstant,
    /// Whether the pass is actually observable (sunlit satellite, dark sky).
    pub visible: bool,
}

/// External pass-prediction seam.
///
/// Implementations answer the single question the aggregations below need:
/// the first pass of a given satellite over a given observer rising strictly
/// after `after`. Pass geometry internals stay on the implementor's side.
///
/// # Errors
///
/// Implementations report an unknown identifier with
/// [`SattrainError::SatelliteNotFound`]; any engine-specific failure maps to
/// the variant that fits it best.
pub trait PassPredictor {
    fn next_pass(
        &self,
        id: &str,
        observer: &Observer,
        after: Epoch,
    ) -> Result<PassEvent, SattrainError>;
}

/// Visibility window of one whole batch.
///
/// `appears` is when the leading satellite of the train becomes visible,
/// `disappears` when the trailing one drops out, and `maximum` the
/// highest-altitude culmination any member reaches in between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchWindow {
    pub appears: PassInstant,
    pub maximum: PassInstant,
    pub disappears: PassInstant,
}

impl fmt::Display for BatchWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "    appears:     {}", self.appears)?;
        writeln!(f, "    max:         {}", self.maximum)?;
        write!(f, "    disappears:  {}", self.disappears)
    }
}

/// Compute the visibility window of one batch.
///
/// One pass per member is fetched from `start`; while no member's pass is
/// visible, every member advances to its following pass, each anchored at its
/// own set time so the members stay on the same revolution. The train window
/// is then reduced from the visible passes of the winning round.
///
/// # Arguments
///
/// * `predictor` - The external pass-prediction engine.
/// * `ids` - Batch members, in batch order.
/// * `observer` - The ground observer.
/// * `start` - Epoch the search begins at.
///
/// # Returns
///
/// The batch [`BatchWindow`], or:
/// * [`SattrainError::EmptyBatch`] for an empty `ids` slice,
/// * [`SattrainError::NoVisiblePass`] once every member's candidate pass
///   rises later than `start` + [`PASS_SEARCH_HORIZON`] days,
/// * any error the predictor itself reports.
pub fn batch_window(
    predictor: &impl PassPredictor,
    ids: &[SatId],
    observer: &Observer,
    start: Epoch,
) -> Result<BatchWindow, SattrainError> {
    if ids.is_empty() {
        return Err(SattrainError::EmptyBatch);
    }
    let horizon = start + Duration::from_days(PASS_SEARCH_HORIZON);

    let mut passes = Vec::with_capacity(ids.len());
    for id in ids {
        passes.push(predictor.next_pass(id, observer, start)?);
    }

    // Advance the whole train one revolution at a time until any member
    // turns visible, or every candidate pass has left the search horizon.
    while !passes.iter().any(|p| p.visible) {
        if passes.iter().all(|p| p.rise.epoch > horizon) {
            return Err(SattrainError::NoVisiblePass(format!(
                "batch of {} satellites",
                ids.len()
            )));
        }
        for (id, pass) in ids.iter().zip(passes.iter_mut()) {
            *pass = predictor.next_pass(id, observer, pass.set.epoch)?;
        }
    }

    let Some(appears_index) = passes.iter().position(|p| p.visible) else {
        return Err(SattrainError::NoVisiblePass(format!(
            "batch of {} satellites",
            ids.len()
        )));
    };
    let first_visible = &passes[appears_index];

    // The trailing edge scans backwards down to the leading pass itself, so a
    // single-member batch closes on its own set time.
    let last_visible = passes[appears_index..]
        .iter()
        .rfind(|p| p.visible)
        .unwrap_or(first_visible);

    let maximum = passes
        .iter()
        .filter(|p| p.visible)
        .map(|p| p.max)
        .max_by(|a, b| a.altitude.total_cmp(&b.altitude))
        .unwrap_or(first_visible.max);

    Ok(BatchWindow {
        appears: first_visible.rise,
        maximum,
        disappears: last_visible.set,
    })
}

/// Walk one member to its `visible_number`-th visible pass.
///
/// `None` once the candidate pass rises later than the horizon. With
/// `visible_number == 0` the first pass comes back as-is, visible or not.
fn nth_visible_pass(
    predictor: &impl PassPredictor,
    id: &str,
    observer: &Observer,
    start: Epoch,
    visible_number: usize,
) -> Result<Option<PassEvent>, SattrainError> {
    let horizon = start + Duration::from_days(PASS_SEARCH_HORIZON);

    let mut pass = predictor.next_pass(id, observer, start)?;
    let mut seen = usize::from(pass.visible);

    loop {
        if seen >= visible_number {
            return Ok(Some(pass));
        }
        // Some satellites never produce a visible pass over this observer.
        if pass.rise.epoch > horizon {
            return Ok(None);
        }
        pass = predictor.next_pass(id, observer, pass.set.epoch)?;
        if pass.visible {
            seen += 1;
        }
    }
}

/// Find the `visible_number`-th visible pass of every batch member.
///
/// # Arguments
///
/// * `predictor` - The external pass-prediction engine.
/// * `ids` - Batch members, in batch order.
/// * `observer` - The ground observer.
/// * `start` - Epoch the per-member searches begin at.
/// * `visible_number` - Ordinal of the wanted pass (1 = first visible).
///
/// # Returns
///
/// One entry per member, in `ids` order: `Some(pass)` when the ordinal is
/// reached, `None` when the member's search walks past the horizon first.
#[cfg(feature = "progress")]
pub fn nth_visible_passes(
    predictor: &impl PassPredictor,
    ids: &[SatId],
    observer: &Observer,
    start: Epoch,
    visible_number: usize,
) -> Result<Vec<Option<PassEvent>>, SattrainError> {
    let pb = ProgressBar::new(ids.len().max(1) as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{bar:40.cyan/blue} {pos}/{len} ({percent:>3}%) | {per_sec} | ETA {eta_precise}",
        )
        .expect("indicatif template"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(200));

    let mut result = Vec::with_capacity(ids.len());
    for id in ids {
        result.push(nth_visible_pass(
            predictor,
            id,
            observer,
            start,
            visible_number,
        )?);
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(result)
}

#[cfg(not(feature = "progress"))]
pub fn nth_visible_passes(
    predictor: &impl PassPredictor,
    ids: &[SatId],
    observer: &Observer,
    start: Epoch,
    visible_number: usize,
) -> Result<Vec<Option<PassEvent>>, SattrainError> {
    let mut result = Vec::with_capacity(ids.len());
    for id in ids {
        result.push(nth_visible_pass(
            predictor,
            id,
            observer,
            start,
            visible_number,
        )?);
    }
    Ok(result)
}
