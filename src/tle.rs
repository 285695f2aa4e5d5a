//! # Three-line element set reader
//!
//! Utilities to parse **NORAD two-line element sets** (with their leading name line,
//! as distributed by CelesTrak) and turn them into [`Tle`] values usable by the
//! launch-batch clustering pipeline.
//!
//! ## Overview
//! -----------------
//! This module provides:
//! - A small error type [`TleParseError`] describing element-set parsing failures.
//! - A line-pair parser ([`Tle::from_lines`]) that converts one name/line-1/line-2
//!   triplet into a [`Tle`] with angles in **degrees** and an epoch in **UTC**.
//! - A batch routine [`parse_tle_set`] that reads a whole element file content,
//!   grouping non-empty lines three by three.
//! - A file-level entry point [`read_tle_file`] working on [`Utf8Path`]s.
//!
//! ## Units & Conventions
//! -----------------
//! - **Input format:** fixed-width ASCII lines, 69 columns per element line.
//! - **Angles:** inclination, RAAN, argument of perigee and mean anomaly are kept
//!   in **degrees**, exactly as printed.
//! - **Eccentricity:** the 7-digit field carries an implied leading `0.`.
//! - **Epoch:** two-digit year plus fractional day of year, resolved with the
//!   NORAD century pivot (see [`tle_epoch`]).
//!
//! ## Error Handling
//! -----------------
//! Parsing is strict: a malformed line surfaces a [`TleParseError`] carrying the
//! offending field, and a trailing incomplete triplet is reported instead of being
//! silently dropped. Element-line checksums are not verified.
//!
//! ## See also
//! ------------
//! * [`tle_epoch`] – Two-digit year + fractional day → [`Epoch`].
//! * [`crate::elements::ElementSet`] – Osculating elements extracted from a [`Tle`].

use std::ops::Range;

use camino::Utf8Path;
use hifitime::Epoch;
use thiserror::Error;

use crate::constants::{Degree, RevPerDay, SatId};
use crate::sattrain_errors::SattrainError;
use crate::time::tle_epoch;

/// Number of columns of a NORAD element line.
const TLE_LINE_LENGTH: usize = 69;

/// Line-level parsing errors for three-line element sets.
///
/// Variants
/// -----------------
/// * `TooShortLine` – An element line does not reach 69 characters.
/// * `WrongLineNumber` – An element line does not start with the expected `1 ` or `2 ` marker.
/// * `TruncatedSet` – The file ends in the middle of a name/line-1/line-2 triplet.
/// * `Invalid*` – A fixed-width field failed to parse; the payload carries the offending slice.
#[derive(Error, Debug, PartialEq)]
pub enum TleParseError {
    #[error("The element line is too short: {0}")]
    TooShortLine(String),
    #[error("Expected element line {0}: {1}")]
    WrongLineNumber(u8, String),
    #[error("Element set is truncated: {0} leftover line(s) after the last full entry")]
    TruncatedSet(usize),
    #[error("Invalid catalog number: {0}")]
    InvalidCatalogNumber(String),
    #[error("Invalid launch designator: {0}")]
    InvalidLaunchDesignator(String),
    #[error("Invalid epoch: {0}")]
    InvalidEpoch(String),
    #[error("Invalid inclination: {0}")]
    InvalidInclination(String),
    #[error("Invalid right ascension of ascending node: {0}")]
    InvalidRaan(String),
    #[error("Invalid eccentricity: {0}")]
    InvalidEccentricity(String),
    #[error("Invalid argument of perigee: {0}")]
    InvalidArgumentOfPerigee(String),
    #[error("Invalid mean anomaly: {0}")]
    InvalidMeanAnomaly(String),
    #[error("Invalid mean motion: {0}")]
    InvalidMeanMotion(String),
}

/// One satellite entry of a three-line element set.
///
/// Angular elements are kept in degrees, the epoch in UTC. The launch designator
/// is the compact `YYNNN` integer (two-digit year and launch number of that year)
/// used to tie a spacecraft back to its launch.
#[derive(Debug, Clone, PartialEq)]
pub struct Tle {
    /// Satellite name from the leading line, trimmed (e.g. `STARLINK-1130`).
    pub name: String,
    /// NORAD catalog number.
    pub catalog_number: u32,
    /// International designator restricted to `YYNNN` (year and launch number).
    pub launch_designator: u32,
    /// Epoch of the element set, UTC.
    pub epoch: Epoch,
    /// Mean inclination, degrees.
    pub inclination: Degree,
    /// Mean right ascension of the ascending node, degrees.
    pub raan: Degree,
    /// Mean eccentricity, dimensionless.
    pub eccentricity: f64,
    /// Mean argument of perigee, degrees.
    pub argument_of_perigee: Degree,
    /// Mean anomaly at epoch, degrees.
    pub mean_anomaly: Degree,
    /// Mean motion, revolutions per day.
    pub mean_motion: RevPerDay,
}

/// Fixed-width field access that degrades to an empty slice instead of panicking
/// when the range falls outside the line.
fn field(line: &str, range: Range<usize>) -> &str {
    line.get(range).map(str::trim).unwrap_or("")
}

/// Parse one fixed-width field as `f64`, wrapping failures into the given variant.
fn parse_f64(
    line: &str,
    range: Range<usize>,
    err: fn(String) -> TleParseError,
) -> Result<f64, TleParseError> {
    let raw = field(line, range);
    raw.parse().map_err(|_| err(raw.to_string()))
}

/// Parse one fixed-width field as `u32`, wrapping failures into the given variant.
fn parse_u32(
    line: &str,
    range: Range<usize>,
    err: fn(String) -> TleParseError,
) -> Result<u32, TleParseError> {
    let raw = field(line, range);
    raw.parse().map_err(|_| err(raw.to_string()))
}

impl Tle {
    /// Parse a name line and its two element lines into a [`Tle`].
    ///
    /// Arguments
    /// -----------------
    /// * `name` – The satellite name line, already stripped of its newline.
    /// * `line1` – Element line 1 (epoch and launch identification).
    /// * `line2` – Element line 2 (the orbital elements).
    ///
    /// Return
    /// ----------
    /// * The parsed entry, or the [`TleParseError`] describing the first offending field.
    ///
    /// Field Layout (subset used here)
    /// -----------------
    /// * line 1, `2..7` – NORAD catalog number.
    /// * line 1, `9..14` – Launch designator (`YYNNN`).
    /// * line 1, `18..20` / `20..32` – Epoch year and fractional day of year.
    /// * line 2, `8..16` – Inclination (deg).
    /// * line 2, `17..25` – RAAN (deg).
    /// * line 2, `26..33` – Eccentricity (implied `0.` prefix).
    /// * line 2, `34..42` – Argument of perigee (deg).
    /// * line 2, `43..51` – Mean anomaly (deg).
    /// * line 2, `52..63` – Mean motion (rev/day).
    pub fn from_lines(name: &str, line1: &str, line2: &str) -> Result<Self, TleParseError> {
        if line1.len() < TLE_LINE_LENGTH {
            return Err(TleParseError::TooShortLine(line1.to_string()));
        }
        if line2.len() < TLE_LINE_LENGTH {
            return Err(TleParseError::TooShortLine(line2.to_string()));
        }
        if !line1.starts_with("1 ") {
            return Err(TleParseError::WrongLineNumber(1, line1.to_string()));
        }
        if !line2.starts_with("2 ") {
            return Err(TleParseError::WrongLineNumber(2, line2.to_string()));
        }

        let catalog_number = parse_u32(line1, 2..7, TleParseError::InvalidCatalogNumber)?;
        let launch_designator = parse_u32(line1, 9..14, TleParseError::InvalidLaunchDesignator)?;
        let epoch_year = parse_u32(line1, 18..20, TleParseError::InvalidEpoch)?;
        let epoch_day = parse_f64(line1, 20..32, TleParseError::InvalidEpoch)?;

        let inclination = parse_f64(line2, 8..16, TleParseError::InvalidInclination)?;
        let raan = parse_f64(line2, 17..25, TleParseError::InvalidRaan)?;

        let raw_eccentricity = field(line2, 26..33);
        let eccentricity = format!("0.{raw_eccentricity}")
            .parse()
            .map_err(|_| TleParseError::InvalidEccentricity(raw_eccentricity.to_string()))?;

        let argument_of_perigee = parse_f64(line2, 34..42, TleParseError::InvalidArgumentOfPerigee)?;
        let mean_anomaly = parse_f64(line2, 43..51, TleParseError::InvalidMeanAnomaly)?;
        let mean_motion = parse_f64(line2, 52..63, TleParseError::InvalidMeanMotion)?;

        Ok(Tle {
            name: name.trim().to_string(),
            catalog_number,
            launch_designator,
            epoch: tle_epoch(epoch_year, epoch_day),
            inclination,
            raan,
            eccentricity,
            argument_of_perigee,
            mean_anomaly,
            mean_motion,
        })
    }

    /// Short satellite identifier used in clustering outputs.
    ///
    /// For names following the `FAMILY-NUMBER` convention (e.g. `STARLINK-1130`)
    /// this is the part after the first dash; otherwise the full name is returned.
    pub fn satellite_id(&self) -> SatId {
        match self.name.split_once('-') {
            Some((_, suffix)) => suffix.trim().to_string(),
            None => self.name.clone(),
        }
    }
}

/// Parse the content of a three-line element file.
///
/// Non-empty lines are grouped three by three (name, line 1, line 2). A trailing
/// incomplete triplet is an error rather than a silent drop.
///
/// Arguments
/// -----------------
/// * `content` – The full text of an element file.
///
/// Return
/// ----------
/// * All parsed entries in file order, or the first [`TleParseError`] encountered.
pub fn parse_tle_set(content: &str) -> Result<Vec<Tle>, TleParseError> {
    let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();

    let mut tles = Vec::with_capacity(lines.len() / 3);
    for group in lines.chunks(3) {
        match group {
            [name, line1, line2] => tles.push(Tle::from_lines(name, line1, line2)?),
            leftover => return Err(TleParseError::TruncatedSet(leftover.len())),
        }
    }
    Ok(tles)
}

/// Read and parse a three-line element file from disk.
///
/// Arguments
/// -----------------
/// * `path` – Path to the element file.
///
/// Return
/// ----------
/// * All parsed entries in file order, or a [`SattrainError`] wrapping the IO or
///   parsing failure.
///
/// See also
/// ------------
/// * [`parse_tle_set`] – The underlying content parser.
pub fn read_tle_file(path: &Utf8Path) -> Result<Vec<Tle>, SattrainError> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_tle_set(&content)?)
}
