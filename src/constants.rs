//! # Constants and type definitions for Sattrain
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! definitions** used throughout the `Sattrain` library. It also defines the container types used
//! to hold ring and batch members during clustering.
//!
//! ## Overview
//!
//! - Geophysical constants (Earth radius, gravitational parameter)
//! - Unit conversions (degrees ↔ radians, days ↔ seconds)
//! - Core type aliases used across the crate
//! - Inclination shell delimiters of the Starlink constellation
//! - Container types for ring and batch members
//!
//! These definitions are used by all main modules, including element extraction, clustering,
//! and pass aggregation.

use smallvec::SmallVec;

use crate::clustering::ring::RingMember;

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Earth equatorial radius in kilometers (WGS84)
pub const EARTH_EQUATORIAL_RADIUS: f64 = 6_378.137;

/// Earth gravitational parameter μ = GM in km³/s² (WGS84)
pub const EARTH_MU: f64 = 398_600.4418;

/// Inclination delimiters of the Starlink shells, in degrees
pub const STARLINK_SHELLS: [f64; 6] = [42.0, 43.0, 53.05, 53.2, 70.0, 97.6];

/// Half-width of an inclination shell around its delimiter, in degrees
pub const SHELL_EPSILON: f64 = 0.075;

/// Horizon for visibility-pass searches, in days
pub const PASS_SEARCH_HORIZON: f64 = 7.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Orbital revolutions per day
pub type RevPerDay = f64;

/// Identifier of a satellite, unique within one input set.
///
/// For Starlink spacecraft this is the numeric suffix of the catalog name
/// (e.g. `"1130"` for `STARLINK-1130`), but any opaque string works.
pub type SatId = String;

// -------------------------------------------------------------------------------------------------
// Data containers
// -------------------------------------------------------------------------------------------------

/// A small, inline-optimized container for the members of a ring or batch.
pub type RingMembers = SmallVec<[RingMember; 8]>;
