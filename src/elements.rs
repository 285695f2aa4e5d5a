//! # Osculating elements and clustering rows
//!
//! Bridge between the propagation side of the crate (radians, kilometers,
//! epochs) and the clustering side (plain per-satellite rows in degrees).
//!
//! ## Overview
//!
//! * [`ElementSet`] – osculating Keplerian elements of one satellite at an epoch.
//! * [`OrbitalRow`] – the flattened value object consumed by the clustering pipeline.
//! * [`table_from_elements`] – batch conversion of element sets into a row table.

use hifitime::Epoch;

use crate::angles::normalize_degrees;
use crate::constants::{Degree, Kilometer, Radian, SatId, EARTH_EQUATORIAL_RADIUS};

/// Osculating Keplerian elements of one satellite at a given epoch.
///
/// Units
/// -----
/// * `epoch`: UTC.
/// * `semi_major_axis`: kilometers.
/// * `eccentricity`: unitless.
/// * `inclination`, `ascending_node_longitude`, `periapsis_argument`,
///   `true_anomaly`: radians.
///
/// See also
/// --------
/// * [`OrbitalRow`] – Degree-based flattening used for clustering.
/// * [`crate::propagation::Propagator`] – Produces element sets at a common epoch.
#[derive(Debug, PartialEq, Clone)]
pub struct ElementSet {
    pub epoch: Epoch,
    pub semi_major_axis: Kilometer,
    pub eccentricity: f64,
    pub inclination: Radian,
    pub ascending_node_longitude: Radian,
    pub periapsis_argument: Radian,
    pub true_anomaly: Radian,
}

impl ElementSet {
    /// Argument of latitude (ω + ν) folded to `[0, 360)`, in degrees.
    ///
    /// This is the in-plane phase used to order satellites along their orbital
    /// ring. Satellites of one launch share almost identical planes, so the
    /// phase alone fixes their relative position.
    pub fn phase_angle(&self) -> Degree {
        normalize_degrees((self.periapsis_argument + self.true_anomaly).to_degrees())
    }

    /// Perigee and apogee altitudes above the equatorial radius, in kilometers.
    pub fn apsides(&self) -> (Kilometer, Kilometer) {
        let perigee = self.semi_major_axis * (1.0 - self.eccentricity) - EARTH_EQUATORIAL_RADIUS;
        let apogee = self.semi_major_axis * (1.0 + self.eccentricity) - EARTH_EQUATORIAL_RADIUS;
        (perigee, apogee)
    }
}

/// One satellite as seen by the clustering pipeline.
///
/// A plain immutable value object: identifier, orbit orientation and in-plane
/// phase in degrees, apsis altitudes in kilometers rounded to one decimal.
/// Rows are cheap to clone and carry no behavior beyond construction.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalRow {
    /// Satellite identifier, unique within one table.
    pub id: SatId,
    /// Orbital inclination, degrees.
    pub inclination: Degree,
    /// Right ascension of the ascending node, degrees in `[0, 360)`.
    pub raan: Degree,
    /// Argument of latitude (ω + ν), degrees in `[0, 360)`.
    pub phase: Degree,
    /// Perigee altitude above the equatorial radius, kilometers.
    pub perigee_altitude: Kilometer,
    /// Apogee altitude above the equatorial radius, kilometers.
    pub apogee_altitude: Kilometer,
}

/// Rows of one input set, in no particular order.
pub type OrbitalTable = Vec<OrbitalRow>;

impl OrbitalRow {
    /// Flatten an [`ElementSet`] into the degree-based row used for clustering.
    ///
    /// Apsis altitudes are rounded to one decimal; angles keep full precision.
    pub fn from_elements(id: SatId, elements: &ElementSet) -> Self {
        let (perigee, apogee) = elements.apsides();
        OrbitalRow {
            id,
            inclination: elements.inclination.to_degrees(),
            raan: normalize_degrees(elements.ascending_node_longitude.to_degrees()),
            phase: elements.phase_angle(),
            perigee_altitude: round_to_tenth(perigee),
            apogee_altitude: round_to_tenth(apogee),
        }
    }
}

/// Convert a sequence of identified element sets into an [`OrbitalTable`].
pub fn table_from_elements<I>(entries: I) -> OrbitalTable
where
    I: IntoIterator<Item = (SatId, ElementSet)>,
{
    entries
        .into_iter()
        .map(|(id, elements)| OrbitalRow::from_elements(id, &elements))
        .collect()
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod elements_test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use hifitime::TimeScale;

    fn sample_elements() -> ElementSet {
        ElementSet {
            epoch: Epoch::from_gregorian(2020, 1, 21, 0, 0, 0, 0, TimeScale::UTC),
            semi_major_axis: 6928.137,
            eccentricity: 0.0,
            inclination: 53.0_f64.to_radians(),
            ascending_node_longitude: 135.9_f64.to_radians(),
            periapsis_argument: 350.0_f64.to_radians(),
            true_anomaly: 20.0_f64.to_radians(),
        }
    }

    #[test]
    fn test_phase_angle_wraps() {
        let elements = sample_elements();
        assert_abs_diff_eq!(elements.phase_angle(), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_apsides_circular_orbit() {
        let (perigee, apogee) = sample_elements().apsides();
        assert_abs_diff_eq!(perigee, 550.0, epsilon = 1e-9);
        assert_abs_diff_eq!(apogee, 550.0, epsilon = 1e-9);
    }

    #[test]
    fn test_row_from_elements() {
        let mut elements = sample_elements();
        elements.eccentricity = 0.0013;

        let row = OrbitalRow::from_elements("1130".into(), &elements);
        assert_eq!(row.id, "1130");
        assert_abs_diff_eq!(row.inclination, 53.0, epsilon = 1e-9);
        assert_abs_diff_eq!(row.raan, 135.9, epsilon = 1e-9);

        // a * e = 9.0066 km, rounded to one decimal on both sides
        assert_eq!(row.perigee_altitude, 541.0);
        assert_eq!(row.apogee_altitude, 559.0);
    }
}
