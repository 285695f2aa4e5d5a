//! # Mean-element propagation
//!
//! Minimal two-body propagation used to snap every satellite of an input set to
//! one **common epoch** before clustering.
//!
//! ## Overview
//! -----------------
//! The clustering pipeline compares in-plane phases between satellites, so what
//! matters is their **relative** geometry over the few days separating element
//! epochs, not meter-level accuracy. The model implemented here therefore:
//! - treats the TLE mean elements as osculating elements,
//! - derives the semi-major axis from the mean motion through Kepler's third law,
//! - advances the mean anomaly linearly and solves Kepler's equation for the
//!   eccentric anomaly with a Newton-Raphson iteration,
//! - keeps inclination, node and argument of perigee frozen (no J2 drift, no drag).
//!
//! Callers needing higher fidelity can plug their own [`Propagator`]
//! implementation; the rest of the crate only sees [`ElementSet`]s.
//!
//! ## See also
//! ------------
//! * [`ElementSet`] – The element snapshot produced here.
//! * [`Tle`] – The mean-element input this model runs on.

use hifitime::Epoch;
use roots::{find_root_newton_raphson, SimpleConvergency};

use crate::angles::principal_angle;
use crate::constants::{DPI, EARTH_MU, SECONDS_PER_DAY};
use crate::elements::ElementSet;
use crate::sattrain_errors::SattrainError;
use crate::tle::Tle;

/// Source of osculating elements at an arbitrary epoch.
///
/// The pipeline never cares how element sets are produced, only that every
/// satellite of a table can be evaluated at the same epoch. [`Tle`] provides
/// the built-in mean-element implementation.
pub trait Propagator {
    /// Osculating elements of this satellite at `epoch`.
    fn elements_at(&self, epoch: Epoch) -> Result<ElementSet, SattrainError>;
}

/// Solve Kepler's equation `M = E - e·sin(E)` for the eccentric anomaly `E`.
///
/// Newton-Raphson starting from the mean anomaly itself. For the near-circular
/// orbits handled here the derivative `1 - e·cos(E)` stays close to one and the
/// iteration converges in a handful of steps.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: mean anomaly `M` in radians.
/// * `eccentricity`: orbit eccentricity, `0 ≤ e < 1`.
///
/// Return
/// ------
/// * The eccentric anomaly `E` in radians, or a root-finding error if the
///   iteration fails to converge.
pub fn solve_kepler_equation(mean_anomaly: f64, eccentricity: f64) -> Result<f64, SattrainError> {
    // Résidu R(E) = E - e·sin(E) - M
    let f = |e_anom: f64| e_anom - eccentricity * e_anom.sin() - mean_anomaly;
    let df = |e_anom: f64| 1.0 - eccentricity * e_anom.cos();

    let mut tol = SimpleConvergency {
        eps: f64::EPSILON * 1e2, // ~2e-14
        max_iter: 25,
    };

    Ok(find_root_newton_raphson(mean_anomaly, &f, &df, &mut tol)?)
}

impl Propagator for Tle {
    fn elements_at(&self, epoch: Epoch) -> Result<ElementSet, SattrainError> {
        // Mean motion in rad/s, then Kepler's third law for the semi-major axis
        let mean_motion_rad = self.mean_motion * DPI / SECONDS_PER_DAY;
        let semi_major_axis = (EARTH_MU / mean_motion_rad.powi(2)).cbrt();

        let elapsed_seconds = (epoch - self.epoch).to_seconds();
        let mean_anomaly =
            principal_angle(self.mean_anomaly.to_radians() + mean_motion_rad * elapsed_seconds);

        let eccentric_anomaly = solve_kepler_equation(mean_anomaly, self.eccentricity)?;

        // ν = 2·atan2(√(1+e)·sin(E/2), √(1−e)·cos(E/2))
        let half = eccentric_anomaly / 2.0;
        let true_anomaly = 2.0
            * ((1.0 + self.eccentricity).sqrt() * half.sin())
                .atan2((1.0 - self.eccentricity).sqrt() * half.cos());

        Ok(ElementSet {
            epoch,
            semi_major_axis,
            eccentricity: self.eccentricity,
            inclination: self.inclination.to_radians(),
            ascending_node_longitude: self.raan.to_radians(),
            periapsis_argument: self.argument_of_perigee.to_radians(),
            true_anomaly: principal_angle(true_anomaly),
        })
    }
}

#[cfg(test)]
mod propagation_test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use hifitime::{Duration, TimeScale};
    use std::f64::consts::PI;

    fn starlink_tle() -> Tle {
        Tle {
            name: "STARLINK-1130".to_string(),
            catalog_number: 44955,
            launch_designator: 20001,
            epoch: Epoch::from_gregorian(2020, 1, 21, 9, 41, 6, 0, TimeScale::UTC),
            inclination: 53.0031,
            raan: 135.8999,
            eccentricity: 0.0001341,
            argument_of_perigee: 85.0924,
            mean_anomaly: 275.0219,
            mean_motion: 15.05567501,
        }
    }

    #[test]
    fn test_solve_kepler_circular() {
        let mean_anomaly = 1.234;
        let eccentric = solve_kepler_equation(mean_anomaly, 0.0).unwrap();
        assert_abs_diff_eq!(eccentric, mean_anomaly, epsilon = 1e-12);
    }

    #[test]
    fn test_solve_kepler_residual() {
        let mean_anomaly = PI / 3.0;
        let eccentricity = 0.1;
        let eccentric = solve_kepler_equation(mean_anomaly, eccentricity).unwrap();
        let residual = eccentric - eccentricity * eccentric.sin() - mean_anomaly;
        assert_abs_diff_eq!(residual, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_semi_major_axis_from_mean_motion() {
        let tle = starlink_tle();
        let elements = tle.elements_at(tle.epoch).unwrap();

        // 15.056 rev/day puts Starlink near a 550 km shell
        assert!(elements.semi_major_axis > 6_900.0 && elements.semi_major_axis < 6_950.0);
    }

    #[test]
    fn test_phase_periodicity() {
        let tle = starlink_tle();
        let period = Duration::from_seconds(SECONDS_PER_DAY / tle.mean_motion);

        let at_epoch = tle.elements_at(tle.epoch).unwrap();
        let one_rev_later = tle.elements_at(tle.epoch + period).unwrap();

        assert_abs_diff_eq!(
            at_epoch.phase_angle(),
            one_rev_later.phase_angle(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_phase_advances_quarter_period() {
        let mut tle = starlink_tle();
        tle.eccentricity = 0.0;
        let quarter = Duration::from_seconds(SECONDS_PER_DAY / tle.mean_motion / 4.0);

        let at_epoch = tle.elements_at(tle.epoch).unwrap();
        let later = tle.elements_at(tle.epoch + quarter).unwrap();

        let advance = (later.phase_angle() - at_epoch.phase_angle()).rem_euclid(360.0);
        assert_abs_diff_eq!(advance, 90.0, epsilon = 1e-6);
    }
}
