//! # Angle arithmetic on the orbital circle
//!
//! All angular bookkeeping of the crate goes through this module so that the
//! wrap-around conventions are written down exactly once.
//!
//! ## Overview
//!
//! * [`normalize_degrees`] – principal value of an angle in degrees, `[0, 360)`.
//! * [`principal_angle`] – principal value of an angle in radians, `[0, 2π)`.
//! * [`forward_gap`] – prograde separation between two ring positions, `(0, 360]`.
//!
//! `NaN` inputs are propagated unchanged by every function here.

use crate::constants::{Degree, Radian, DPI};

/// Principal value of an angle in degrees, in the interval `[0, 360)`.
pub fn normalize_degrees(angle: Degree) -> Degree {
    angle.rem_euclid(360.0)
}

/// Principal value of an angle in radians, in the interval `[0, 2π)`.
pub fn principal_angle(angle: Radian) -> Radian {
    angle.rem_euclid(DPI)
}

/// Prograde (direction of increasing phase) separation from `from` to `to`, in degrees.
///
/// The result lies in `(0, 360]`: coincident positions are reported as one full
/// turn apart rather than zero, so a ring holding a single satellite owns the
/// whole circle.
///
/// Arguments
/// ---------
/// * `from`: starting phase angle in degrees.
/// * `to`: target phase angle in degrees.
///
/// Return
/// ------
/// * The angular distance travelled going forward from `from` to `to`.
pub fn forward_gap(from: Degree, to: Degree) -> Degree {
    let gap = normalize_degrees(to - from);
    if gap == 0.0 {
        360.0
    } else {
        gap
    }
}

#[cfg(test)]
mod angles_test {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(725.5), 5.5);
        assert_eq!(normalize_degrees(-10.0), 350.0);
        assert_eq!(normalize_degrees(359.999), 359.999);
    }

    #[test]
    fn test_principal_angle() {
        assert_eq!(principal_angle(0.0), 0.0);
        assert_eq!(principal_angle(DPI), 0.0);
        assert_eq!(principal_angle(-PI), PI);
        assert_eq!(principal_angle(3.0 * PI), PI);
    }

    #[test]
    fn test_forward_gap() {
        assert_eq!(forward_gap(350.0, 10.0), 20.0);
        assert_eq!(forward_gap(10.0, 350.0), 340.0);
        assert_eq!(forward_gap(120.0, 120.0), 360.0);
        assert_eq!(forward_gap(0.0, 360.0), 360.0);
    }

    #[test]
    fn test_nan_propagation() {
        assert!(normalize_degrees(f64::NAN).is_nan());
        assert!(principal_angle(f64::NAN).is_nan());
        assert!(forward_gap(f64::NAN, 10.0).is_nan());
        assert!(forward_gap(10.0, f64::NAN).is_nan());
    }
}
