use hifitime::{Duration, Epoch, TimeScale};

/// Convert a TLE epoch (two-digit year and fractional day of year) into an [`Epoch`].
///
/// The two-digit year follows the NORAD pivot convention: values below 57 belong
/// to the 21st century, values from 57 upward to the 20th. The day of year is
/// one-based, so `1.0` is January 1st at midnight UTC.
///
/// Argument
/// --------
/// * `year_two_digit`: the two-digit epoch year as printed on line 1 of the TLE
/// * `day_of_year`: the fractional day of year, one-based
///
/// Return
/// ------
/// * the epoch in the UTC time scale
pub fn tle_epoch(year_two_digit: u32, day_of_year: f64) -> Epoch {
    let year = if year_two_digit < 57 {
        2000 + year_two_digit as i32
    } else {
        1900 + year_two_digit as i32
    };

    let january_first = Epoch::from_gregorian(year, 1, 1, 0, 0, 0, 0, TimeScale::UTC);
    january_first + Duration::from_days(day_of_year - 1.0)
}
