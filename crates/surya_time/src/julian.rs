//! Proleptic Julian calendar ⇄ Julian Day Number.
//!
//! Years use astronomical numbering: year 0 = 1 BCE, year -3101 = 3102 BCE.
//! The JDN counts whole days from the start of the civil day: it is the
//! integer part of the Julian Date at midnight minus one half, so
//! 2000-01-01 (Julian) is JDN 2451557 and the Kali Yuga epoch is 588465.

use crate::error::TimeError;

/// Leap rule of the Julian calendar: every fourth year, no century exception.
pub const fn is_julian_leap_year(year: i32) -> bool {
    year.rem_euclid(4) == 0
}

/// Length of `month` in `year`, or `None` for a month outside 1..=12.
pub const fn days_in_month(year: i32, month: u32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 => {
            if is_julian_leap_year(year) {
                Some(29)
            } else {
                Some(28)
            }
        }
        _ => None,
    }
}

/// Validate a calendar triple.
pub(crate) fn check_date(year: i32, month: u32, day: u32) -> Result<(), TimeError> {
    match days_in_month(year, month) {
        Some(max) if (1..=max).contains(&day) => Ok(()),
        _ => Err(TimeError::InvalidDate { year, month, day }),
    }
}

/// Julian Day Number of a proleptic Julian calendar date.
///
/// Fails with [`TimeError::InvalidDate`] before any arithmetic when the
/// month or day is out of range.
pub fn jdn_from_date(year: i32, month: u32, day: u32) -> Result<i64, TimeError> {
    check_date(year, month, day)?;
    Ok(jdn_unchecked(year, month, day))
}

/// JDN arithmetic for a date already known to be valid.
pub(crate) fn jdn_unchecked(year: i32, month: u32, day: u32) -> i64 {
    // March-based year so the leap day falls at the end.
    let a = (14 - month as i64) / 12;
    let y = year as i64 + 4800 - a;
    let m = month as i64 + 12 * a - 3;

    day as i64 + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4) - 32084
}

/// Proleptic Julian calendar date `(year, month, day)` of a Julian Day Number.
pub fn jdn_to_date(jdn: i64) -> (i32, u32, u32) {
    let c = jdn + 32083;
    let d = (4 * c + 3).div_euclid(1461);
    let e = c - (1461 * d).div_euclid(4);
    let m = (5 * e + 2).div_euclid(153);

    let day = e - (153 * m + 2).div_euclid(5) + 1;
    let month = m + 3 - 12 * (m / 10);
    let year = d - 4800 + m / 10;

    (year as i32, month as u32, day as u32)
}
