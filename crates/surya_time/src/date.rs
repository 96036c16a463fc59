//! Validated proleptic Julian calendar date.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TimeError;
use crate::julian::{check_date, jdn_to_date, jdn_unchecked};

/// A civil date in the proleptic Julian calendar (astronomical year numbering).
///
/// Every constructor (including deserialization) validates the month and
/// day, so a `CalendarDate` value is always a real calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawDate")]
pub struct CalendarDate {
    year: i32,
    month: u32,
    day: u32,
}

#[derive(Deserialize)]
struct RawDate {
    year: i32,
    month: u32,
    day: u32,
}

impl TryFrom<RawDate> for CalendarDate {
    type Error = TimeError;

    fn try_from(raw: RawDate) -> Result<Self, Self::Error> {
        Self::new(raw.year, raw.month, raw.day)
    }
}

impl CalendarDate {
    /// Validate and build a date.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, TimeError> {
        check_date(year, month, day)?;
        Ok(Self { year, month, day })
    }

    /// Date of a Julian Day Number.
    pub fn from_jdn(jdn: i64) -> Self {
        let (year, month, day) = jdn_to_date(jdn);
        Self { year, month, day }
    }

    /// Astronomical year (0 = 1 BCE).
    pub fn year(self) -> i32 {
        self.year
    }

    /// Month, 1..=12.
    pub fn month(self) -> u32 {
        self.month
    }

    /// Day of month.
    pub fn day(self) -> u32 {
        self.day
    }

    /// Julian Day Number of this date.
    pub fn jdn(self) -> i64 {
        jdn_unchecked(self.year, self.month, self.day)
    }
}

impl Display for CalendarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.year < 0 {
            write!(f, "-{:04}-{:02}-{:02}", -(self.year as i64), self.month, self.day)
        } else {
            write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
        }
    }
}

impl FromStr for CalendarDate {
    type Err = TimeError;

    /// Parse `YYYY-MM-DD`, with an optional leading `-` for years before 1 BCE.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let mut parts = body.split('-');
        let (Some(y), Some(m), Some(d), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TimeError::Parse(format!("expected YYYY-MM-DD, got '{s}'")));
        };

        let year: i32 = y
            .parse()
            .map_err(|_| TimeError::Parse(format!("invalid year '{y}'")))?;
        let month: u32 = m
            .parse()
            .map_err(|_| TimeError::Parse(format!("invalid month '{m}'")))?;
        let day: u32 = d
            .parse()
            .map_err(|_| TimeError::Parse(format!("invalid day '{d}'")))?;

        Self::new(if negative { -year } else { year }, month, day)
    }
}
