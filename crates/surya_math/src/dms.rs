//! Degree/minute/second representation of angles.

/// An angle split into degrees, arc-minutes and arc-seconds.
///
/// The sign applies to the whole value, never to a single component, so
/// -0°30′ is representable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dms {
    /// True for angles below zero.
    pub negative: bool,
    /// Whole degrees.
    pub degrees: u32,
    /// Arc-minutes (0..59).
    pub minutes: u32,
    /// Arc-seconds (0.0..60.0), may include fractional part.
    pub seconds: f64,
}

impl Dms {
    /// A non-negative DMS value.
    pub const fn new(degrees: u32, minutes: u32, seconds: f64) -> Self {
        Self {
            negative: false,
            degrees,
            minutes,
            seconds,
        }
    }

    /// Build from signed whole degrees; the sign of `degrees` is applied to
    /// the whole angle.
    pub fn from_signed(degrees: i32, minutes: u32, seconds: f64) -> Self {
        Self {
            negative: degrees < 0,
            degrees: degrees.unsigned_abs(),
            minutes,
            seconds,
        }
    }
}

/// Convert DMS back to decimal degrees.
pub fn dms_to_deg(dms: &Dms) -> f64 {
    let magnitude = dms.degrees as f64 + dms.minutes as f64 / 60.0 + dms.seconds / 3600.0;
    if dms.negative { -magnitude } else { magnitude }
}

/// Convert decimal degrees to DMS.
pub fn deg_to_dms(deg: f64) -> Dms {
    let d = deg.abs();
    let degrees = d.floor();
    let remainder = (d - degrees) * 60.0;
    let minutes = remainder.floor();
    let seconds = (remainder - minutes) * 60.0;
    Dms {
        negative: deg < 0.0,
        degrees: degrees as u32,
        minutes: minutes as u32,
        seconds,
    }
}

impl std::fmt::Display for Dms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.negative { "-" } else { "" };
        write!(
            f,
            "{sign}{}°{:02}′{:05.2}″",
            self.degrees, self.minutes, self.seconds
        )
    }
}
