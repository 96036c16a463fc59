//! The Kali Yuga epoch and Ahargana (elapsed civil days).

use serde::Serialize;

use crate::date::CalendarDate;
use crate::error::TimeError;
use crate::julian::{jdn_from_date, jdn_to_date};

/// Kali Yuga epoch: proleptic Julian 3102 BCE February 18 (astronomical year -3101).
pub const KALI_YUGA_EPOCH: (i32, u32, u32) = (-3101, 2, 18);

/// Julian Day Number of [`KALI_YUGA_EPOCH`].
pub const KALI_YUGA_EPOCH_JDN: i64 = 588_465;

/// Dates whose date → JDN → date reconstruction is checked by [`epoch_self_check`].
pub const ROUNDTRIP_SAMPLES: [(i32, u32, u32); 8] = [
    KALI_YUGA_EPOCH,
    (-3101, 2, 17),
    (-1000, 3, 1),
    (0, 2, 29),
    (1, 1, 1),
    (1582, 10, 4),
    (2000, 1, 1),
    (2024, 1, 1),
];

/// Days elapsed since the Kali Yuga epoch at the start of the given civil day.
///
/// This is the single source of elapsed time for every longitude computation.
pub fn ahargana(year: i32, month: u32, day: u32) -> Result<f64, TimeError> {
    let jdn = jdn_from_date(year, month, day)?;
    Ok((jdn - KALI_YUGA_EPOCH_JDN) as f64)
}

/// [`ahargana`] for an already validated date.
pub fn ahargana_for_date(date: CalendarDate) -> f64 {
    (date.jdn() - KALI_YUGA_EPOCH_JDN) as f64
}

/// Outcome of the epoch self-check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpochCheck {
    /// The fixed epoch JDN constant.
    pub epoch_jdn: i64,
    /// JDN recomputed from the epoch's calendar date.
    pub computed_epoch_jdn: i64,
    /// Calendar date reconstructed from the epoch JDN.
    pub reconstructed_epoch: (i32, u32, u32),
    /// Ahargana at the epoch date (must be 0).
    pub epoch_ahargana: f64,
    /// Sample dates that did not survive date → JDN → date.
    pub roundtrip_failures: Vec<(i32, u32, u32)>,
    /// True when every check held.
    pub passed: bool,
}

/// Verify the epoch constant against the calendar arithmetic.
///
/// Checks that the epoch date maps to [`KALI_YUGA_EPOCH_JDN`] and back, that
/// Ahargana at the epoch is zero, and that every date in
/// [`ROUNDTRIP_SAMPLES`] reconstructs exactly.
pub fn epoch_self_check() -> Result<EpochCheck, TimeError> {
    let (y, m, d) = KALI_YUGA_EPOCH;
    let computed_epoch_jdn = jdn_from_date(y, m, d)?;
    let reconstructed_epoch = jdn_to_date(KALI_YUGA_EPOCH_JDN);
    let epoch_ahargana = ahargana(y, m, d)?;

    let mut roundtrip_failures = Vec::new();
    for &(sy, sm, sd) in &ROUNDTRIP_SAMPLES {
        let jdn = jdn_from_date(sy, sm, sd)?;
        if jdn_to_date(jdn) != (sy, sm, sd) {
            roundtrip_failures.push((sy, sm, sd));
        }
    }

    let passed = computed_epoch_jdn == KALI_YUGA_EPOCH_JDN
        && reconstructed_epoch == KALI_YUGA_EPOCH
        && epoch_ahargana.abs() < 1e-6
        && roundtrip_failures.is_empty();

    Ok(EpochCheck {
        epoch_jdn: KALI_YUGA_EPOCH_JDN,
        computed_epoch_jdn,
        reconstructed_epoch,
        epoch_ahargana,
        roundtrip_failures,
        passed,
    })
}
