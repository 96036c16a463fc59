//! Calendar arithmetic and the elapsed-day time basis.
//!
//! This crate provides:
//! - Proleptic Julian calendar dates (astronomical year numbering)
//! - Date ⇄ Julian Day Number conversion
//! - Ahargana: whole days elapsed since the Kali Yuga epoch
//! - An epoch self-check used by model validation
//!
//! [`ahargana`] is the only place elapsed time is derived from a calendar
//! date. Downstream computations accept an Ahargana value, never a date.

pub mod date;
pub mod epoch;
pub mod error;
pub mod julian;

pub use date::CalendarDate;
pub use epoch::{
    EpochCheck, KALI_YUGA_EPOCH, KALI_YUGA_EPOCH_JDN, ROUNDTRIP_SAMPLES, ahargana,
    ahargana_for_date, epoch_self_check,
};
pub use error::TimeError;
pub use julian::{days_in_month, is_julian_leap_year, jdn_from_date, jdn_to_date};
