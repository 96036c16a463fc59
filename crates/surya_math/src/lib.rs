//! Angle arithmetic for the siddhantic planetary pipeline.
//!
//! This crate provides:
//! - Normalization and circular statistics on the ecliptic circle
//! - Degree ⇄ arc-minute and degree ⇄ DMS conversions
//! - Exact great-circle separation between two ecliptic points
//! - A numerically stable 3-point extremum interpolator
//!
//! Everything here is a pure function of its inputs. Angles are `f64`
//! degrees unless a name says otherwise.

pub mod angle;
pub mod dms;
pub mod interpolate;
pub mod spherical;

pub use angle::{
    CircularMean, arcmin_to_deg, circular_distance, circular_mean, deg_to_arcmin, normalize_360,
    normalize_to_pm180, reduce_magnitude,
};
pub use dms::{Dms, deg_to_dms, dms_to_deg};
pub use interpolate::{DEGENERACY_EPS, refine_extremum_time};
pub use spherical::great_circle_separation_deg;
