//! Modern sidereal periods used to cross-check the model.
//!
//! These values come from present-day astronomical almanacs and are kept
//! apart from [`crate::body::BODY_PARAMS`] on purpose: nothing here is
//! derived from the Mahayuga revolution counts, so a comparison against
//! them measures the model rather than restating it.

use crate::body::Body;

/// Modern sidereal period in days, where one is tabulated.
pub const fn modern_sidereal_period_days(body: Body) -> Option<f64> {
    match body {
        // sidereal year
        Body::Sun => Some(365.256_363),
        // sidereal month
        Body::Moon => Some(27.321_661),
        Body::Mercury => Some(87.969_257),
        Body::Venus => Some(224.700_8),
        Body::Mars => Some(686.98),
        Body::Jupiter => Some(4332.59),
        Body::Saturn => Some(10_746.94),
        Body::MoonApogee | Body::MoonNode => None,
    }
}
