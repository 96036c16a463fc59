//! Second (sighra) correction: the geocentric adjustment relative to the Sun.
//!
//! The Sun-body-Earth triangle is solved with the law of cosines on a
//! radius of 3438′ and the body's sighra epicycle in arc-minutes. Outer
//! bodies add the correction to their first-corrected longitude. Inner
//! bodies use the Sun's longitude as base instead, a simplification kept
//! as is and flagged `is_approximate`.

use serde::{Deserialize, Serialize};
use surya_math::{deg_to_arcmin, normalize_360};
use tracing::debug;

use crate::body::{Body, BodyClass, SINE_RADIUS_ARCMIN};
use crate::correction_log::{Correction, CorrectionEntry, CorrectionSink, SighraInput, Unit};
use crate::error::ModelError;

/// Sighra anomaly for the body class, in [0, 360).
pub fn sighra_kendra(class: BodyClass, body_longitude: f64, sun_longitude: f64) -> f64 {
    match class {
        BodyClass::Outer => normalize_360(body_longitude - sun_longitude),
        BodyClass::Inner => normalize_360(sun_longitude - body_longitude),
    }
}

/// Hypotenuse (karna) in arc-minutes.
pub fn sighra_karna(epicycle_deg: f64, kendra: f64) -> f64 {
    let r = SINE_RADIUS_ARCMIN;
    let p = deg_to_arcmin(epicycle_deg);
    (r * r + p * p + 2.0 * r * p * kendra.to_radians().cos()).sqrt()
}

/// Correction angle in degrees. The arcsine argument is clamped to [-1, 1].
pub fn sighra_phala_deg(epicycle_deg: f64, kendra: f64, karna: f64) -> f64 {
    let p = deg_to_arcmin(epicycle_deg);
    let arg = (p * kendra.to_radians().sin() / karna).clamp(-1.0, 1.0);
    arg.asin().to_degrees()
}

/// Outcome of the second correction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SighraResult {
    pub body: Body,
    pub class: BodyClass,
    pub first_corrected_longitude: f64,
    pub sun_longitude: f64,
    pub kendra: f64,
    /// Arc-minutes.
    pub karna: f64,
    pub phala: f64,
    pub true_longitude: f64,
    /// Set for inner bodies, whose final longitude is Sun-based.
    pub is_approximate: bool,
}

/// Apply the second correction.
///
/// `sun_longitude` is the Sun's first-corrected longitude. Fails with
/// [`ModelError::NotApplicable`] for bodies without a sighra epicycle.
pub fn apply_sighra_correction(
    body: Body,
    first_corrected_longitude: f64,
    sun_longitude: f64,
    sink: &mut dyn CorrectionSink,
) -> Result<SighraResult, ModelError> {
    let params = body.sighra_params()?;
    let kendra = sighra_kendra(params.class, first_corrected_longitude, sun_longitude);
    let karna = sighra_karna(params.epicycle_deg, kendra);
    let phala = sighra_phala_deg(params.epicycle_deg, kendra, karna);

    let (true_longitude, is_approximate) = match params.class {
        BodyClass::Outer => (normalize_360(first_corrected_longitude + phala), false),
        BodyClass::Inner => (normalize_360(sun_longitude + phala), true),
    };
    debug!(
        body = %body,
        class = %params.class,
        kendra,
        karna,
        phala,
        true_longitude,
        "sighra correction"
    );

    let result = SighraResult {
        body,
        class: params.class,
        first_corrected_longitude,
        sun_longitude,
        kendra,
        karna,
        phala,
        true_longitude,
        is_approximate,
    };

    if sink.is_enabled() {
        sink.record(
            CorrectionEntry::new(
                body.name(),
                Correction::SighraCorrection {
                    input_values: SighraInput {
                        first_corrected_longitude,
                        sun_longitude,
                        class: params.class,
                        kendra,
                    },
                    output_values: result,
                },
                Unit::Degrees,
            )
            .with_metadata("formula", "law_of_cosines"),
        );
    }
    Ok(result)
}
