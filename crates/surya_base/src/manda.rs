//! First (manda) correction: equation of centre relative to the apogee.
//!
//! Work is done in arc-minutes against a sine table of radius 3438′. The
//! correction is positive for anomalies in (0°, 180°) and negative in
//! (180°, 360°); the signed sine alone carries the sign.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use surya_math::{arcmin_to_deg, deg_to_arcmin, normalize_360};
use tracing::{debug, warn};

use crate::body::{Body, SINE_RADIUS_ARCMIN};
use crate::correction_log::{
    Correction, CorrectionEntry, CorrectionSink, MandaInput, MandaOutput, Unit,
};
use crate::error::ModelError;

/// Anomaly from the apogee, in [0, 360).
pub fn manda_kendra(mean_longitude: f64, apogee: f64) -> f64 {
    normalize_360(mean_longitude - apogee)
}

/// Signed sine on the classical table, in arc-minutes.
pub fn siddhanta_sine_arcmin(angle_deg: f64) -> f64 {
    SINE_RADIUS_ARCMIN * angle_deg.to_radians().sin()
}

/// Correction term in degrees for an epicycle (degrees) and anomaly.
pub fn manda_phala_deg(epicycle_deg: f64, kendra: f64) -> f64 {
    let epicycle_arcmin = deg_to_arcmin(epicycle_deg);
    let jya = siddhanta_sine_arcmin(kendra);
    let phala_arcmin = epicycle_arcmin * jya / (360.0 * SINE_RADIUS_ARCMIN);
    arcmin_to_deg(phala_arcmin)
}

/// Outcome of the first correction for one body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MandaResult {
    pub body: Body,
    pub mean_longitude: f64,
    pub apogee: f64,
    pub epicycle_deg: f64,
    pub kendra: f64,
    /// Signed correction, degrees.
    pub phala: f64,
    pub true_longitude: f64,
}

/// Apply the first correction to `body`'s mean longitude.
///
/// Fails with [`ModelError::NotApplicable`] for bodies without an apogee
/// and epicycle (the lunar apogee and node).
pub fn apply_manda_correction(
    body: Body,
    mean_longitude: f64,
    sink: &mut dyn CorrectionSink,
) -> Result<MandaResult, ModelError> {
    let params = body.manda_params()?;
    let kendra = manda_kendra(mean_longitude, params.apogee_deg);
    let phala = manda_phala_deg(params.epicycle_deg, kendra);
    let true_longitude = normalize_360(mean_longitude + phala);
    debug!(body = %body, kendra, phala, true_longitude, "manda correction");

    if sink.is_enabled() {
        sink.record(
            CorrectionEntry::new(
                body.name(),
                Correction::MandaCorrection {
                    input_values: MandaInput {
                        mean_longitude,
                        apogee: params.apogee_deg,
                        epicycle_deg: params.epicycle_deg,
                        kendra,
                    },
                    output_values: MandaOutput {
                        phala,
                        true_longitude,
                    },
                },
                Unit::Degrees,
            )
            .with_metadata("correction_sign", "automatic_via_sine"),
        );
    }

    Ok(MandaResult {
        body,
        mean_longitude,
        apogee: params.apogee_deg,
        epicycle_deg: params.epicycle_deg,
        kendra,
        phala,
        true_longitude,
    })
}

/// Sign of a correction term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    /// Zero counts as negative, so a vanishing correction never passes
    /// a "positive" case.
    pub fn of(value: f64) -> Self {
        if value > 0.0 {
            Self::Positive
        } else {
            Self::Negative
        }
    }
}

impl Display for Sign {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => f.write_str("positive"),
            Self::Negative => f.write_str("negative"),
        }
    }
}

/// One synthetic anomaly and the sign its correction must have.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignCase {
    pub description: String,
    pub mean_longitude: f64,
    pub apogee: f64,
    pub kendra: f64,
    pub phala: f64,
    pub expected: Sign,
    pub actual: Sign,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MandaSelfTest {
    pub cases: Vec<SignCase>,
    pub all_correct: bool,
}

/// Epicycle used by the sign test (the Moon's 31°30′).
const SELF_TEST_EPICYCLE_DEG: f64 = 31.5;

/// Check the correction sign on both sides of the apogee.
pub fn manda_sign_self_test() -> MandaSelfTest {
    const CASES: [(f64, Sign, &str); 4] = [
        (10.0, Sign::Positive, "just after apogee"),
        (350.0, Sign::Negative, "just before apogee"),
        (90.0, Sign::Positive, "quadrant after apogee"),
        (270.0, Sign::Negative, "quadrant before apogee"),
    ];
    let apogee = 0.0;

    let cases: Vec<SignCase> = CASES
        .iter()
        .map(|&(mean_longitude, expected, description)| {
            let kendra = manda_kendra(mean_longitude, apogee);
            let phala = manda_phala_deg(SELF_TEST_EPICYCLE_DEG, kendra);
            let actual = Sign::of(phala);
            let correct = actual == expected;
            if !correct {
                warn!(kendra, phala, %expected, %actual, "manda sign case failed");
            }
            SignCase {
                description: description.to_string(),
                mean_longitude,
                apogee,
                kendra,
                phala,
                expected,
                actual,
                correct,
            }
        })
        .collect();

    let all_correct = cases.iter().all(|c| c.correct);
    MandaSelfTest { cases, all_correct }
}
