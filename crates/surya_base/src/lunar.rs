//! Lunar theory: latitude, tithi and eclipse conditions.

use serde::{Deserialize, Serialize};
use surya_math::{circular_distance, normalize_360};
use tracing::debug;

use crate::config::LunarLimits;
use crate::correction_log::{
    Correction, CorrectionSink, EclipseInput, LunarLatitudeInput, TithiInput, Unit,
};

/// Degrees of elongation per tithi.
pub const TITHI_SPAN_DEG: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LunarLatitude {
    /// Signed ecliptic latitude, degrees.
    pub latitude: f64,
    /// Moon minus node, in [0, 360).
    pub argument: f64,
    pub max_inclination: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TithiInfo {
    /// Moon minus Sun, in [0, 360).
    pub elongation: f64,
    pub tithi_decimal: f64,
    /// 1..=30.
    pub tithi_number: u32,
    /// Completed fraction of the current tithi, in [0, 1).
    pub tithi_fraction: f64,
    pub time_to_next_tithi_days: f64,
    pub time_to_next_tithi_hours: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EclipseKind {
    Solar,
    Lunar,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EclipseCheck {
    pub kind: EclipseKind,
    pub eclipse_occurring: bool,
    /// In [0, 1]; zero unless an eclipse occurs.
    pub magnitude: f64,
    /// Distance from conjunction (solar) or opposition (lunar).
    pub elongation: f64,
    pub node_distance: f64,
    /// New moon for solar checks, full moon for lunar.
    pub is_syzygy: bool,
    pub is_near_node: bool,
    pub moon_latitude: f64,
}

/// Lunar computations under a set of limits.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LunarTheory {
    limits: LunarLimits,
}

impl LunarTheory {
    pub fn new(limits: LunarLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &LunarLimits {
        &self.limits
    }

    /// β = i · sin(λ_moon − λ_node).
    pub fn latitude(
        &self,
        moon_longitude: f64,
        node_longitude: f64,
        sink: &mut dyn CorrectionSink,
    ) -> LunarLatitude {
        let argument = normalize_360(moon_longitude - node_longitude);
        let result = LunarLatitude {
            latitude: self.limits.max_inclination_deg * argument.to_radians().sin(),
            argument,
            max_inclination: self.limits.max_inclination_deg,
        };
        debug!(argument, latitude = result.latitude, "lunar latitude");

        sink.log(
            "Moon",
            Correction::LunarLatitude {
                input_values: LunarLatitudeInput {
                    moon_longitude,
                    node_longitude,
                },
                output_values: result,
            },
            Unit::Degrees,
            None,
        );
        result
    }

    /// Current tithi and the time until the next one begins.
    pub fn tithi(
        &self,
        moon_longitude: f64,
        sun_longitude: f64,
        sink: &mut dyn CorrectionSink,
    ) -> TithiInfo {
        let elongation = normalize_360(moon_longitude - sun_longitude);
        let tithi_decimal = elongation / TITHI_SPAN_DEG;
        let whole = tithi_decimal.floor();
        let tithi_fraction = tithi_decimal - whole;
        let relative_motion = self.limits.moon_daily_motion_deg - self.limits.sun_daily_motion_deg;
        let days = (1.0 - tithi_fraction) * TITHI_SPAN_DEG / relative_motion;

        let result = TithiInfo {
            elongation,
            tithi_decimal,
            // elongation < 360 keeps this in 0..30
            tithi_number: whole as u32 + 1,
            tithi_fraction,
            time_to_next_tithi_days: days,
            time_to_next_tithi_hours: days * 24.0,
        };
        debug!(elongation, tithi = result.tithi_number, fraction = tithi_fraction, "tithi");

        sink.log(
            "Moon",
            Correction::Tithi {
                input_values: TithiInput {
                    moon_longitude,
                    sun_longitude,
                },
                output_values: result,
            },
            Unit::DegreesAndDays,
            None,
        );
        result
    }

    /// New moon near a node.
    pub fn solar_eclipse(
        &self,
        moon_longitude: f64,
        sun_longitude: f64,
        node_longitude: f64,
        moon_latitude: f64,
        sink: &mut dyn CorrectionSink,
    ) -> EclipseCheck {
        self.eclipse(
            EclipseKind::Solar,
            EclipseInput {
                moon_longitude,
                sun_longitude,
                node_longitude,
                moon_latitude,
            },
            sink,
        )
    }

    /// Full moon near a node.
    pub fn lunar_eclipse(
        &self,
        moon_longitude: f64,
        sun_longitude: f64,
        node_longitude: f64,
        moon_latitude: f64,
        sink: &mut dyn CorrectionSink,
    ) -> EclipseCheck {
        self.eclipse(
            EclipseKind::Lunar,
            EclipseInput {
                moon_longitude,
                sun_longitude,
                node_longitude,
                moon_latitude,
            },
            sink,
        )
    }

    fn eclipse(
        &self,
        kind: EclipseKind,
        input: EclipseInput,
        sink: &mut dyn CorrectionSink,
    ) -> EclipseCheck {
        let (target, node_limit) = match kind {
            EclipseKind::Solar => (input.sun_longitude, self.limits.solar_eclipse_limit_deg),
            EclipseKind::Lunar => (
                normalize_360(input.sun_longitude + 180.0),
                self.limits.lunar_eclipse_limit_deg,
            ),
        };
        let elongation = circular_distance(input.moon_longitude, target);
        let node_distance = circular_distance(input.moon_longitude, input.node_longitude);

        let is_syzygy = elongation <= self.limits.syzygy_threshold_deg;
        let is_near_node = node_distance <= node_limit
            || input.moon_latitude.abs() <= self.limits.eclipse_latitude_deg;
        let eclipse_occurring = is_syzygy && is_near_node;
        let magnitude = if eclipse_occurring {
            (1.0 - node_distance / node_limit).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let result = EclipseCheck {
            kind,
            eclipse_occurring,
            magnitude,
            elongation,
            node_distance,
            is_syzygy,
            is_near_node,
            moon_latitude: input.moon_latitude,
        };
        debug!(?kind, elongation, node_distance, eclipse_occurring, magnitude, "eclipse check");

        sink.log(
            "Moon",
            Correction::EclipseCheck {
                input_values: input,
                output_values: result,
            },
            Unit::Degrees,
            None,
        );
        result
    }
}
