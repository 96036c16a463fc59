//! Mean motion: uniform daily rates and mean longitudes.
//!
//! Daily rate = revolutions × 360 / civil days per Mahayuga. Elapsed days
//! are reduced modulo the body's own period before multiplying, so the
//! product stays small for day counts in the millions.

use serde::{Deserialize, Serialize};
use surya_math::{dms_to_deg, normalize_360, reduce_magnitude};
use tracing::{debug, trace};

use crate::body::{ALL_BODIES, Body, CIVIL_DAYS_IN_MAHAYUGA};
use crate::correction_log::{
    Correction, CorrectionSink, DailyMotionInput, DailyMotionOutput, MeanMotionInput,
    MeanMotionOutput, Unit,
};
use crate::modern::modern_sidereal_period_days;

/// Per-body daily rates, periods and epoch longitudes, computed once.
#[derive(Debug, Clone, PartialEq)]
pub struct MeanMotion {
    daily_motion: [f64; 9],
    period_days: [f64; 9],
    initial_longitude: [f64; 9],
}

/// Model rate and period against a modern sidereal period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModernComparison {
    pub body: Body,
    pub ss_daily_motion: f64,
    pub modern_daily_motion: f64,
    pub ss_period: f64,
    pub modern_period: f64,
    /// Absolute daily-rate difference, degrees/day.
    pub daily_motion_error: f64,
    /// Absolute period difference, days.
    pub period_error: f64,
}

impl Default for MeanMotion {
    fn default() -> Self {
        Self::new()
    }
}

impl MeanMotion {
    pub fn new() -> Self {
        let civil_days = CIVIL_DAYS_IN_MAHAYUGA as f64;
        let mut daily_motion = [0.0; 9];
        let mut period_days = [0.0; 9];
        let mut initial_longitude = [0.0; 9];
        for body in ALL_BODIES {
            let p = body.params();
            let revs = p.revolutions as f64;
            let i = body.index();
            daily_motion[i] = revs * 360.0 / civil_days;
            period_days[i] = civil_days / revs;
            initial_longitude[i] = dms_to_deg(&p.initial_longitude);
        }
        Self {
            daily_motion,
            period_days,
            initial_longitude,
        }
    }

    /// Build the table and record it as one `daily_motion` entry.
    pub fn with_log(sink: &mut dyn CorrectionSink) -> Self {
        let mm = Self::new();
        if sink.is_enabled() {
            let daily_motions = ALL_BODIES
                .iter()
                .map(|&b| (b, mm.daily_motion(b)))
                .collect();
            sink.log(
                "ALL",
                Correction::DailyMotion {
                    input_values: DailyMotionInput {
                        civil_days_mahayuga: CIVIL_DAYS_IN_MAHAYUGA,
                    },
                    output_values: DailyMotionOutput { daily_motions },
                },
                Unit::DegreesPerDay,
                None,
            );
        }
        mm
    }

    /// Degrees per civil day.
    pub fn daily_motion(&self, body: Body) -> f64 {
        self.daily_motion[body.index()]
    }

    /// Days per sidereal revolution.
    pub fn period_days(&self, body: Body) -> f64 {
        self.period_days[body.index()]
    }

    /// Longitude at the epoch, degrees.
    pub fn initial_longitude(&self, body: Body) -> f64 {
        self.initial_longitude[body.index()]
    }

    /// Mean longitude after `ahargana` days, in [0, 360).
    pub fn mean_longitude(&self, body: Body, ahargana: f64, sink: &mut dyn CorrectionSink) -> f64 {
        let i = body.index();
        let reduced = reduce_magnitude(ahargana, self.period_days[i]);
        let mean = normalize_360(self.initial_longitude[i] + self.daily_motion[i] * reduced);
        trace!(body = %body, ahargana, reduced, "ahargana reduced by period");
        debug!(body = %body, mean_longitude = mean, "mean motion");

        sink.log_body(
            body,
            Correction::MeanMotion {
                input_values: MeanMotionInput {
                    ahargana,
                    reduced_ahargana: reduced,
                    daily_motion: self.daily_motion[i],
                    initial_longitude: self.initial_longitude[i],
                },
                output_values: MeanMotionOutput {
                    mean_longitude: mean,
                },
            },
            Unit::Degrees,
        );
        mean
    }

    /// Compare against independently tabulated modern sidereal periods.
    ///
    /// Bodies without a modern value are skipped.
    pub fn compare_with_modern(&self) -> Vec<ModernComparison> {
        ALL_BODIES
            .iter()
            .filter_map(|&body| {
                let modern_period = modern_sidereal_period_days(body)?;
                let ss_daily_motion = self.daily_motion(body);
                let ss_period = self.period_days(body);
                let modern_daily_motion = 360.0 / modern_period;
                Some(ModernComparison {
                    body,
                    ss_daily_motion,
                    modern_daily_motion,
                    ss_period,
                    modern_period,
                    daily_motion_error: (ss_daily_motion - modern_daily_motion).abs(),
                    period_error: (ss_period - modern_period).abs(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correction_log::{CorrectionKind, CorrectionLog, NullSink};

    #[test]
    fn sun_rate_is_about_one_degree() {
        let mm = MeanMotion::new();
        let rate = mm.daily_motion(Body::Sun);
        assert!((rate - 0.985_6).abs() < 1e-3);
        assert!((mm.period_days(Body::Sun) - 365.258_681).abs() < 1e-5);
    }

    #[test]
    fn rate_times_period_is_full_turn() {
        let mm = MeanMotion::new();
        for b in ALL_BODIES {
            assert!((mm.daily_motion(b) * mm.period_days(b) - 360.0).abs() < 1e-9);
        }
    }

    #[test]
    fn epoch_gives_initial_longitudes() {
        let mm = MeanMotion::new();
        let mut sink = NullSink;
        assert!(mm.mean_longitude(Body::Sun, 0.0, &mut sink).abs() < 1e-12);
        let mars = mm.mean_longitude(Body::Mars, 0.0, &mut sink);
        assert!((mars - 164.192_777_778).abs() < 1e-6);
        let apogee = mm.mean_longitude(Body::MoonApogee, 0.0, &mut sink);
        assert!((apogee - 80.0).abs() < 1e-12);
    }

    #[test]
    fn one_full_period_returns_to_start() {
        let mm = MeanMotion::new();
        let mut sink = NullSink;
        let p = mm.period_days(Body::Jupiter);
        let a = mm.mean_longitude(Body::Jupiter, 1000.0, &mut sink);
        let b = mm.mean_longitude(Body::Jupiter, 1000.0 + p, &mut sink);
        let d = surya_math::circular_distance(a, b);
        assert!(d < 1e-6, "drift {d}");
    }

    #[test]
    fn negative_ahargana_stays_normalized() {
        let mm = MeanMotion::new();
        let lon = mm.mean_longitude(Body::Moon, -12_345.5, &mut NullSink);
        assert!((0.0..360.0).contains(&lon));
    }

    #[test]
    fn modern_comparison_is_independent() {
        let rows = MeanMotion::new().compare_with_modern();
        assert_eq!(rows.len(), 7);
        for r in rows {
            assert!(r.daily_motion_error > 0.0, "{}", r.body);
            assert!(r.period_error > 0.0, "{}", r.body);
        }
    }

    #[test]
    fn logging() {
        let mut log = CorrectionLog::new();
        let mm = MeanMotion::with_log(&mut log);
        mm.mean_longitude(Body::Venus, 100.0, &mut log);
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].kind(), CorrectionKind::DailyMotion);
        assert_eq!(log.entries()[0].body, "ALL");
        assert_eq!(log.entries()[1].kind(), CorrectionKind::MeanMotion);
        assert_eq!(log.entries()[1].body, "Venus");
    }
}
