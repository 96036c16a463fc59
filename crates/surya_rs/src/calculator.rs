//! The calculator: one mean-motion table, one correction sink, one cache.

use std::collections::HashMap;
use std::path::Path;

use surya_base::correction_log::{AharganaInput, AharganaOutput};
use surya_base::{
    Body, BodyPosition, CONJUNCTION_BODIES, ConjunctionAnalyzer, Correction, CorrectionLog,
    CorrectionSink, LogSummary, LunarTheory, MeanMotion, ModelConfig, ModelError, Stage,
    SighraResult, Unit, apply_manda_correction, apply_sighra_correction, manda_sign_self_test,
};
use surya_time::{CalendarDate, ahargana_for_date, epoch_self_check};
use tracing::{debug, info, warn};

use crate::results::{ConjunctionReport, LunarPhenomena, PositionResult};
use crate::validation::{PositionCheck, REFERENCE_DATES, ValidationReport};

/// Computes positions and analyses, recording every step to its sink.
///
/// The sink defaults to an in-memory [`CorrectionLog`]. Use
/// [`Calculator::with_sink`] to stream entries elsewhere or drop them.
///
/// A calculator is not shared across threads; wrap it in a lock if needed.
#[derive(Debug)]
pub struct Calculator<S: CorrectionSink = CorrectionLog> {
    config: ModelConfig,
    mean_motion: MeanMotion,
    lunar: LunarTheory,
    conjunctions: ConjunctionAnalyzer,
    sink: S,
    cache: HashMap<(Body, CalendarDate), PositionResult>,
}

impl Calculator<CorrectionLog> {
    /// Default limits, in-memory log.
    pub fn new() -> Self {
        Self::build(ModelConfig::default(), CorrectionLog::new())
    }

    /// Custom limits, in-memory log.
    pub fn with_config(config: ModelConfig) -> Result<Self, ModelError> {
        Self::with_sink(config, CorrectionLog::new())
    }

    /// Write the log as JSON lines, replacing `path`.
    pub fn save_log(&self, path: impl AsRef<Path>) -> Result<(), ModelError> {
        self.sink.save_jsonl(path)
    }

    pub fn log(&self) -> &CorrectionLog {
        &self.sink
    }

    pub fn log_summary(&self) -> LogSummary {
        self.sink.summary()
    }

    pub fn clear_log(&mut self) {
        self.sink.clear();
    }
}

impl Default for Calculator<CorrectionLog> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: CorrectionSink> Calculator<S> {
    /// Custom limits and sink. Fails on an invalid configuration.
    pub fn with_sink(config: ModelConfig, sink: S) -> Result<Self, ModelError> {
        config.validate().map_err(ModelError::InvalidConfig)?;
        Ok(Self::build(config, sink))
    }

    fn build(config: ModelConfig, mut sink: S) -> Self {
        let mean_motion = MeanMotion::with_log(&mut sink);
        Self {
            config,
            mean_motion,
            lunar: LunarTheory::new(config.lunar),
            conjunctions: ConjunctionAnalyzer::new(config.conjunction),
            sink,
            cache: HashMap::new(),
        }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn mean_motion(&self) -> &MeanMotion {
        &self.mean_motion
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Mean longitude after `ahargana` days.
    pub fn mean_longitude(&mut self, body: Body, ahargana: f64) -> f64 {
        self.mean_motion.mean_longitude(body, ahargana, &mut self.sink)
    }

    /// First-corrected longitude from a mean longitude.
    pub fn first_correction(&mut self, body: Body, mean_longitude: f64) -> Result<f64, ModelError> {
        Ok(apply_manda_correction(body, mean_longitude, &mut self.sink)?.true_longitude)
    }

    /// Second correction of a first-corrected longitude against the Sun's.
    pub fn second_correction(
        &mut self,
        body: Body,
        corrected_longitude: f64,
        sun_longitude: f64,
    ) -> Result<SighraResult, ModelError> {
        apply_sighra_correction(body, corrected_longitude, sun_longitude, &mut self.sink)
    }

    /// Full position of `body` on a proleptic Julian date.
    pub fn position(
        &mut self,
        body: Body,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<PositionResult, ModelError> {
        let date = CalendarDate::new(year, month, day)?;
        self.position_on(body, date)
    }

    /// Full position of `body` on an already validated date.
    pub fn position_on(&mut self, body: Body, date: CalendarDate) -> Result<PositionResult, ModelError> {
        let ahargana = self.ahargana(body, date);
        let mean_longitude = self.mean_longitude(body, ahargana);

        let mut corrections_applied = vec![Stage::MeanMotion];
        let mut manda_corrected = mean_longitude;
        if body.params().manda.is_some() {
            manda_corrected = self.first_correction(body, mean_longitude)?;
            corrections_applied.push(Stage::FirstCorrection);
        }

        let mut sighra = None;
        if body.params().sighra.is_some() {
            let sun_mean = self.mean_longitude(Body::Sun, ahargana);
            let sun = self.first_correction(Body::Sun, sun_mean)?;
            sighra = Some(self.second_correction(body, manda_corrected, sun)?);
            corrections_applied.push(Stage::SecondCorrection);
        }

        let result = PositionResult {
            body,
            date,
            ahargana,
            mean_longitude,
            manda_corrected,
            true_longitude: sighra.map_or(manda_corrected, |s| s.true_longitude),
            corrections_applied,
            is_approximate: sighra.is_some_and(|s| s.is_approximate),
            sighra,
        };
        debug!(body = %body, %date, true_longitude = result.true_longitude, "position");
        self.cache.insert((body, date), result.clone());
        Ok(result)
    }

    fn ahargana(&mut self, body: Body, date: CalendarDate) -> f64 {
        let ahargana = ahargana_for_date(date);
        self.sink.log(
            body.name(),
            Correction::Ahargana {
                input_values: AharganaInput { date },
                output_values: AharganaOutput {
                    jdn: date.jdn(),
                    ahargana,
                },
            },
            Unit::Days,
            None,
        );
        ahargana
    }

    /// Latitude, tithi and eclipse conditions from the Moon, Sun and node.
    pub fn lunar_phenomena(
        &mut self,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<LunarPhenomena, ModelError> {
        let date = CalendarDate::new(year, month, day)?;
        let moon = self.position_on(Body::Moon, date)?.true_longitude;
        let sun = self.position_on(Body::Sun, date)?.true_longitude;
        let node = self.position_on(Body::MoonNode, date)?.true_longitude;

        let sink = &mut self.sink;
        let latitude = self.lunar.latitude(moon, node, sink);
        let tithi = self.lunar.tithi(moon, sun, sink);
        let solar_eclipse = self.lunar.solar_eclipse(moon, sun, node, latitude.latitude, sink);
        let lunar_eclipse = self.lunar.lunar_eclipse(moon, sun, node, latitude.latitude, sink);

        Ok(LunarPhenomena {
            date,
            moon_longitude: moon,
            sun_longitude: sun,
            node_longitude: node,
            latitude,
            tithi,
            solar_eclipse,
            lunar_eclipse,
        })
    }

    /// Pairwise conjunctions, aspects and grouping of the seven classical
    /// bodies. Latitudes are taken as zero.
    pub fn conjunctions(
        &mut self,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<ConjunctionReport, ModelError> {
        let date = CalendarDate::new(year, month, day)?;
        let positions = CONJUNCTION_BODIES
            .iter()
            .map(|&body| {
                self.position_on(body, date)
                    .map(|p| BodyPosition::new(body, p.true_longitude))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let pairs = self.conjunctions.analyze_all(&positions, &mut self.sink);
        let group = self.conjunctions.check_group(&positions, &mut self.sink);
        Ok(ConjunctionReport {
            date,
            positions,
            pairs,
            group,
        })
    }

    /// Run every self-check.
    ///
    /// A failed epoch or calendar round-trip check is an
    /// [`ModelError::InvariantViolation`]. The other sections are returned
    /// for inspection.
    pub fn validate(&mut self) -> Result<ValidationReport, ModelError> {
        let epoch = epoch_self_check()?;
        if !epoch.passed {
            return Err(ModelError::InvariantViolation(format!(
                "epoch check failed: ahargana at epoch {}, {} round-trip failures",
                epoch.epoch_ahargana,
                epoch.roundtrip_failures.len()
            )));
        }

        let mean_motion = self.mean_motion.compare_with_modern();
        let manda_physics = manda_sign_self_test();
        if !manda_physics.all_correct {
            warn!("first correction sign self-test failed");
        }

        let mut positions = Vec::with_capacity(REFERENCE_DATES.len());
        for (year, month, day, description) in REFERENCE_DATES {
            let date = CalendarDate::new(year, month, day)?;
            positions.push(PositionCheck {
                description,
                date,
                sun_longitude: self.position_on(Body::Sun, date)?.true_longitude,
                moon_longitude: self.position_on(Body::Moon, date)?.true_longitude,
            });
        }

        let report = ValidationReport {
            epoch,
            mean_motion,
            manda_physics,
            positions,
        };
        info!(passed = report.passed(), "validation complete");
        Ok(report)
    }

    /// Most recent result for `(body, date)`, if computed this session.
    pub fn cached_position(&self, body: Body, date: CalendarDate) -> Option<&PositionResult> {
        self.cache.get(&(body, date))
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surya_base::{CorrectionKind, NullSink};

    #[test]
    fn new_logs_daily_motion_table() {
        let calc = Calculator::new();
        assert_eq!(calc.log().len(), 1);
        assert_eq!(calc.log().entries()[0].kind(), CorrectionKind::DailyMotion);
    }

    #[test]
    fn stages_by_body_class() {
        let mut calc = Calculator::new();
        let sun = calc.position(Body::Sun, 2000, 1, 1).unwrap();
        assert_eq!(sun.corrections_applied, [Stage::MeanMotion, Stage::FirstCorrection]);
        assert!(sun.sighra.is_none());

        let mars = calc.position(Body::Mars, 2000, 1, 1).unwrap();
        assert_eq!(mars.corrections_applied.len(), 3);
        assert!(!mars.is_approximate);

        let venus = calc.position(Body::Venus, 2000, 1, 1).unwrap();
        assert!(venus.is_approximate);

        let node = calc.position(Body::MoonNode, 2000, 1, 1).unwrap();
        assert_eq!(node.corrections_applied, [Stage::MeanMotion]);
        assert_eq!(node.true_longitude, node.mean_longitude);
    }

    #[test]
    fn position_logs_ahargana_first() {
        let mut calc = Calculator::new();
        calc.clear_log();
        calc.position(Body::Moon, 2024, 1, 15).unwrap();
        let kinds: Vec<_> = calc.log().entries().iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            [
                CorrectionKind::Ahargana,
                CorrectionKind::MeanMotion,
                CorrectionKind::MandaCorrection
            ]
        );
    }

    #[test]
    fn invalid_date_runs_nothing() {
        let mut calc = Calculator::new();
        calc.clear_log();
        assert!(matches!(
            calc.position(Body::Sun, 2024, 2, 30),
            Err(ModelError::Time(_))
        ));
        assert!(calc.log().is_empty());
        assert_eq!(calc.cache_len(), 0);
    }

    #[test]
    fn cache_keeps_last_result() {
        let mut calc = Calculator::new();
        let date = CalendarDate::new(2024, 1, 1).unwrap();
        let first = calc.position_on(Body::Jupiter, date).unwrap();
        assert_eq!(calc.cached_position(Body::Jupiter, date), Some(&first));
        calc.position_on(Body::Jupiter, date).unwrap();
        assert_eq!(calc.cache_len(), 1);
        calc.clear_cache();
        assert!(calc.cached_position(Body::Jupiter, date).is_none());
    }

    #[test]
    fn null_sink_calculator() {
        let mut calc = Calculator::with_sink(ModelConfig::default(), NullSink).unwrap();
        let p = calc.position(Body::Saturn, 2000, 1, 1).unwrap();
        assert!((0.0..360.0).contains(&p.true_longitude));
    }

    #[test]
    fn invalid_config_rejected() {
        let mut config = ModelConfig::default();
        config.conjunction.min_group_size = 0;
        assert!(matches!(
            Calculator::with_config(config),
            Err(ModelError::InvalidConfig(_))
        ));
    }
}
