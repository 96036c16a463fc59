//! Pairwise conjunctions, aspects and planetary groups.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use surya_math::{
    circular_distance, circular_mean, great_circle_separation_deg, normalize_360,
    refine_extremum_time,
};
use tracing::{debug, trace};

use crate::body::{Body, STAR_PLANETS};
use crate::config::ConjunctionLimits;
use crate::correction_log::{ConjunctionInput, Correction, CorrectionSink, GroupInput, Unit};

/// Longitude and latitude of one body at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    pub body: Body,
    pub longitude: f64,
    /// Zero when unknown.
    #[serde(default)]
    pub latitude: f64,
}

impl BodyPosition {
    pub fn new(body: Body, longitude: f64) -> Self {
        Self {
            body,
            longitude,
            latitude: 0.0,
        }
    }

    pub fn with_latitude(mut self, latitude: f64) -> Self {
        self.latitude = latitude;
        self
    }
}

/// Proximity of two bodies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairConjunction {
    pub bodies: [Body; 2],
    /// Great-circle separation, degrees.
    pub separation: f64,
    /// Unsigned circular longitude difference, in [0, 180].
    pub longitude_difference: f64,
    pub latitude_difference: f64,
    pub is_exact: bool,
    pub is_close: bool,
    /// Two star-planets within the war limits (graha yuddha).
    pub is_planetary_war: bool,
}

impl PairConjunction {
    pub fn label(&self) -> String {
        pair_label(self.bodies[0], self.bodies[1])
    }
}

/// Aspect between two bodies, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Configuration {
    Conjunction,
    Opposition,
    Quadrature,
    None,
}

impl Display for Configuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Conjunction => "Conjunction",
            Self::Opposition => "Opposition",
            Self::Quadrature => "Quadrature",
            Self::None => "None",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationCheck {
    pub configuration: Configuration,
    pub is_conjunction: bool,
    pub is_opposition: bool,
    pub is_quadrature: bool,
    pub longitude_difference: f64,
    pub separation: f64,
}

/// Everything found for one pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairAnalysis {
    pub body1: Body,
    pub body2: Body,
    pub conjunction: PairConjunction,
    pub configuration: ConfigurationCheck,
}

/// Outcome of group detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupResult {
    pub is_group: bool,
    pub group_size: usize,
    /// Smallest arc containing every body; absent when too few bodies.
    pub min_longitude_range: Option<f64>,
    pub group_limit: f64,
    /// Circular mean of the longitudes, when defined.
    pub center: Option<f64>,
    pub bodies: Vec<Body>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

fn pair_label(a: Body, b: Body) -> String {
    format!("{}-{}", a.name(), b.name())
}

/// Smallest arc that contains every angle.
///
/// Sorts the normalized angles, appends each shifted by a full turn, and
/// takes the narrowest window of `n` consecutive values. Handles groups
/// straddling 0°.
pub fn min_circular_span(longitudes: &[f64]) -> f64 {
    let n = longitudes.len();
    if n < 2 {
        return 0.0;
    }
    let mut sorted: Vec<f64> = longitudes.iter().map(|&l| normalize_360(l)).collect();
    sorted.sort_by(f64::total_cmp);
    let extended: Vec<f64> = sorted
        .iter()
        .copied()
        .chain(sorted.iter().map(|l| l + 360.0))
        .collect();

    (0..n)
        .map(|i| extended[i + n - 1] - extended[i])
        .fold(f64::INFINITY, f64::min)
}

/// Time of closest approach from three sampled separations.
pub fn refine_conjunction_time(times: [f64; 3], separations: [f64; 3]) -> f64 {
    refine_extremum_time(times, separations)
}

/// Conjunction, aspect and group detection under a set of limits.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConjunctionAnalyzer {
    limits: ConjunctionLimits,
}

impl ConjunctionAnalyzer {
    pub fn new(limits: ConjunctionLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &ConjunctionLimits {
        &self.limits
    }

    fn measure(&self, a: &BodyPosition, b: &BodyPosition) -> PairConjunction {
        let separation =
            great_circle_separation_deg(a.longitude, a.latitude, b.longitude, b.latitude);
        let longitude_difference = circular_distance(a.longitude, b.longitude);
        let latitude_difference = (a.latitude - b.latitude).abs();

        let is_exact = separation <= self.limits.exact_deg
            && latitude_difference <= self.limits.exact_deg;
        let is_close = separation <= self.limits.close_deg;
        let is_planetary_war = STAR_PLANETS.contains(&a.body)
            && STAR_PLANETS.contains(&b.body)
            && longitude_difference <= self.limits.planetary_war_longitude_deg
            && latitude_difference <= self.limits.planetary_war_latitude_deg;
        trace!(a = %a.body, b = %b.body, separation, longitude_difference, "pair measured");

        PairConjunction {
            bodies: [a.body, b.body],
            separation,
            longitude_difference,
            latitude_difference,
            is_exact,
            is_close,
            is_planetary_war,
        }
    }

    fn classify(&self, pair: &PairConjunction) -> ConfigurationCheck {
        let d = pair.longitude_difference;
        let is_conjunction = pair.is_exact;
        let is_opposition = (d - 180.0).abs() <= self.limits.opposition_tolerance_deg;
        let is_quadrature = (d - 90.0).abs() <= self.limits.quadrature_tolerance_deg;
        let configuration = if is_conjunction {
            Configuration::Conjunction
        } else if is_opposition {
            Configuration::Opposition
        } else if is_quadrature {
            Configuration::Quadrature
        } else {
            Configuration::None
        };
        ConfigurationCheck {
            configuration,
            is_conjunction,
            is_opposition,
            is_quadrature,
            longitude_difference: d,
            separation: pair.separation,
        }
    }

    fn log_pair(
        &self,
        a: &BodyPosition,
        b: &BodyPosition,
        pair: &PairConjunction,
        sink: &mut dyn CorrectionSink,
    ) {
        if pair.is_exact || pair.is_close {
            sink.log(
                &pair.label(),
                Correction::Conjunction {
                    input_values: conjunction_input(a, b),
                    output_values: *pair,
                },
                Unit::Degrees,
                None,
            );
        }
    }

    fn log_configuration(
        &self,
        a: &BodyPosition,
        b: &BodyPosition,
        check: &ConfigurationCheck,
        sink: &mut dyn CorrectionSink,
    ) {
        if check.configuration != Configuration::None {
            sink.log(
                &pair_label(a.body, b.body),
                Correction::Configuration {
                    input_values: conjunction_input(a, b),
                    output_values: *check,
                },
                Unit::Degrees,
                None,
            );
        }
    }

    /// Separation and conjunction flags for two bodies. Logged only when
    /// exact or close.
    pub fn check_pair(
        &self,
        a: &BodyPosition,
        b: &BodyPosition,
        sink: &mut dyn CorrectionSink,
    ) -> PairConjunction {
        let pair = self.measure(a, b);
        self.log_pair(a, b, &pair, sink);
        pair
    }

    /// Strongest aspect between two bodies. Logged unless `None`.
    pub fn check_configuration(
        &self,
        a: &BodyPosition,
        b: &BodyPosition,
        sink: &mut dyn CorrectionSink,
    ) -> ConfigurationCheck {
        let check = self.classify(&self.measure(a, b));
        self.log_configuration(a, b, &check, sink);
        check
    }

    /// Detect a cluster of bodies within the group span.
    pub fn check_group(
        &self,
        positions: &[BodyPosition],
        sink: &mut dyn CorrectionSink,
    ) -> GroupResult {
        let bodies: Vec<Body> = positions.iter().map(|p| p.body).collect();
        let group_limit = self.limits.group_span_deg;
        let min_size = self.limits.min_group_size;

        if positions.len() < min_size {
            return GroupResult {
                is_group: false,
                group_size: positions.len(),
                min_longitude_range: None,
                group_limit,
                center: None,
                bodies,
                reason: Some(format!("need at least {min_size} bodies")),
            };
        }

        let longitudes: Vec<f64> = positions.iter().map(|p| p.longitude).collect();
        let span = min_circular_span(&longitudes);
        let mean = circular_mean(&longitudes);
        let is_group = span <= group_limit;
        debug!(size = positions.len(), span, is_group, "planetary group");

        let result = GroupResult {
            is_group,
            group_size: positions.len(),
            min_longitude_range: Some(span),
            group_limit,
            center: mean.defined.then_some(mean.mean_deg),
            bodies,
            reason: None,
        };

        if is_group {
            sink.log(
                "GROUP",
                Correction::PlanetaryGroup {
                    input_values: GroupInput { longitudes },
                    output_values: result.clone(),
                },
                Unit::Degrees,
                None,
            );
        }
        result
    }

    /// Every unordered pair that is in conjunction or in an aspect.
    pub fn analyze_all(
        &self,
        positions: &[BodyPosition],
        sink: &mut dyn CorrectionSink,
    ) -> Vec<PairAnalysis> {
        let mut found = Vec::new();
        for (i, a) in positions.iter().enumerate() {
            for b in &positions[i + 1..] {
                let conjunction = self.measure(a, b);
                let configuration = self.classify(&conjunction);
                self.log_pair(a, b, &conjunction, sink);
                self.log_configuration(a, b, &configuration, sink);

                if conjunction.is_exact
                    || conjunction.is_close
                    || configuration.configuration != Configuration::None
                {
                    found.push(PairAnalysis {
                        body1: a.body,
                        body2: b.body,
                        conjunction,
                        configuration,
                    });
                }
            }
        }
        debug!(pairs = found.len(), "conjunction analysis");
        found
    }
}

fn conjunction_input(a: &BodyPosition, b: &BodyPosition) -> ConjunctionInput {
    ConjunctionInput {
        longitude1: a.longitude,
        latitude1: a.latitude,
        longitude2: b.longitude,
        latitude2: b.latitude,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correction_log::{CorrectionKind, CorrectionLog, NullSink};

    fn pos(body: Body, lon: f64) -> BodyPosition {
        BodyPosition::new(body, lon)
    }

    #[test]
    fn span_wraps_around_zero() {
        let span = min_circular_span(&[5.0, 355.0, 10.0]);
        assert!((span - 15.0).abs() < 1e-9);
    }

    #[test]
    fn span_of_spread_bodies() {
        let span = min_circular_span(&[0.0, 120.0, 240.0]);
        assert!((span - 240.0).abs() < 1e-9);
        assert_eq!(min_circular_span(&[42.0]), 0.0);
    }

    #[test]
    fn group_straddling_zero() {
        let a = ConjunctionAnalyzer::default();
        let g = a.check_group(
            &[pos(Body::Mars, 5.0), pos(Body::Venus, 355.0), pos(Body::Saturn, 10.0)],
            &mut NullSink,
        );
        assert!(g.is_group);
        assert!((g.min_longitude_range.unwrap() - 15.0).abs() < 1e-9);
        let c = g.center.unwrap();
        assert!(circular_distance(c, 3.33) < 0.1);
    }

    #[test]
    fn too_few_for_group() {
        let a = ConjunctionAnalyzer::default();
        let g = a.check_group(&[pos(Body::Sun, 1.0), pos(Body::Moon, 2.0)], &mut NullSink);
        assert!(!g.is_group);
        assert!(g.reason.is_some());
        assert!(g.min_longitude_range.is_none());
    }

    #[test]
    fn exact_and_close() {
        let a = ConjunctionAnalyzer::default();
        let p = a.check_pair(&pos(Body::Mars, 100.0), &pos(Body::Jupiter, 100.5), &mut NullSink);
        assert!(p.is_exact && p.is_close);
        assert!(p.is_planetary_war);

        let p = a.check_pair(&pos(Body::Sun, 100.0), &pos(Body::Moon, 103.0), &mut NullSink);
        assert!(!p.is_exact && p.is_close);
        assert!(!p.is_planetary_war);
    }

    #[test]
    fn latitude_difference_blocks_exact() {
        let a = ConjunctionAnalyzer::default();
        let p = a.check_pair(
            &pos(Body::Venus, 10.0).with_latitude(0.0),
            &pos(Body::Mercury, 10.0).with_latitude(2.0),
            &mut NullSink,
        );
        assert!(!p.is_exact);
        assert!(p.is_close);
        assert!(!p.is_planetary_war);
    }

    #[test]
    fn configuration_priority() {
        let a = ConjunctionAnalyzer::default();
        let c = a.check_configuration(&pos(Body::Sun, 0.0), &pos(Body::Moon, 0.5), &mut NullSink);
        assert_eq!(c.configuration, Configuration::Conjunction);
        let c = a.check_configuration(&pos(Body::Sun, 0.0), &pos(Body::Moon, 177.0), &mut NullSink);
        assert_eq!(c.configuration, Configuration::Opposition);
        let c = a.check_configuration(&pos(Body::Sun, 10.0), &pos(Body::Moon, 284.0), &mut NullSink);
        assert_eq!(c.configuration, Configuration::Quadrature);
        let c = a.check_configuration(&pos(Body::Sun, 0.0), &pos(Body::Moon, 45.0), &mut NullSink);
        assert_eq!(c.configuration, Configuration::None);
    }

    #[test]
    fn analyze_keeps_only_interesting_pairs() {
        let a = ConjunctionAnalyzer::default();
        let mut log = CorrectionLog::new();
        let found = a.analyze_all(
            &[pos(Body::Sun, 0.0), pos(Body::Moon, 2.0), pos(Body::Mars, 45.0)],
            &mut log,
        );
        assert_eq!(found.len(), 1);
        assert_eq!((found[0].body1, found[0].body2), (Body::Sun, Body::Moon));
        assert_eq!(found[0].configuration.configuration, Configuration::None);
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].body, "Sun-Moon");
        assert_eq!(log.entries()[0].kind(), CorrectionKind::Conjunction);
    }

    #[test]
    fn refine_time_delegates() {
        // (t - 2)^2
        let t = refine_conjunction_time([0.0, 1.0, 2.0], [4.0, 1.0, 0.0]);
        assert!((t - 2.0).abs() < 1e-12);
    }

    #[test]
    fn refine_time_at_ahargana_scale() {
        let days = [1_871_858.0, 1_871_859.0, 1_871_860.0];
        // Separation closing at a steady rate: no vertex inside the window
        assert_eq!(refine_conjunction_time(days, [2.4, 1.2, 0.0]), 1_871_860.0);

        let closest = 1_871_858.75;
        let sep = |t: f64| 0.3 * (t - closest) * (t - closest) + 0.02;
        let t = refine_conjunction_time(days, days.map(sep));
        assert!((t - closest).abs() < 1e-6, "got {t}");
    }
}
