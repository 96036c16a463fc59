//! Tunable thresholds of the lunar and conjunction analyses.
//!
//! Everything here has a classical default. Model constants (revolution
//! counts, sine radius, epicycles) are not configurable.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Limits used by the lunar theory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LunarLimits {
    /// Maximum lunar latitude (orbital inclination).
    pub max_inclination_deg: f64,
    /// Moon-node distance within which a solar eclipse is possible.
    pub solar_eclipse_limit_deg: f64,
    /// Moon-node distance within which a lunar eclipse is possible.
    pub lunar_eclipse_limit_deg: f64,
    /// Closeness to new or full moon that counts as syzygy.
    pub syzygy_threshold_deg: f64,
    /// Lunar latitude that alone counts as near-node for solar eclipses.
    pub eclipse_latitude_deg: f64,
    pub moon_daily_motion_deg: f64,
    pub sun_daily_motion_deg: f64,
}

impl Default for LunarLimits {
    fn default() -> Self {
        Self {
            max_inclination_deg: 4.5,
            solar_eclipse_limit_deg: 12.0,
            lunar_eclipse_limit_deg: 10.0,
            syzygy_threshold_deg: 1.0,
            eclipse_latitude_deg: 2.0,
            moon_daily_motion_deg: 13.176_396,
            sun_daily_motion_deg: 0.985_647,
        }
    }
}

/// Limits used by the conjunction analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConjunctionLimits {
    pub exact_deg: f64,
    pub close_deg: f64,
    pub planetary_war_longitude_deg: f64,
    pub planetary_war_latitude_deg: f64,
    /// Largest arc a planetary group may span.
    pub group_span_deg: f64,
    pub min_group_size: usize,
    pub opposition_tolerance_deg: f64,
    pub quadrature_tolerance_deg: f64,
}

impl Default for ConjunctionLimits {
    fn default() -> Self {
        Self {
            exact_deg: 1.0,
            close_deg: 5.0,
            planetary_war_longitude_deg: 1.0,
            planetary_war_latitude_deg: 1.0,
            group_span_deg: 30.0,
            min_group_size: 3,
            opposition_tolerance_deg: 5.0,
            quadrature_tolerance_deg: 5.0,
        }
    }
}

/// Full model configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub lunar: LunarLimits,
    pub conjunction: ConjunctionLimits,
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

impl ModelConfig {
    /// Check every limit is finite and positive.
    pub fn validate(&self) -> Result<(), &'static str> {
        let l = &self.lunar;
        if !positive(l.max_inclination_deg) {
            return Err("lunar.max_inclination_deg must be positive");
        }
        if !positive(l.solar_eclipse_limit_deg) {
            return Err("lunar.solar_eclipse_limit_deg must be positive");
        }
        if !positive(l.lunar_eclipse_limit_deg) {
            return Err("lunar.lunar_eclipse_limit_deg must be positive");
        }
        if !positive(l.syzygy_threshold_deg) {
            return Err("lunar.syzygy_threshold_deg must be positive");
        }
        if !positive(l.eclipse_latitude_deg) {
            return Err("lunar.eclipse_latitude_deg must be positive");
        }
        if !positive(l.moon_daily_motion_deg) || !positive(l.sun_daily_motion_deg) {
            return Err("lunar daily motions must be positive");
        }
        if l.moon_daily_motion_deg <= l.sun_daily_motion_deg {
            return Err("moon daily motion must exceed sun daily motion");
        }

        let c = &self.conjunction;
        if !positive(c.exact_deg) || !positive(c.close_deg) {
            return Err("conjunction orbs must be positive");
        }
        if c.exact_deg > c.close_deg {
            return Err("conjunction.exact_deg must not exceed close_deg");
        }
        if !positive(c.planetary_war_longitude_deg) || !positive(c.planetary_war_latitude_deg) {
            return Err("planetary war limits must be positive");
        }
        if !positive(c.group_span_deg) {
            return Err("conjunction.group_span_deg must be positive");
        }
        if c.min_group_size < 2 {
            return Err("conjunction.min_group_size must be at least 2");
        }
        if !positive(c.opposition_tolerance_deg) || !positive(c.quadrature_tolerance_deg) {
            return Err("aspect tolerances must be positive");
        }
        Ok(())
    }

    /// Parse and validate a JSON document. Missing keys take defaults.
    pub fn from_json_str(s: &str) -> Result<Self, ModelError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate().map_err(ModelError::InvalidConfig)?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(ModelConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = ModelConfig::from_json_str(r#"{"conjunction": {"close_deg": 8.0}}"#).unwrap();
        assert_eq!(cfg.conjunction.close_deg, 8.0);
        assert_eq!(cfg.conjunction.exact_deg, 1.0);
        assert_eq!(cfg.lunar, LunarLimits::default());
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(ModelConfig::from_json_str("{}").unwrap(), ModelConfig::default());
    }

    #[test]
    fn rejects_bad_limits() {
        let mut cfg = ModelConfig::default();
        cfg.conjunction.min_group_size = 1;
        assert!(cfg.validate().is_err());

        let mut cfg = ModelConfig::default();
        cfg.lunar.solar_eclipse_limit_deg = f64::NAN;
        assert!(cfg.validate().is_err());

        let err = ModelConfig::from_json_str(r#"{"lunar": {"syzygy_threshold_deg": -1}}"#)
            .unwrap_err();
        assert!(matches!(err, ModelError::InvalidConfig(_)));
    }

    #[test]
    fn malformed_json_is_json_error() {
        assert!(matches!(
            ModelConfig::from_json_str("{"),
            Err(ModelError::Json(_))
        ));
    }
}
