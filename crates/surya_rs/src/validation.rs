//! Self-check report.

use serde::Serialize;
use surya_base::{MandaSelfTest, ModernComparison};
use surya_time::{CalendarDate, EpochCheck};

/// Sun and Moon on a fixed reference date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionCheck {
    pub description: &'static str,
    pub date: CalendarDate,
    pub sun_longitude: f64,
    pub moon_longitude: f64,
}

/// Result of [`crate::Calculator::validate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub epoch: EpochCheck,
    pub mean_motion: Vec<ModernComparison>,
    pub manda_physics: MandaSelfTest,
    pub positions: Vec<PositionCheck>,
}

impl ValidationReport {
    /// Every modern comparison differs from the model, as an independent
    /// reference must.
    pub fn modern_comparison_independent(&self) -> bool {
        self.mean_motion
            .iter()
            .all(|c| c.daily_motion_error > 0.0 && c.period_error > 0.0)
    }

    pub fn passed(&self) -> bool {
        self.epoch.passed && self.manda_physics.all_correct && self.modern_comparison_independent()
    }
}

/// Reference dates checked by validation.
pub(crate) const REFERENCE_DATES: [(i32, u32, u32, &str); 2] =
    [(2000, 1, 1, "J2000 epoch"), (2024, 1, 1, "Current year")];
