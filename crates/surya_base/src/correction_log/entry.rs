//! Correction log records.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surya_time::CalendarDate;

use crate::body::{Body, BodyClass};
use crate::conjunction::{ConfigurationCheck, GroupResult, PairConjunction};
use crate::lunar::{EclipseCheck, LunarLatitude, TithiInfo};
use crate::sighra::SighraResult;

/// Free-form annotations attached to an entry.
pub type Metadata = BTreeMap<String, String>;

/// Pipeline stage an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Calendar,
    MeanMotion,
    FirstCorrection,
    SecondCorrection,
    LunarTheory,
    Conjunction,
}

impl Stage {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Calendar => "calendar",
            Self::MeanMotion => "mean_motion",
            Self::FirstCorrection => "first_correction",
            Self::SecondCorrection => "second_correction",
            Self::LunarTheory => "lunar_theory",
            Self::Conjunction => "conjunction",
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of correction, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionKind {
    Ahargana,
    DailyMotion,
    MeanMotion,
    MandaCorrection,
    SighraCorrection,
    LunarLatitude,
    Tithi,
    EclipseCheck,
    Conjunction,
    Configuration,
    PlanetaryGroup,
}

impl CorrectionKind {
    /// Stage that produces this kind.
    pub const fn stage(self) -> Stage {
        match self {
            Self::Ahargana => Stage::Calendar,
            Self::DailyMotion | Self::MeanMotion => Stage::MeanMotion,
            Self::MandaCorrection => Stage::FirstCorrection,
            Self::SighraCorrection => Stage::SecondCorrection,
            Self::LunarLatitude | Self::Tithi | Self::EclipseCheck => Stage::LunarTheory,
            Self::Conjunction | Self::Configuration | Self::PlanetaryGroup => Stage::Conjunction,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ahargana => "ahargana",
            Self::DailyMotion => "daily_motion",
            Self::MeanMotion => "mean_motion",
            Self::MandaCorrection => "manda_correction",
            Self::SighraCorrection => "sighra_correction",
            Self::LunarLatitude => "lunar_latitude",
            Self::Tithi => "tithi",
            Self::EclipseCheck => "eclipse_check",
            Self::Conjunction => "conjunction",
            Self::Configuration => "configuration",
            Self::PlanetaryGroup => "planetary_group",
        }
    }
}

impl Display for CorrectionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit label of an entry's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Degrees,
    DegreesPerDay,
    Days,
    DegreesAndDays,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AharganaInput {
    pub date: CalendarDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AharganaOutput {
    pub jdn: i64,
    pub ahargana: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyMotionInput {
    pub civil_days_mahayuga: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMotionOutput {
    pub daily_motions: BTreeMap<Body, f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeanMotionInput {
    pub ahargana: f64,
    pub reduced_ahargana: f64,
    pub daily_motion: f64,
    pub initial_longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeanMotionOutput {
    pub mean_longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MandaInput {
    pub mean_longitude: f64,
    pub apogee: f64,
    pub epicycle_deg: f64,
    pub kendra: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MandaOutput {
    pub phala: f64,
    pub true_longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SighraInput {
    pub first_corrected_longitude: f64,
    pub sun_longitude: f64,
    pub class: BodyClass,
    pub kendra: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LunarLatitudeInput {
    pub moon_longitude: f64,
    pub node_longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TithiInput {
    pub moon_longitude: f64,
    pub sun_longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EclipseInput {
    pub moon_longitude: f64,
    pub sun_longitude: f64,
    pub node_longitude: f64,
    pub moon_latitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConjunctionInput {
    pub longitude1: f64,
    pub latitude1: f64,
    pub longitude2: f64,
    pub latitude2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupInput {
    pub longitudes: Vec<f64>,
}

/// One correction step with its typed inputs and outputs.
///
/// Serialized with a `correction_type` tag next to `input_values` and
/// `output_values`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "correction_type", rename_all = "snake_case")]
pub enum Correction {
    Ahargana {
        input_values: AharganaInput,
        output_values: AharganaOutput,
    },
    DailyMotion {
        input_values: DailyMotionInput,
        output_values: DailyMotionOutput,
    },
    MeanMotion {
        input_values: MeanMotionInput,
        output_values: MeanMotionOutput,
    },
    MandaCorrection {
        input_values: MandaInput,
        output_values: MandaOutput,
    },
    SighraCorrection {
        input_values: SighraInput,
        output_values: SighraResult,
    },
    LunarLatitude {
        input_values: LunarLatitudeInput,
        output_values: LunarLatitude,
    },
    Tithi {
        input_values: TithiInput,
        output_values: TithiInfo,
    },
    EclipseCheck {
        input_values: EclipseInput,
        output_values: EclipseCheck,
    },
    Conjunction {
        input_values: ConjunctionInput,
        output_values: PairConjunction,
    },
    Configuration {
        input_values: ConjunctionInput,
        output_values: ConfigurationCheck,
    },
    PlanetaryGroup {
        input_values: GroupInput,
        output_values: GroupResult,
    },
}

impl Correction {
    pub const fn kind(&self) -> CorrectionKind {
        match self {
            Self::Ahargana { .. } => CorrectionKind::Ahargana,
            Self::DailyMotion { .. } => CorrectionKind::DailyMotion,
            Self::MeanMotion { .. } => CorrectionKind::MeanMotion,
            Self::MandaCorrection { .. } => CorrectionKind::MandaCorrection,
            Self::SighraCorrection { .. } => CorrectionKind::SighraCorrection,
            Self::LunarLatitude { .. } => CorrectionKind::LunarLatitude,
            Self::Tithi { .. } => CorrectionKind::Tithi,
            Self::EclipseCheck { .. } => CorrectionKind::EclipseCheck,
            Self::Conjunction { .. } => CorrectionKind::Conjunction,
            Self::Configuration { .. } => CorrectionKind::Configuration,
            Self::PlanetaryGroup { .. } => CorrectionKind::PlanetaryGroup,
        }
    }
}

/// An immutable record of one correction step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionEntry {
    pub timestamp: DateTime<Utc>,
    pub stage: Stage,
    /// Body label: a body name, a pair such as `Mars-Jupiter`, `GROUP` or `ALL`.
    pub body: String,
    #[serde(flatten)]
    pub correction: Correction,
    pub units: Unit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl CorrectionEntry {
    /// Stamp a correction with the current UTC time and its stage.
    pub fn new(body: impl Into<String>, correction: Correction, units: Unit) -> Self {
        Self {
            timestamp: Utc::now(),
            stage: correction.kind().stage(),
            body: body.into(),
            correction,
            units,
            metadata: None,
        }
    }

    /// Attach one metadata key/value.
    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata
            .get_or_insert_with(Metadata::new)
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn kind(&self) -> CorrectionKind {
        self.correction.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mean_motion_entry() -> CorrectionEntry {
        CorrectionEntry::new(
            "Sun",
            Correction::MeanMotion {
                input_values: MeanMotionInput {
                    ahargana: 1_863_092.0,
                    reduced_ahargana: 268.5,
                    daily_motion: 0.985_6,
                    initial_longitude: 0.0,
                },
                output_values: MeanMotionOutput {
                    mean_longitude: 268.8,
                },
            },
            Unit::Degrees,
        )
    }

    #[test]
    fn stage_follows_kind() {
        let e = mean_motion_entry();
        assert_eq!(e.kind(), CorrectionKind::MeanMotion);
        assert_eq!(e.stage, Stage::MeanMotion);
        assert_eq!(CorrectionKind::MandaCorrection.stage(), Stage::FirstCorrection);
        assert_eq!(CorrectionKind::SighraCorrection.stage(), Stage::SecondCorrection);
        assert_eq!(CorrectionKind::Tithi.stage(), Stage::LunarTheory);
        assert_eq!(CorrectionKind::PlanetaryGroup.stage(), Stage::Conjunction);
    }

    #[test]
    fn json_shape_is_flat() {
        let e = mean_motion_entry().with_metadata("note", "test");
        let v: serde_json::Value = serde_json::to_value(&e).unwrap();
        assert_eq!(v["correction_type"], "mean_motion");
        assert_eq!(v["stage"], "mean_motion");
        assert_eq!(v["body"], "Sun");
        assert_eq!(v["units"], "degrees");
        assert_eq!(v["input_values"]["reduced_ahargana"], 268.5);
        assert_eq!(v["output_values"]["mean_longitude"], 268.8);
        assert_eq!(v["metadata"]["note"], "test");
        assert!(v["timestamp"].is_string());
    }

    #[test]
    fn metadata_omitted_when_absent() {
        let v: serde_json::Value = serde_json::to_value(mean_motion_entry()).unwrap();
        assert!(v.get("metadata").is_none());
    }

    #[test]
    fn json_line_reads_back() {
        let e = mean_motion_entry();
        let line = serde_json::to_string(&e).unwrap();
        let back: CorrectionEntry = serde_json::from_str(&line).unwrap();
        assert_eq!(back, e);
    }
}
