//! Bodies of the model and their fixed parameter table.
//!
//! Revolutions per Mahayuga, epoch longitudes, apogees and epicycles are
//! the classical Surya Siddhanta values (chapters 1-5). Every body has one
//! row in [`BODY_PARAMS`]; parameters a body does not carry are `None`
//! rather than absent keys.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use surya_math::Dms;

use crate::error::ModelError;

/// Civil (sunrise-to-sunrise) days in one Mahayuga.
pub const CIVIL_DAYS_IN_MAHAYUGA: u64 = 1_577_917_500;

/// Radius of the sine table, in arc-minutes.
pub const SINE_RADIUS_ARCMIN: f64 = 3438.0;

/// The bodies whose longitudes the model computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Body {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    /// Lunar apogee (mandocca of the Moon).
    MoonApogee,
    /// Ascending lunar node (Rahu).
    MoonNode,
}

/// All bodies in table order.
pub const ALL_BODIES: [Body; 9] = [
    Body::Sun,
    Body::Moon,
    Body::Mars,
    Body::Mercury,
    Body::Jupiter,
    Body::Venus,
    Body::Saturn,
    Body::MoonApogee,
    Body::MoonNode,
];

/// The five star-planets (tara grahas), which take the second correction.
pub const STAR_PLANETS: [Body; 5] = [
    Body::Mars,
    Body::Mercury,
    Body::Jupiter,
    Body::Venus,
    Body::Saturn,
];

/// Bodies compared against each other in conjunction analysis.
pub const CONJUNCTION_BODIES: [Body; 7] = [
    Body::Sun,
    Body::Moon,
    Body::Mars,
    Body::Mercury,
    Body::Jupiter,
    Body::Venus,
    Body::Saturn,
];

/// Geometry class for the second (sighra) correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyClass {
    /// Orbit outside the Sun's: anomaly = body − Sun.
    Outer,
    /// Orbit inside the Sun's: anomaly = Sun − body.
    Inner,
}

impl Display for BodyClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outer => f.write_str("outer"),
            Self::Inner => f.write_str("inner"),
        }
    }
}

/// First-correction parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MandaParams {
    /// Apogee (mandocca) longitude in degrees.
    pub apogee_deg: f64,
    /// Epicycle (manda paridhi) in degrees.
    pub epicycle_deg: f64,
}

/// Second-correction parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SighraParams {
    /// Epicycle (sighra paridhi) in degrees.
    pub epicycle_deg: f64,
    pub class: BodyClass,
}

/// Immutable model parameters for one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyParams {
    /// Revolutions completed in one Mahayuga.
    pub revolutions: u64,
    /// Longitude at the Kali Yuga epoch.
    pub initial_longitude: Dms,
    pub manda: Option<MandaParams>,
    pub sighra: Option<SighraParams>,
}

const fn manda(apogee_deg: f64, epicycle_deg: f64) -> Option<MandaParams> {
    Some(MandaParams {
        apogee_deg,
        epicycle_deg,
    })
}

const fn sighra(epicycle_deg: f64, class: BodyClass) -> Option<SighraParams> {
    Some(SighraParams {
        epicycle_deg,
        class,
    })
}

/// Parameter rows, indexed by [`Body::index`].
#[rustfmt::skip]
pub static BODY_PARAMS: [BodyParams; 9] = [
    // Sun
    BodyParams { revolutions: 4_320_000, initial_longitude: Dms::new(0, 0, 0.0),
                 manda: manda(80.0, 13.0 + 40.0 / 60.0), sighra: None },
    // Moon
    BodyParams { revolutions: 57_753_336, initial_longitude: Dms::new(0, 0, 0.0),
                 manda: manda(80.0, 31.0 + 30.0 / 60.0), sighra: None },
    // Mars
    BodyParams { revolutions: 2_296_824, initial_longitude: Dms::new(164, 11, 34.0),
                 manda: manda(130.0, 70.0), sighra: sighra(235.0, BodyClass::Outer) },
    // Mercury
    BodyParams { revolutions: 17_937_000, initial_longitude: Dms::new(220, 2, 16.0),
                 manda: manda(220.0, 28.0), sighra: sighra(131.0 + 30.0 / 60.0, BodyClass::Inner) },
    // Jupiter
    BodyParams { revolutions: 364_220, initial_longitude: Dms::new(154, 1, 56.0),
                 manda: manda(160.0, 32.0), sighra: sighra(72.0, BodyClass::Outer) },
    // Venus
    BodyParams { revolutions: 7_022_388, initial_longitude: Dms::new(0, 0, 0.0),
                 manda: manda(80.0, 11.0), sighra: sighra(260.0, BodyClass::Inner) },
    // Saturn
    BodyParams { revolutions: 146_564, initial_longitude: Dms::new(249, 7, 3.0),
                 manda: manda(240.0, 48.0), sighra: sighra(39.0, BodyClass::Outer) },
    // Moon apogee
    BodyParams { revolutions: 488_219, initial_longitude: Dms::new(80, 0, 0.0),
                 manda: None, sighra: None },
    // Moon node
    BodyParams { revolutions: 232_226, initial_longitude: Dms::new(0, 0, 0.0),
                 manda: None, sighra: None },
];

impl Body {
    /// Canonical name, also used as the correction-log body label.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mars => "Mars",
            Self::Mercury => "Mercury",
            Self::Jupiter => "Jupiter",
            Self::Venus => "Venus",
            Self::Saturn => "Saturn",
            Self::MoonApogee => "Moon_Apogee",
            Self::MoonNode => "Moon_Node",
        }
    }

    /// Sanskrit name of the body.
    pub const fn sanskrit_name(self) -> &'static str {
        match self {
            Self::Sun => "Surya",
            Self::Moon => "Chandra",
            Self::Mars => "Mangala",
            Self::Mercury => "Budha",
            Self::Jupiter => "Guru",
            Self::Venus => "Shukra",
            Self::Saturn => "Shani",
            Self::MoonApogee => "Chandrocca",
            Self::MoonNode => "Rahu",
        }
    }

    /// 0-based index into [`ALL_BODIES`] and [`BODY_PARAMS`].
    pub const fn index(self) -> usize {
        match self {
            Self::Sun => 0,
            Self::Moon => 1,
            Self::Mars => 2,
            Self::Mercury => 3,
            Self::Jupiter => 4,
            Self::Venus => 5,
            Self::Saturn => 6,
            Self::MoonApogee => 7,
            Self::MoonNode => 8,
        }
    }

    /// This body's parameter row.
    pub fn params(self) -> &'static BodyParams {
        &BODY_PARAMS[self.index()]
    }

    /// First-correction parameters, or `NotApplicable`.
    pub fn manda_params(self) -> Result<MandaParams, ModelError> {
        self.params().manda.ok_or(ModelError::NotApplicable {
            body: self,
            parameter: "apogee/epicycle (first correction)",
        })
    }

    /// Second-correction parameters, or `NotApplicable`.
    pub fn sighra_params(self) -> Result<SighraParams, ModelError> {
        self.params().sighra.ok_or(ModelError::NotApplicable {
            body: self,
            parameter: "body class (second correction)",
        })
    }

    /// Second-correction class, `None` for Sun, Moon, apogee and node.
    pub fn class(self) -> Option<BodyClass> {
        self.params().sighra.map(|s| s.class)
    }
}

impl Display for Body {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = ModelError;

    /// Accepts the canonical or Sanskrit name, case-insensitively;
    /// `-` and spaces stand in for `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['-', ' '], "_");
        ALL_BODIES
            .into_iter()
            .find(|b| {
                wanted.eq_ignore_ascii_case(b.name())
                    || wanted.eq_ignore_ascii_case(b.sanskrit_name())
                    || wanted.eq_ignore_ascii_case(&b.name().replace('_', ""))
            })
            .ok_or_else(|| ModelError::UnknownBody(s.to_string()))
    }
}

impl Serialize for Body {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Body {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
