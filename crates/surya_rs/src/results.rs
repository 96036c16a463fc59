//! Aggregates returned by [`crate::Calculator`].

use serde::{Deserialize, Serialize};
use surya_base::{
    Body, BodyPosition, EclipseCheck, GroupResult, LunarLatitude, PairAnalysis, SighraResult,
    Stage, TithiInfo,
};
use surya_time::CalendarDate;

/// Longitude of one body on one date, with every intermediate stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionResult {
    pub body: Body,
    pub date: CalendarDate,
    pub ahargana: f64,
    pub mean_longitude: f64,
    /// Equal to the mean longitude for bodies without a first correction.
    pub manda_corrected: f64,
    pub true_longitude: f64,
    pub corrections_applied: Vec<Stage>,
    /// Present for the five star-planets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sighra: Option<SighraResult>,
    pub is_approximate: bool,
}

/// Moon-Sun-node derived quantities for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LunarPhenomena {
    pub date: CalendarDate,
    pub moon_longitude: f64,
    pub sun_longitude: f64,
    pub node_longitude: f64,
    pub latitude: LunarLatitude,
    pub tithi: TithiInfo,
    pub solar_eclipse: EclipseCheck,
    pub lunar_eclipse: EclipseCheck,
}

/// Conjunctions among the seven classical bodies on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConjunctionReport {
    pub date: CalendarDate,
    pub positions: Vec<BodyPosition>,
    /// Pairs in conjunction or in an aspect.
    pub pairs: Vec<PairAnalysis>,
    pub group: GroupResult,
}
