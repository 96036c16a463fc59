//! Siddhantic planetary model: mean motions, the two corrections, lunar
//! theory and conjunction analysis.
//!
//! Every computation that leaves an audit trail takes an explicit
//! `&mut dyn CorrectionSink`; nothing here holds global state.

pub mod body;
pub mod config;
pub mod conjunction;
pub mod correction_log;
pub mod error;
pub mod lunar;
pub mod manda;
pub mod mean_motion;
pub mod modern;
pub mod sighra;

pub use body::{
    ALL_BODIES, BODY_PARAMS, Body, BodyClass, BodyParams, CIVIL_DAYS_IN_MAHAYUGA,
    CONJUNCTION_BODIES, MandaParams, SINE_RADIUS_ARCMIN, STAR_PLANETS, SighraParams,
};
pub use config::{ConjunctionLimits, LunarLimits, ModelConfig};
pub use conjunction::{
    BodyPosition, Configuration, ConfigurationCheck, ConjunctionAnalyzer, GroupResult,
    PairAnalysis, PairConjunction, min_circular_span, refine_conjunction_time,
};
pub use correction_log::{
    Correction, CorrectionEntry, CorrectionKind, CorrectionLog, CorrectionSink, JsonLinesSink,
    LogSummary, NullSink, Stage, Unit,
};
pub use error::ModelError;
pub use lunar::{EclipseCheck, EclipseKind, LunarLatitude, LunarTheory, TithiInfo};
pub use manda::{
    MandaResult, MandaSelfTest, Sign, SignCase, apply_manda_correction, manda_kendra,
    manda_phala_deg, manda_sign_self_test, siddhanta_sine_arcmin,
};
pub use mean_motion::{MeanMotion, ModernComparison};
pub use modern::modern_sidereal_period_days;
pub use sighra::{
    SighraResult, apply_sighra_correction, sighra_karna, sighra_kendra, sighra_phala_deg,
};
