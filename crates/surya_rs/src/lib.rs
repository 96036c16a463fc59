//! Calculator facade for the Surya Siddhanta planetary model.
//!
//! Composes the calendar, mean motion, both corrections, lunar theory and
//! conjunction analysis into per-date queries, and owns the correction
//! sink that records every intermediate value.
//!
//! # Quick start
//!
//! ```rust
//! use surya_rs::{Body, Calculator};
//!
//! let mut calc = Calculator::new();
//! let mars = calc.position(Body::Mars, 2000, 1, 1).unwrap();
//! assert!(mars.true_longitude < 360.0);
//! assert_eq!(mars.corrections_applied.len(), 3);
//! ```

pub mod calculator;
pub mod results;
pub mod validation;

pub use calculator::Calculator;
pub use results::{ConjunctionReport, LunarPhenomena, PositionResult};
pub use validation::{PositionCheck, ValidationReport};

// Re-export the model types callers need alongside the calculator.
pub use surya_base::{
    ALL_BODIES, Body, BodyClass, BodyPosition, CONJUNCTION_BODIES, Configuration,
    ConfigurationCheck, CorrectionEntry, CorrectionKind, CorrectionLog, CorrectionSink,
    EclipseCheck, EclipseKind, GroupResult, JsonLinesSink, LogSummary, LunarLatitude,
    ModelConfig, ModelError, NullSink, PairAnalysis, PairConjunction, SighraResult, Stage,
    TithiInfo,
};
pub use surya_time::{CalendarDate, TimeError, ahargana};
