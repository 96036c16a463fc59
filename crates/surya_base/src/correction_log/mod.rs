//! Audit trail of every correction step.
//!
//! Each pipeline stage reports its inputs and outputs as a
//! [`CorrectionEntry`] to a [`CorrectionSink`] supplied by the caller.
//! The sink decides what happens to it: keep it in memory
//! ([`CorrectionLog`]), stream it as JSON lines ([`JsonLinesSink`]), or
//! drop it ([`NullSink`]).
//!
//! Persisted form is newline-delimited JSON, one entry per line, in the
//! order entries were recorded.

pub mod entry;
pub mod sink;
pub mod summary;

pub use entry::{
    AharganaInput, AharganaOutput, ConjunctionInput, Correction, CorrectionEntry,
    CorrectionKind, DailyMotionInput, DailyMotionOutput, EclipseInput, GroupInput,
    LunarLatitudeInput, MandaInput, MandaOutput, MeanMotionInput, MeanMotionOutput, Metadata,
    SighraInput, Stage, TithiInput, Unit,
};
pub use sink::{CorrectionLog, CorrectionSink, JsonLinesSink, NullSink, read_jsonl};
pub use summary::LogSummary;
