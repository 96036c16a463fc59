//! Destinations for correction entries.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::body::Body;
use crate::error::ModelError;

use super::entry::{Correction, CorrectionEntry, Metadata, Unit};
use super::summary::LogSummary;

/// Receiver of correction entries.
///
/// Every computation that logs takes a `&mut dyn CorrectionSink`, so callers
/// pick where the audit trail goes without the computation knowing.
pub trait CorrectionSink {
    /// Accept one entry.
    fn record(&mut self, entry: CorrectionEntry);

    /// Whether entries are kept at all. Producers may skip building
    /// entries when this is `false`.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Build and record an entry for `body`.
    fn log(
        &mut self,
        body: &str,
        correction: Correction,
        units: Unit,
        metadata: Option<Metadata>,
    ) {
        if !self.is_enabled() {
            return;
        }
        let mut entry = CorrectionEntry::new(body, correction, units);
        entry.metadata = metadata;
        self.record(entry);
    }

    /// Convenience for entries keyed by a single body.
    fn log_body(&mut self, body: Body, correction: Correction, units: Unit) {
        self.log(body.name(), correction, units, None);
    }
}

impl<S: CorrectionSink + ?Sized> CorrectionSink for &mut S {
    fn record(&mut self, entry: CorrectionEntry) {
        (**self).record(entry);
    }

    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }
}

impl<S: CorrectionSink + ?Sized> CorrectionSink for Box<S> {
    fn record(&mut self, entry: CorrectionEntry) {
        (**self).record(entry);
    }

    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }
}

/// In-memory, append-only log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorrectionLog {
    entries: Vec<CorrectionEntry>,
}

impl CorrectionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in recording order.
    pub fn entries(&self) -> &[CorrectionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn summary(&self) -> LogSummary {
        LogSummary::from_entries(&self.entries)
    }

    /// Write every entry as one JSON line.
    pub fn write_jsonl<W: Write>(&self, mut writer: W) -> Result<(), ModelError> {
        for entry in &self.entries {
            serde_json::to_writer(&mut writer, entry)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Save to `path`, replacing any existing file.
    pub fn save_jsonl(&self, path: impl AsRef<Path>) -> Result<(), ModelError> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.write_jsonl(BufWriter::new(file))?;
        debug!(path = %path.display(), entries = self.entries.len(), "correction log saved");
        Ok(())
    }

    /// Load a log previously written by [`CorrectionLog::save_jsonl`].
    pub fn load_jsonl(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let file = File::open(path.as_ref())?;
        Ok(Self {
            entries: read_jsonl(BufReader::new(file))?,
        })
    }
}

impl CorrectionSink for CorrectionLog {
    fn record(&mut self, entry: CorrectionEntry) {
        self.entries.push(entry);
    }
}

impl Extend<CorrectionEntry> for CorrectionLog {
    fn extend<T: IntoIterator<Item = CorrectionEntry>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}

/// Parse newline-delimited JSON entries. Blank lines are skipped.
///
/// A line whose `stage` disagrees with its `correction_type` is rejected
/// with [`ModelError::InvalidEntry`].
pub fn read_jsonl<R: BufRead>(reader: R) -> Result<Vec<CorrectionEntry>, ModelError> {
    let mut entries = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let entry: CorrectionEntry = serde_json::from_str(&line)?;
        let expected = entry.kind().stage();
        if entry.stage != expected {
            return Err(ModelError::InvalidEntry {
                line: index + 1,
                reason: format!(
                    "stage {} does not match correction type {} (expected {})",
                    entry.stage.as_str(),
                    entry.kind(),
                    expected.as_str()
                ),
            });
        }
        entries.push(entry);
    }
    Ok(entries)
}

/// Streams each entry as a JSON line the moment it is recorded.
///
/// `record` cannot fail, so the first write error is kept and later
/// entries are dropped. Check it with [`JsonLinesSink::take_error`] or
/// [`JsonLinesSink::finish`].
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
    written: usize,
    error: Option<ModelError>,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            written: 0,
            error: None,
        }
    }

    /// Entries successfully written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn take_error(&mut self) -> Option<ModelError> {
        self.error.take()
    }

    /// Flush and hand back the writer, or the first error seen.
    pub fn finish(mut self) -> Result<W, ModelError> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_entry(&mut self, entry: &CorrectionEntry) -> Result<(), ModelError> {
        serde_json::to_writer(&mut self.writer, entry)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

impl JsonLinesSink<BufWriter<File>> {
    /// Stream into a newly created (truncated) file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> CorrectionSink for JsonLinesSink<W> {
    fn record(&mut self, entry: CorrectionEntry) {
        if self.error.is_some() {
            return;
        }
        match self.write_entry(&entry) {
            Ok(()) => self.written += 1,
            Err(e) => {
                warn!(error = %e, "correction log stream failed, dropping further entries");
                self.error = Some(e);
            }
        }
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullSink;

impl CorrectionSink for NullSink {
    fn record(&mut self, _entry: CorrectionEntry) {}

    fn is_enabled(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correction_log::entry::{MeanMotionInput, MeanMotionOutput};

    fn sample(mean: f64) -> Correction {
        Correction::MeanMotion {
            input_values: MeanMotionInput {
                ahargana: 10.0,
                reduced_ahargana: 10.0,
                daily_motion: 1.0,
                initial_longitude: 0.0,
            },
            output_values: MeanMotionOutput {
                mean_longitude: mean,
            },
        }
    }

    #[test]
    fn log_appends_in_order() {
        let mut log = CorrectionLog::new();
        log.log_body(Body::Sun, sample(1.0), Unit::Degrees);
        log.log("Moon", sample(2.0), Unit::Degrees, None);
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].body, "Sun");
        assert_eq!(log.entries()[1].body, "Moon");
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn dyn_sink_records() {
        let mut log = CorrectionLog::new();
        {
            let sink: &mut dyn CorrectionSink = &mut log;
            sink.log_body(Body::Mars, sample(3.0), Unit::Degrees);
        }
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn null_sink_is_disabled() {
        let mut sink = NullSink;
        assert!(!sink.is_enabled());
        sink.log_body(Body::Sun, sample(1.0), Unit::Degrees);
    }

    #[test]
    fn write_then_read_jsonl() {
        let mut log = CorrectionLog::new();
        log.log_body(Body::Sun, sample(1.0), Unit::Degrees);
        log.log_body(Body::Venus, sample(2.0), Unit::Degrees);
        let mut buf = Vec::new();
        log.write_jsonl(&mut buf).unwrap();
        let text = String::from_utf8(buf.clone()).unwrap();
        assert_eq!(text.lines().count(), 2);
        let back = read_jsonl(buf.as_slice()).unwrap();
        assert_eq!(back, log.entries());
    }

    #[test]
    fn streaming_sink_writes_lines() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.log_body(Body::Sun, sample(1.0), Unit::Degrees);
        sink.log_body(Body::Moon, sample(2.0), Unit::Degrees);
        assert_eq!(sink.written(), 2);
        let buf = sink.finish().unwrap();
        assert_eq!(read_jsonl(buf.as_slice()).unwrap().len(), 2);
    }

    #[test]
    fn bad_line_is_json_error() {
        let err = read_jsonl("{not json}\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ModelError::Json(_)));
    }

    #[test]
    fn stage_contradicting_type_is_rejected() {
        let mut buf = Vec::new();
        let mut sink = JsonLinesSink::new(&mut buf);
        sink.log_body(Body::Sun, sample(1.0), Unit::Degrees);
        sink.log_body(Body::Moon, sample(2.0), Unit::Degrees);
        sink.finish().unwrap();

        let text = String::from_utf8(buf).unwrap();
        let edited: Vec<String> = text
            .lines()
            .enumerate()
            .map(|(i, l)| {
                if i == 1 {
                    l.replace("\"stage\":\"mean_motion\"", "\"stage\":\"lunar_theory\"")
                } else {
                    l.to_string()
                }
            })
            .collect();
        assert!(edited[1].contains("lunar_theory"));

        let err = read_jsonl(edited.join("\n").as_bytes()).unwrap_err();
        assert!(
            matches!(err, ModelError::InvalidEntry { line: 2, .. }),
            "{err:?}"
        );
    }
}
