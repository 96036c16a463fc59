//! Aggregate counts over a correction log.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entry::{CorrectionEntry, CorrectionKind, Stage};

/// Counts by stage, body and correction type, plus the time span covered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogSummary {
    pub total_entries: usize,
    pub by_stage: BTreeMap<Stage, usize>,
    pub by_body: BTreeMap<String, usize>,
    pub by_type: BTreeMap<CorrectionKind, usize>,
    pub first: Option<DateTime<Utc>>,
    pub last: Option<DateTime<Utc>>,
}

impl LogSummary {
    pub fn from_entries(entries: &[CorrectionEntry]) -> Self {
        let mut summary = Self {
            total_entries: entries.len(),
            ..Self::default()
        };
        for e in entries {
            *summary.by_stage.entry(e.stage).or_default() += 1;
            *summary.by_body.entry(e.body.clone()).or_default() += 1;
            *summary.by_type.entry(e.kind()).or_default() += 1;
        }
        summary.first = entries.iter().map(|e| e.timestamp).min();
        summary.last = entries.iter().map(|e| e.timestamp).max();
        summary
    }

    pub fn stage_count(&self, stage: Stage) -> usize {
        self.by_stage.get(&stage).copied().unwrap_or(0)
    }

    pub fn type_count(&self, kind: CorrectionKind) -> usize {
        self.by_type.get(&kind).copied().unwrap_or(0)
    }
}
