//! Audit trail of a deduplication run.
use serde::Serialize;

use crate::record::Column;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pass {
    Hard,
    Soft,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DropReason {
    /// raw value is shared by `occurrences` records, all of them are dropped.
    SharedValue { occurrences: usize },
    /// normalized value is shared with a record whose raw value is longer.
    ShorterThanKept { raw_len: usize, kept_len: usize },
}

/// A record that failed a column check.
///
/// A record failing both soft checks appears twice, once per column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedRecord {
    /// position in the input collection.
    pub index: usize,
    pub id: i64,
    pub pass: Pass,
    pub column: Column,
    #[serde(flatten)]
    pub reason: DropReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSummary {
    pub pass: Pass,
    pub column: Column,
    pub checked: usize,
    pub dropped: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DedupReport {
    pub input: usize,
    pub kept: usize,
    pub ids_reassigned: bool,
    pub columns: Vec<ColumnSummary>,
    pub dropped: Vec<DroppedRecord>,
}

impl DedupReport {
    pub fn new(input: usize) -> Self {
        Self {
            input,
            kept: input,
            ..Default::default()
        }
    }

    /// Drops recorded for a given pass and column.
    pub fn dropped_for(&self, pass: Pass, column: Column) -> impl Iterator<Item = &DroppedRecord> {
        self.dropped
            .iter()
            .filter(move |d| d.pass == pass && d.column == column)
    }
}
