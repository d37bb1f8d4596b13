//! Ordered, append-only list of produced summaries.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a [`SummaryRecord`], derived from its creation time in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(i64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A summary shown to the user. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub id: RecordId,
    pub content: String,
}

/// Summaries in insertion order.
#[derive(Debug, Default)]
pub struct ResultCollection {
    records: Vec<SummaryRecord>,
    last_id: Option<i64>,
}

impl ResultCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new record at the tail and return it
    pub fn append(&mut self, content: impl Into<String>) -> &SummaryRecord {
        let id = self.next_id(Utc::now().timestamp_millis());
        let index = self.records.len();
        self.records.push(SummaryRecord {
            id,
            content: content.into(),
        });
        &self.records[index]
    }

    /// Remove the record with `id`; returns whether anything was removed
    pub fn remove(&mut self, id: RecordId) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        before != self.records.len()
    }

    pub fn get(&self, id: RecordId) -> Option<&SummaryRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn records(&self) -> &[SummaryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // Timestamps can repeat (or step back) between rapid calls; ids never do.
    fn next_id(&mut self, now_millis: i64) -> RecordId {
        let id = match self.last_id {
            Some(last) if now_millis <= last => last + 1,
            _ => now_millis,
        };
        self.last_id = Some(id);
        RecordId(id)
    }
}
