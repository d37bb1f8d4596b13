//! Copy-to-clipboard feedback.
//!
//! The system clipboard itself is supplied by the presentation layer through
//! [`ClipboardSink`]; this module only tracks which record shows "Copied!".

use crate::collection::{RecordId, SummaryRecord};
use std::time::{Duration, Instant};
use thiserror::Error;

/// How long a copy confirmation stays visible
pub const COPIED_DISPLAY: Duration = Duration::from_secs(2);

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}

/// Destination for copied text
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Debug, Default)]
pub struct ClipboardNotifier {
    copied: Option<(RecordId, Instant)>,
}

impl ClipboardNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy a record's content and start its confirmation
    pub fn copy(
        &mut self,
        record: &SummaryRecord,
        sink: &mut dyn ClipboardSink,
    ) -> Result<(), ClipboardError> {
        sink.write_text(&record.content)?;
        self.mark_copied(record.id, Instant::now());
        Ok(())
    }

    pub fn mark_copied(&mut self, id: RecordId, at: Instant) {
        self.copied = Some((id, at));
    }

    pub fn is_showing(&self, id: RecordId) -> bool {
        self.is_showing_at(id, Instant::now())
    }

    pub fn is_showing_at(&self, id: RecordId, now: Instant) -> bool {
        match self.copied {
            Some((copied, at)) => {
                copied == id && now.saturating_duration_since(at) < COPIED_DISPLAY
            }
            None => false,
        }
    }
}
