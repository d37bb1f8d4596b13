//! A single user's summarising session.
//!
//! Carries the length and language preferences between submissions, records
//! successful summaries and handles copy/delete on them.

use crate::clipboard::{ClipboardError, ClipboardNotifier, ClipboardSink};
use crate::collection::{RecordId, ResultCollection, SummaryRecord};
use crate::config::Config;
use crate::error::{OrchestrationError, SetupError};
use crate::extractor::{ExtractionClient, Extractor};
use crate::orchestrator::RequestOrchestrator;
use crate::storage::{PreferenceStore, SledPreferenceStore, StorageError};
use crate::summarizer::{SummarizationClient, Summarizer};
use crate::summary::{Length, SummaryRequest};
use tracing::{debug, info};

pub struct SummarizeSession<E, S> {
    orchestrator: RequestOrchestrator<E, S>,
    preferences: Box<dyn PreferenceStore>,
    collection: ResultCollection,
    notifier: ClipboardNotifier,
    length: Length,
    target_language: String,
}

impl SummarizeSession<ExtractionClient, SummarizationClient> {
    /// Session against the configured backend with preferences stored on disk
    pub fn open(config: &Config) -> Result<Self, SetupError> {
        let orchestrator = RequestOrchestrator::from_config(config)?;
        let preferences = SledPreferenceStore::open(&config.storage.path)?;
        Ok(Self::new(orchestrator, Box::new(preferences)))
    }
}

impl<E: Extractor, S: Summarizer> SummarizeSession<E, S> {
    /// Restores the saved length; the target language starts at the default.
    pub fn new(
        orchestrator: RequestOrchestrator<E, S>,
        preferences: Box<dyn PreferenceStore>,
    ) -> Self {
        let length = preferences.load();
        let target_language = orchestrator.routing().default_language.clone();
        debug!(%length, %target_language, "session started");

        Self {
            orchestrator,
            preferences,
            collection: ResultCollection::new(),
            notifier: ClipboardNotifier::new(),
            length,
            target_language,
        }
    }

    pub fn length(&self) -> Length {
        self.length
    }

    /// Change the length and persist it
    pub fn set_length(&mut self, length: Length) -> Result<(), StorageError> {
        self.length = length;
        self.preferences.save(length)
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    pub fn set_target_language(&mut self, code: impl Into<String>) {
        self.target_language = code.into();
    }

    pub fn is_busy(&self) -> bool {
        self.orchestrator.is_busy()
    }

    /// Summarise `text` or `url` with the current preferences.
    ///
    /// On success the summary is appended and its record returned; on failure
    /// the collection is left untouched.
    pub async fn submit(
        &mut self,
        text: &str,
        url: &str,
    ) -> Result<&SummaryRecord, OrchestrationError> {
        let request = SummaryRequest {
            source_text: Some(text.to_string()),
            source_url: Some(url.to_string()),
            target_language: self.target_language.clone(),
            length: self.length,
        };

        let result = self.orchestrator.submit(&request).await?;
        let record = self.collection.append(result.summary_text);
        info!(id = %record.id, "summary recorded");
        Ok(record)
    }

    pub fn records(&self) -> &[SummaryRecord] {
        self.collection.records()
    }

    /// Delete a record; unknown ids are ignored
    pub fn remove(&mut self, id: RecordId) -> bool {
        self.collection.remove(id)
    }

    /// Copy a record to the clipboard. Returns `false` for unknown ids.
    pub fn copy(
        &mut self,
        id: RecordId,
        sink: &mut dyn ClipboardSink,
    ) -> Result<bool, ClipboardError> {
        let Some(record) = self.collection.get(id) else {
            return Ok(false);
        };
        self.notifier.copy(record, sink)?;
        Ok(true)
    }

    pub fn is_copied(&self, id: RecordId) -> bool {
        self.notifier.is_showing(id)
    }
}
