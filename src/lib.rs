//! # Briefer
//!
//! Request orchestration for an article summarisation backend.
//!
//! ## Features
//!
//! - **Two routes**: a single direct call that lets the backend extract and translate,
//!   or a client-driven extract-then-summarise flow for the default language
//! - **Remembered preferences**: the chosen summary length survives restarts via sled
//! - **Uniform errors**: every failure ends as one displayable message and is never
//!   retried automatically

pub mod client;
pub mod clipboard;
pub mod collection;
pub mod config;
pub mod error;
pub mod extractor;
pub mod orchestrator;
pub mod session;
pub mod storage;
pub mod summarizer;
pub mod summary;

pub use collection::{RecordId, ResultCollection, SummaryRecord};
pub use config::Config;
pub use error::{OrchestrationError, RetryHint};
pub use orchestrator::{RequestOrchestrator, Route};
pub use session::SummarizeSession;
pub use storage::{MemoryPreferenceStore, PreferenceStore, SledPreferenceStore};
pub use summary::{Length, SummaryRequest, SummaryResult};

/// Install a formatted `tracing` subscriber on stderr.
///
/// Does nothing if a global subscriber is already set.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
