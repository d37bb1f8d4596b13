//! Errors surfaced by the request orchestrator.

use crate::client::ClientError;
use crate::config::ConfigError;
use crate::storage::StorageError;
use thiserror::Error;

/// How a failed submission may be retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryHint {
    /// Nothing is retried automatically; the user may resubmit
    Manual,
}

#[derive(Error, Debug)]
pub enum OrchestrationError {
    #[error("enter article text or an article URL")]
    EmptyInput,
    #[error("not an http(s) URL: {0}")]
    InvalidUrl(String),
    #[error("could not extract the article: {detail}")]
    ExtractionFailed { detail: String },
    #[error("summarisation failed: {detail}")]
    Transport { detail: String },
    #[error("invalid request: {0}")]
    InvalidInput(String),
    #[error("a summary request is already in progress")]
    Busy,
}

impl OrchestrationError {
    /// Single human-readable message for display
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn retry_hint(&self) -> RetryHint {
        RetryHint::Manual
    }

    pub(crate) fn extraction(err: &ClientError) -> Self {
        OrchestrationError::ExtractionFailed {
            detail: err.detail(),
        }
    }
}

impl From<ClientError> for OrchestrationError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::InvalidInput(reason) => {
                OrchestrationError::InvalidInput(reason.to_string())
            }
            other => OrchestrationError::Transport {
                detail: other.detail(),
            },
        }
    }
}

/// Failure to assemble a session from configuration.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
