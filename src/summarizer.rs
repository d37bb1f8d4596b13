//! Summarisation client.
//!
//! Sends text or a URL to the backend summariser. When a URL or a target
//! language is given, the backend extracts and translates on its side.

use crate::client::{create_client, post_json, ClientError};
use crate::config::BackendConfig;
use crate::summary::{Length, SummaryResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Body of a `POST /summarize` request.
///
/// Exactly one of `text` / `url` is expected to be set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummarizeInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_lang: Option<String>,
    pub length: Length,
}

impl SummarizeInput {
    pub fn text(text: impl Into<String>, length: Length) -> Self {
        Self {
            text: Some(text.into()),
            url: None,
            target_lang: None,
            length,
        }
    }

    pub fn url(url: impl Into<String>, length: Length) -> Self {
        Self {
            text: None,
            url: Some(url.into()),
            target_lang: None,
            length,
        }
    }

    pub fn target_lang(mut self, lang: impl Into<String>) -> Self {
        self.target_lang = Some(lang.into());
        self
    }

    /// Reject inputs carrying both or neither of text and url
    pub fn validate(&self) -> Result<(), ClientError> {
        let has_text = self.text.as_deref().is_some_and(|t| !t.trim().is_empty());
        let has_url = self.url.as_deref().is_some_and(|u| !u.trim().is_empty());

        match (has_text, has_url) {
            (true, false) | (false, true) => Ok(()),
            (true, true) => Err(ClientError::InvalidInput("both text and url were given")),
            (false, false) => Err(ClientError::InvalidInput("neither text nor url was given")),
        }
    }
}

/// Anything that can summarise a [`SummarizeInput`]
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, input: &SummarizeInput) -> Result<SummaryResult, ClientError>;
}

#[async_trait]
impl<T: Summarizer + ?Sized> Summarizer for Arc<T> {
    async fn summarize(&self, input: &SummarizeInput) -> Result<SummaryResult, ClientError> {
        (**self).summarize(input).await
    }
}

#[derive(Deserialize)]
struct SummarizeResponse {
    #[serde(default)]
    summary: String,
}

/// HTTP client for `POST /summarize`.
#[derive(Debug, Clone)]
pub struct SummarizationClient {
    http: Client,
    endpoint: String,
}

impl SummarizationClient {
    pub fn new(config: &BackendConfig) -> Result<Self, ClientError> {
        Ok(Self::with_client(create_client(config.timeout())?, config))
    }

    pub fn with_client(http: Client, config: &BackendConfig) -> Self {
        Self {
            http,
            endpoint: config.summarize_url(),
        }
    }
}

#[async_trait]
impl Summarizer for SummarizationClient {
    async fn summarize(&self, input: &SummarizeInput) -> Result<SummaryResult, ClientError> {
        input.validate()?;

        let response: SummarizeResponse = post_json(&self.http, &self.endpoint, input).await?;

        Ok(SummaryResult {
            summary_text: response.summary,
        })
    }
}
