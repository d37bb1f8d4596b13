//! Article extraction client.
//!
//! Asks the backend for the plain text of the article behind a URL.

use crate::client::{create_client, post_json, ClientError};
use crate::config::BackendConfig;
use crate::summary::ExtractionResult;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Anything that can turn a URL into article text
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn extract(&self, url: &str) -> Result<ExtractionResult, ClientError>;
}

#[async_trait]
impl<T: Extractor + ?Sized> Extractor for Arc<T> {
    async fn extract(&self, url: &str) -> Result<ExtractionResult, ClientError> {
        (**self).extract(url).await
    }
}

#[derive(Serialize)]
struct ExtractRequest<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct ExtractResponse {
    #[serde(default)]
    article: String,
}

/// HTTP client for `POST /extract_article`.
#[derive(Debug, Clone)]
pub struct ExtractionClient {
    http: Client,
    endpoint: String,
}

impl ExtractionClient {
    pub fn new(config: &BackendConfig) -> Result<Self, ClientError> {
        Ok(Self::with_client(create_client(config.timeout())?, config))
    }

    /// Build on an existing HTTP client (connection pools are shared)
    pub fn with_client(http: Client, config: &BackendConfig) -> Self {
        Self {
            http,
            endpoint: config.extract_url(),
        }
    }
}

#[async_trait]
impl Extractor for ExtractionClient {
    async fn extract(&self, url: &str) -> Result<ExtractionResult, ClientError> {
        let response: ExtractResponse =
            post_json(&self.http, &self.endpoint, &ExtractRequest { url }).await?;

        Ok(ExtractionResult {
            article_text: response.article,
        })
    }
}
