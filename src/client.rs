//! Shared HTTP plumbing for the backend clients.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// User-Agent string identifying this client
const USER_AGENT: &str = concat!("briefer/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("failed to reach backend: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
}

impl ClientError {
    /// Raw response body for status errors, otherwise the error text
    pub fn detail(&self) -> String {
        match self {
            ClientError::Status { body, .. } => body.clone(),
            other => other.to_string(),
        }
    }
}

/// Create a configured HTTP client for the backend
pub fn create_client(timeout: Duration) -> Result<Client, ClientError> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?)
}

/// POST a JSON body and decode a JSON success response.
///
/// Non-success responses surface their body verbatim.
pub(crate) async fn post_json<B, R>(client: &Client, url: &str, body: &B) -> Result<R, ClientError>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let response = client.post(url).json(body).send().await?;
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        return Err(ClientError::Status {
            status: status.as_u16(),
            body: text,
        });
    }

    Ok(serde_json::from_str(&text)?)
}
