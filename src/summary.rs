//! Request and result types shared by the clients and the orchestrator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Requested summary verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Length {
    Short,
    #[default]
    Medium,
    Long,
}

impl Length {
    pub const ALL: [Length; 3] = [Length::Short, Length::Medium, Length::Long];

    pub fn as_str(&self) -> &'static str {
        match self {
            Length::Short => "short",
            Length::Medium => "medium",
            Length::Long => "long",
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of `short`, `medium` or `long`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown summary length: {0:?}")]
pub struct UnknownLength(pub String);

impl FromStr for Length {
    type Err = UnknownLength;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short" => Ok(Length::Short),
            "medium" => Ok(Length::Medium),
            "long" => Ok(Length::Long),
            other => Err(UnknownLength(other.to_string())),
        }
    }
}

/// What the user asked to have summarised.
///
/// At least one of `source_text` / `source_url` must be non-blank; the
/// orchestrator rejects the request otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SummaryRequest {
    pub source_text: Option<String>,
    pub source_url: Option<String>,
    /// Language code for the output, e.g. `"ja"` or `"en"`
    pub target_language: String,
    pub length: Length,
}

impl SummaryRequest {
    /// Request summarising raw article text
    pub fn from_text(
        text: impl Into<String>,
        target_language: impl Into<String>,
        length: Length,
    ) -> Self {
        Self {
            source_text: Some(text.into()),
            source_url: None,
            target_language: target_language.into(),
            length,
        }
    }

    /// Request summarising the article behind a URL
    pub fn from_url(
        url: impl Into<String>,
        target_language: impl Into<String>,
        length: Length,
    ) -> Self {
        Self {
            source_text: None,
            source_url: Some(url.into()),
            target_language: target_language.into(),
            length,
        }
    }

    /// Trimmed text, or `None` when absent or blank
    pub fn text(&self) -> Option<&str> {
        non_blank(self.source_text.as_deref())
    }

    /// Trimmed URL, or `None` when absent or blank
    pub fn url(&self) -> Option<&str> {
        non_blank(self.source_url.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Plain article text returned by the extraction endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub article_text: String,
}

/// Summary returned by the summarisation endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResult {
    pub summary_text: String,
}
