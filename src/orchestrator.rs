//! Decides which backend calls a summary request needs and runs them.
//!
//! Two routes exist:
//!
//! - **Direct**: one call to the summarisation endpoint carrying the text or
//!   the URL plus the target language; the backend extracts and translates.
//! - **Two-step**: for the default language, a URL is first turned into
//!   article text through the extraction endpoint, and that text is then
//!   summarised.
//!
//! Only one submission may be in flight at a time; a concurrent call fails
//! with [`OrchestrationError::Busy`] without touching the network.

use crate::client::{create_client, ClientError};
use crate::config::{Config, RoutingConfig, RoutingStrategy};
use crate::error::OrchestrationError;
use crate::extractor::{ExtractionClient, Extractor};
use crate::summarizer::{SummarizationClient, SummarizeInput, Summarizer};
use crate::summary::{SummaryRequest, SummaryResult};
use reqwest::Url;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Which backend call sequence a request takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Direct,
    TwoStep,
}

/// Validated input source. Text wins when both are given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source<'a> {
    Text(&'a str),
    Url(&'a str),
}

impl<'a> Source<'a> {
    fn from_request(request: &'a SummaryRequest) -> Result<Self, OrchestrationError> {
        if let Some(text) = request.text() {
            return Ok(Source::Text(text));
        }

        let url = request.url().ok_or(OrchestrationError::EmptyInput)?;
        if !is_http_url(url) {
            return Err(OrchestrationError::InvalidUrl(url.to_string()));
        }
        Ok(Source::Url(url))
    }
}

fn is_http_url(candidate: &str) -> bool {
    Url::parse(candidate)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}

/// Holds the single-flight flag until dropped.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct RequestOrchestrator<E, S> {
    extractor: E,
    summarizer: S,
    routing: RoutingConfig,
    in_flight: AtomicBool,
}

impl RequestOrchestrator<ExtractionClient, SummarizationClient> {
    /// Orchestrator talking HTTP to the configured backend
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let http = create_client(config.backend.timeout())?;
        Ok(Self::new(
            ExtractionClient::with_client(http.clone(), &config.backend),
            SummarizationClient::with_client(http, &config.backend),
            config.routing.clone(),
        ))
    }
}

impl<E: Extractor, S: Summarizer> RequestOrchestrator<E, S> {
    pub fn new(extractor: E, summarizer: S, routing: RoutingConfig) -> Self {
        Self {
            extractor,
            summarizer,
            routing,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn routing(&self) -> &RoutingConfig {
        &self.routing
    }

    /// Whether a submission is currently awaiting the backend
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Route a request would take under the current configuration
    pub fn route(&self, request: &SummaryRequest) -> Route {
        match self.routing.strategy {
            RoutingStrategy::Direct => Route::Direct,
            RoutingStrategy::TwoStep => Route::TwoStep,
            RoutingStrategy::Auto if self.is_default_language(&request.target_language) => {
                Route::TwoStep
            }
            RoutingStrategy::Auto => Route::Direct,
        }
    }

    /// Validate, route and run a summary request.
    ///
    /// Invalid input is rejected before any network call. Failures are never
    /// retried; the caller may resubmit.
    pub async fn submit(
        &self,
        request: &SummaryRequest,
    ) -> Result<SummaryResult, OrchestrationError> {
        let source = Source::from_request(request)?;
        let _flight = InFlight::acquire(&self.in_flight).ok_or(OrchestrationError::Busy)?;

        let route = self.route(request);
        info!(?route, length = %request.length, "submitting summary request");

        let result = match route {
            Route::Direct => self.direct(source, request).await,
            Route::TwoStep => self.two_step(source, request).await,
        };

        match &result {
            Ok(summary) => debug!(chars = summary.summary_text.chars().count(), "summary received"),
            Err(e) => warn!(error = %e, "summary request failed"),
        }
        result
    }

    async fn direct(
        &self,
        source: Source<'_>,
        request: &SummaryRequest,
    ) -> Result<SummaryResult, OrchestrationError> {
        let mut input = match source {
            Source::Text(text) => SummarizeInput::text(text, request.length),
            Source::Url(url) => SummarizeInput::url(url, request.length),
        };
        if let Some(lang) = self.target_language(&request.target_language) {
            input = input.target_lang(lang);
        }

        Ok(self.summarizer.summarize(&input).await?)
    }

    async fn two_step(
        &self,
        source: Source<'_>,
        request: &SummaryRequest,
    ) -> Result<SummaryResult, OrchestrationError> {
        let text = match source {
            Source::Text(text) => text.to_string(),
            Source::Url(url) => {
                debug!(url, "extracting article");
                let extracted = self
                    .extractor
                    .extract(url)
                    .await
                    .map_err(|e| OrchestrationError::extraction(&e))?;

                let article = extracted.article_text.trim();
                if article.is_empty() {
                    return Err(OrchestrationError::ExtractionFailed {
                        detail: "the extracted article is empty".to_string(),
                    });
                }
                article.to_string()
            }
        };

        let input = SummarizeInput::text(text, request.length);
        Ok(self.summarizer.summarize(&input).await?)
    }

    /// Requested language, else the default; `None` when both are blank
    fn target_language<'a>(&'a self, requested: &'a str) -> Option<&'a str> {
        [requested.trim(), self.routing.default_language.trim()]
            .into_iter()
            .find(|lang| !lang.is_empty())
    }

    fn is_default_language(&self, requested: &str) -> bool {
        self.target_language(requested)
            .unwrap_or_default()
            .eq_ignore_ascii_case(self.routing.default_language.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::{ExtractionResult, Length};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;

    #[derive(Default)]
    struct StubExtractor {
        calls: Mutex<Vec<String>>,
        reply: Option<String>,
    }

    impl StubExtractor {
        fn returning(article: &str) -> Self {
            Self {
                reply: Some(article.to_string()),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Extractor for StubExtractor {
        async fn extract(&self, url: &str) -> Result<ExtractionResult, ClientError> {
            self.calls.lock().unwrap().push(url.to_string());
            match &self.reply {
                Some(article) => Ok(ExtractionResult {
                    article_text: article.clone(),
                }),
                None => Err(ClientError::Status {
                    status: 500,
                    body: "server error".to_string(),
                }),
            }
        }
    }

    #[derive(Default)]
    struct StubSummarizer {
        calls: Mutex<Vec<SummarizeInput>>,
        gate: Option<Arc<Notify>>,
    }

    impl StubSummarizer {
        fn calls(&self) -> Vec<SummarizeInput> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Summarizer for StubSummarizer {
        async fn summarize(&self, input: &SummarizeInput) -> Result<SummaryResult, ClientError> {
            self.calls.lock().unwrap().push(input.clone());
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            let source = input.text.as_deref().or(input.url.as_deref());
            Ok(SummaryResult {
                summary_text: format!("summary of {source:?}"),
            })
        }
    }

    fn routing(strategy: RoutingStrategy) -> RoutingConfig {
        RoutingConfig {
            strategy,
            default_language: "en".to_string(),
        }
    }

    fn build(
        extractor: &Arc<StubExtractor>,
        summarizer: &Arc<StubSummarizer>,
        strategy: RoutingStrategy,
    ) -> RequestOrchestrator<Arc<StubExtractor>, Arc<StubSummarizer>> {
        RequestOrchestrator::new(extractor.clone(), summarizer.clone(), routing(strategy))
    }

    #[tokio::test]
    async fn blank_input_makes_no_calls() {
        let extractor = Arc::new(StubExtractor::returning("unused"));
        let summarizer = Arc::new(StubSummarizer::default());
        let orchestrator = build(&extractor, &summarizer, RoutingStrategy::Auto);

        let request = SummaryRequest {
            source_text: Some("  \n".to_string()),
            source_url: Some("\t".to_string()),
            target_language: "ja".to_string(),
            length: Length::Medium,
        };
        let err = orchestrator.submit(&request).await.unwrap_err();

        assert!(matches!(err, OrchestrationError::EmptyInput));
        assert!(extractor.calls().is_empty());
        assert!(summarizer.calls().is_empty());
    }

    #[tokio::test]
    async fn text_is_never_extracted() {
        let extractor = Arc::new(StubExtractor::returning("unused"));
        let summarizer = Arc::new(StubSummarizer::default());

        for strategy in [RoutingStrategy::Auto, RoutingStrategy::Direct, RoutingStrategy::TwoStep] {
            let orchestrator = build(&extractor, &summarizer, strategy);
            for lang in ["en", "ja"] {
                let mut request = SummaryRequest::from_text(" Article body ", lang, Length::Short);
                request.source_url = Some("https://example.com/ignored".to_string());
                orchestrator.submit(&request).await.unwrap();
            }
        }

        assert!(extractor.calls().is_empty());
        assert!(summarizer
            .calls()
            .iter()
            .all(|input| input.text.as_deref() == Some("Article body") && input.url.is_none()));
    }

    #[tokio::test]
    async fn auto_routes_by_language() {
        let extractor = Arc::new(StubExtractor::returning("Full text"));
        let summarizer = Arc::new(StubSummarizer::default());
        let orchestrator = build(&extractor, &summarizer, RoutingStrategy::Auto);

        let foreign = SummaryRequest::from_url("https://example.com/a", "fr", Length::Long);
        let native = SummaryRequest::from_url("https://example.com/a", "EN", Length::Long);
        let unspecified = SummaryRequest::from_url("https://example.com/a", "", Length::Long);
        assert_eq!(orchestrator.route(&foreign), Route::Direct);
        assert_eq!(orchestrator.route(&native), Route::TwoStep);
        assert_eq!(orchestrator.route(&unspecified), Route::TwoStep);

        orchestrator.submit(&foreign).await.unwrap();
        assert!(extractor.calls().is_empty());
        assert_eq!(
            summarizer.calls()[0],
            SummarizeInput::url("https://example.com/a", Length::Long).target_lang("fr")
        );

        orchestrator.submit(&native).await.unwrap();
        assert_eq!(extractor.calls(), ["https://example.com/a"]);
        assert_eq!(summarizer.calls()[1], SummarizeInput::text("Full text", Length::Long));
    }

    #[tokio::test]
    async fn empty_extraction_stops_before_summarising() {
        let extractor = Arc::new(StubExtractor::returning("   "));
        let summarizer = Arc::new(StubSummarizer::default());
        let orchestrator = build(&extractor, &summarizer, RoutingStrategy::TwoStep);

        let request = SummaryRequest::from_url("https://example.com/a", "en", Length::Medium);
        let err = orchestrator.submit(&request).await.unwrap_err();

        assert!(matches!(err, OrchestrationError::ExtractionFailed { .. }));
        assert_eq!(extractor.calls().len(), 1);
        assert!(summarizer.calls().is_empty());
    }

    #[tokio::test]
    async fn failed_extraction_wraps_backend_body() {
        let extractor = Arc::new(StubExtractor::default());
        let summarizer = Arc::new(StubSummarizer::default());
        let orchestrator = build(&extractor, &summarizer, RoutingStrategy::TwoStep);

        let request = SummaryRequest::from_url("https://example.com/a", "en", Length::Medium);
        match orchestrator.submit(&request).await {
            Err(OrchestrationError::ExtractionFailed { detail }) => {
                assert_eq!(detail, "server error")
            }
            other => panic!("expected extraction failure, got {other:?}"),
        }
        assert!(summarizer.calls().is_empty());
    }

    #[tokio::test]
    async fn non_http_urls_are_rejected_up_front() {
        let extractor = Arc::new(StubExtractor::returning("unused"));
        let summarizer = Arc::new(StubSummarizer::default());
        let orchestrator = build(&extractor, &summarizer, RoutingStrategy::Direct);

        for url in ["example.com/a", "ftp://example.com/a", "https://"] {
            let request = SummaryRequest::from_url(url, "ja", Length::Medium);
            let err = orchestrator.submit(&request).await.unwrap_err();
            assert!(matches!(err, OrchestrationError::InvalidUrl(_)), "{url}");
        }
        assert!(summarizer.calls().is_empty());
    }

    #[tokio::test]
    async fn concurrent_submission_is_rejected() {
        let gate = Arc::new(Notify::new());
        let extractor = Arc::new(StubExtractor::default());
        let summarizer = Arc::new(StubSummarizer {
            gate: Some(gate.clone()),
            ..Default::default()
        });
        let orchestrator = build(&extractor, &summarizer, RoutingStrategy::Direct);
        let request = SummaryRequest::from_text("body", "ja", Length::Medium);

        let second = async {
            tokio::task::yield_now().await;
            let result = orchestrator.submit(&request).await;
            gate.notify_one();
            result
        };
        let (first, second) = tokio::join!(orchestrator.submit(&request), second);

        assert!(first.is_ok());
        assert!(matches!(second, Err(OrchestrationError::Busy)));
        assert_eq!(summarizer.calls().len(), 1);
        assert!(!orchestrator.is_busy());
    }

    #[tokio::test]
    async fn blank_languages_send_no_target_lang() {
        let extractor = Arc::new(StubExtractor::default());
        let summarizer = Arc::new(StubSummarizer::default());
        let routing = RoutingConfig {
            strategy: RoutingStrategy::Direct,
            default_language: " ".to_string(),
        };
        let orchestrator =
            RequestOrchestrator::new(extractor.clone(), summarizer.clone(), routing);

        let request = SummaryRequest::from_text("body", "", Length::Short);
        orchestrator.submit(&request).await.unwrap();

        let sent = &summarizer.calls()[0];
        assert_eq!(sent.target_lang, None);
        assert_eq!(
            serde_json::to_value(sent).unwrap(),
            serde_json::json!({ "text": "body", "length": "short" })
        );
    }
}
