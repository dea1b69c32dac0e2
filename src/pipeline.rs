//! Programmatic entry point: discovery, validation, compilation and rendering
//! of one run, in that order.

use reqwest::Url;
use std::time::Instant;

use crate::{
    config::Config,
    core::error::{HtmlSupError, Result, Stage},
    core::types::{Crawl, OutputKind, ValidatorMessage},
    discovery::{CandidateUrls, LinkScraper, discover},
    reporting::{Report, logging, render},
    validation::{ValidateDocuments, compile_summary},
};

/// Validated input of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub seed: String,
    pub crawl: Crawl,
    pub output: OutputKind,
}

impl RunRequest {
    /// Check the raw run parameters before any network activity.
    ///
    /// `crawl` defaults to disabled and `output` to the document format.
    pub fn parse(url: Option<&str>, crawl: Option<&str>, output: Option<&str>) -> Result<Self> {
        let seed = url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| HtmlSupError::InvalidArgument("A URL to validate is required.".to_string()))?;

        match Url::parse(seed) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some() => {}
            _ => {
                return Err(HtmlSupError::InvalidArgument(format!(
                    "'{seed}' is not an absolute http(s) URL."
                )));
            }
        }

        let crawl = match crawl {
            Some(value) => value.parse()?,
            None => Crawl::Disabled,
        };
        let output = match output {
            Some(value) => value.parse()?,
            None => OutputKind::Document,
        };

        Ok(Self {
            seed: seed.to_string(),
            crawl,
            output,
        })
    }
}

/// Run the whole pipeline for one request.
///
/// Any failure is returned as [`HtmlSupError::Run`] carrying the seed URL and
/// the stage that failed.
pub async fn run<S, V>(request: &RunRequest, config: &Config, scraper: &S, validator: &V) -> Result<Report>
where
    S: LinkScraper + Sync + ?Sized,
    V: ValidateDocuments + Sync + ?Sized,
{
    let seed = request.seed.as_str();

    let candidates = match discover(seed, request.crawl, config.discovery_options(), scraper).await {
        Ok(candidates) => candidates,
        Err(e) if config.discovery_fallback.unwrap_or(false) => {
            logging::log_warning(&format!(
                "Link discovery failed for {seed}, validating the seed only: {e}"
            ));
            CandidateUrls::seed_only(seed)
        }
        Err(e) => return Err(e.in_run(seed, Stage::Discovery)),
    };
    logging::log_url_discovery(seed, candidates.as_slice());

    logging::log_validation_start(candidates.len());
    let start = Instant::now();
    let responses = validator
        .validate_documents(candidates.as_slice())
        .await
        .map_err(|e| e.in_run(seed, Stage::Validation))?;

    let messages: Vec<ValidatorMessage> = responses
        .into_iter()
        .flat_map(|response| response.messages)
        .collect();
    logging::log_validation_complete(candidates.len(), messages.len(), start.elapsed().as_millis());

    let summary = compile_summary(&messages).map_err(|e| e.in_run(seed, Stage::Compilation))?;
    logging::log_summary(&summary);

    Ok(render(
        summary,
        candidates.into_vec(),
        request.output,
        &config.render_options(),
    ))
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::core::types::ValidatorResponse;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const SEED: &str = "https://example.com";

    struct FakeScraper {
        links: Vec<String>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl FakeScraper {
        fn with_links(links: &[&str]) -> Self {
            Self {
                links: links.iter().map(|l| l.to_string()).collect(),
                fail: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                links: Vec::new(),
                fail: true,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl LinkScraper for FakeScraper {
        async fn scrape_links(&self, url: &str) -> Result<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(HtmlSupError::Scraper {
                    url: url.to_string(),
                    status: 500,
                });
            }
            Ok(self.links.clone())
        }
    }

    /// Returns the same messages for every URL and records what it was asked for
    #[derive(Default)]
    struct FakeValidator {
        messages: Vec<ValidatorMessage>,
        fail_status: Option<u16>,
        requested: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ValidateDocuments for FakeValidator {
        async fn validate_documents(&self, urls: &[String]) -> Result<Vec<ValidatorResponse>> {
            self.requested
                .lock()
                .unwrap()
                .extend(urls.iter().cloned());
            if let Some(status) = self.fail_status {
                return Err(HtmlSupError::ValidatorStatus {
                    url: urls[0].clone(),
                    status,
                });
            }
            Ok(urls
                .iter()
                .map(|url| ValidatorResponse {
                    url: url.clone(),
                    messages: self.messages.clone(),
                })
                .collect())
        }
    }

    fn request(crawl: Option<&str>, output: &str) -> RunRequest {
        RunRequest::parse(Some(SEED), crawl, Some(output)).unwrap()
    }

    #[test]
    fn test_run_request__parse_defaults() {
        let request = RunRequest::parse(Some(" https://example.com "), None, None).unwrap();

        assert_eq!(request.seed, SEED);
        assert_eq!(request.crawl, Crawl::Disabled);
        assert_eq!(request.output, OutputKind::Document);
    }

    #[test]
    fn test_run_request__rejects_missing_or_invalid_url() {
        for url in [None, Some(""), Some("example.com"), Some("ftp://example.com"), Some("/relative")] {
            let result = RunRequest::parse(url, None, None);
            assert!(
                matches!(result, Err(HtmlSupError::InvalidArgument(_))),
                "{url:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_run_request__rejects_invalid_crawl_and_output() {
        assert!(matches!(
            RunRequest::parse(Some(SEED), Some("0"), None),
            Err(HtmlSupError::InvalidArgument(_))
        ));
        assert!(matches!(
            RunRequest::parse(Some(SEED), None, Some("pdf")),
            Err(HtmlSupError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_run__raw_report_aggregates_all_documents() {
        let scraper = FakeScraper::with_links(&["https://example.com/about", "https://other.org"]);
        let validator = FakeValidator {
            messages: vec![ValidatorMessage::new("error").with_subtype("fatal").with_message("Bad tag")],
            ..Default::default()
        };

        let report = run(&request(Some("true"), "raw"), &Config::default(), &scraper, &validator)
            .await
            .unwrap();

        match report {
            Report::Raw(raw) => {
                assert_eq!(raw.urls, vec![SEED, "https://example.com/about"]);
                assert_eq!(raw.summary.error.count, 2);
                assert_eq!(raw.summary.error.subtypes["fatal"].messages[0].count, 2);
            }
            other => panic!("Expected raw report, got {other:?}"),
        }
        assert_eq!(
            *validator.requested.lock().unwrap(),
            vec![SEED, "https://example.com/about"]
        );
    }

    #[tokio::test]
    async fn test_run__when_crawl_disabled__never_scrapes() {
        let scraper = FakeScraper::with_links(&["https://example.com/about"]);
        let validator = FakeValidator::default();

        let report = run(&request(None, "document"), &Config::default(), &scraper, &validator)
            .await
            .unwrap();

        assert_eq!(scraper.calls.load(Ordering::SeqCst), 0);
        match report {
            Report::Document(document) => {
                assert_eq!(document.title, "HTML Validator | https://example.com | 0 errors");
            }
            other => panic!("Expected document report, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_run__when_discovery_fails__aborts_with_stage() {
        let scraper = FakeScraper::failing();
        let validator = FakeValidator::default();

        let result = run(&request(Some("true"), "raw"), &Config::default(), &scraper, &validator).await;

        match result {
            Err(HtmlSupError::Run { seed, stage, source }) => {
                assert_eq!(seed, SEED);
                assert_eq!(stage, Stage::Discovery);
                assert!(matches!(*source, HtmlSupError::Scraper { status: 500, .. }));
            }
            other => panic!("Expected run error, got {other:?}"),
        }
        assert!(validator.requested.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run__when_discovery_fails_with_fallback__validates_seed() {
        let scraper = FakeScraper::failing();
        let validator = FakeValidator::default();
        let config = Config {
            discovery_fallback: Some(true),
            ..Default::default()
        };

        let report = run(&request(Some("true"), "raw"), &config, &scraper, &validator)
            .await
            .unwrap();

        assert_eq!(scraper.calls.load(Ordering::SeqCst), 1);
        match report {
            Report::Raw(raw) => assert_eq!(raw.urls, vec![SEED]),
            other => panic!("Expected raw report, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_run__when_validator_fails__reports_validation_stage() {
        let scraper = FakeScraper::with_links(&[]);
        let validator = FakeValidator {
            fail_status: Some(429),
            ..Default::default()
        };

        let error = run(&request(None, "raw"), &Config::default(), &scraper, &validator)
            .await
            .unwrap_err();

        assert_eq!(error.stage(), Some(Stage::Validation));
        assert!(error.to_string().contains("429"));
    }

    #[tokio::test]
    async fn test_run__when_unknown_message_type__reports_compilation_stage() {
        let scraper = FakeScraper::with_links(&[]);
        let validator = FakeValidator {
            messages: vec![ValidatorMessage::new("warning")],
            ..Default::default()
        };

        let error = run(&request(None, "document"), &Config::default(), &scraper, &validator)
            .await
            .unwrap_err();

        assert_eq!(error.stage(), Some(Stage::Compilation));
    }

    #[tokio::test]
    async fn test_run__document_uses_configured_namespace() {
        let scraper = FakeScraper::with_links(&[]);
        let validator = FakeValidator {
            messages: vec![ValidatorMessage::new("info").with_subtype("warning")],
            ..Default::default()
        };
        let config = Config {
            tag_namespace: Some("qa".to_string()),
            ..Default::default()
        };

        let report = run(&request(None, "document"), &config, &scraper, &validator)
            .await
            .unwrap();

        match report {
            Report::Document(document) => assert_eq!(
                document.tags,
                vec!["qa", "qa-example-com", "qa-info", "qa-warning-info"]
            ),
            other => panic!("Expected document report, got {other:?}"),
        }
    }
}
