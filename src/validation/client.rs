use async_trait::async_trait;
use futures::future::join_all;
use reqwest::header::CONTENT_TYPE;
use rustc_hash::FxHashSet;
use serde::Deserialize;

use crate::{
    config::Config,
    core::constants::validator,
    core::error::{HtmlSupError, Result},
    core::types::{ValidatorMessage, ValidatorResponse},
};

#[async_trait]
pub trait ValidateDocuments {
    /// Validate every URL, returning one response per unique URL in input order.
    async fn validate_documents(&self, urls: &[String]) -> Result<Vec<ValidatorResponse>>;
}

/// Client for the Nu HTML Checker JSON API
#[derive(Debug, Clone)]
pub struct W3cValidator {
    client: reqwest::Client,
    endpoint: String,
}

/// Body of a validator response; everything but `messages` is ignored
#[derive(Debug, Deserialize)]
struct Payload {
    #[serde(default)]
    messages: Vec<ValidatorMessage>,
}

impl W3cValidator {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Build a validator client from the configured endpoint, user agent and timeout.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent());
        if let Some(timeout) = config.timeout_duration() {
            builder = builder.timeout(timeout);
        }

        Ok(Self::new(builder.build()?, config.validator_endpoint()))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn validate_one(&self, url: &str) -> Result<ValidatorResponse> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                (validator::DOC_PARAM, url),
                (validator::OUT_PARAM, validator::OUT_JSON),
            ])
            .header(CONTENT_TYPE, validator::CONTENT_TYPE)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HtmlSupError::ValidatorStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let payload: Payload = response.json().await?;
        log::debug!("Validator returned {} messages for {url}", payload.messages.len());

        Ok(ValidatorResponse {
            url: url.to_string(),
            messages: payload.messages,
        })
    }

    /// Drop repeated URLs, keeping the first occurrence.
    pub fn deduplicate_urls(urls: &[String]) -> Vec<&str> {
        let mut seen_urls = FxHashSet::with_capacity_and_hasher(urls.len(), Default::default());
        let mut unique_urls = Vec::with_capacity(urls.len());

        for url in urls {
            if seen_urls.insert(url.as_str()) {
                unique_urls.push(url.as_str());
            }
        }

        unique_urls
    }
}

#[async_trait]
impl ValidateDocuments for W3cValidator {
    async fn validate_documents(&self, urls: &[String]) -> Result<Vec<ValidatorResponse>> {
        let unique_urls = Self::deduplicate_urls(urls);
        log::info!(
            "Sending {} documents to {}",
            unique_urls.len(),
            self.endpoint
        );

        // Every request settles before the batch is judged
        let results = join_all(unique_urls.iter().map(|url| self.validate_one(url))).await;

        results.into_iter().collect()
    }
}
