//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::core::constants::{files, output_formats, report, timeouts, validator};
use crate::core::error::{HtmlSupError, Result};
use crate::core::types::Crawl;
use crate::discovery::DiscoveryOptions;
use crate::reporting::RenderOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Endpoint of the Nu HTML Checker instance to use
    pub validator_endpoint: Option<String>,

    /// Custom User-Agent header for validator and scraper requests
    pub user_agent: Option<String>,

    /// Per-request timeout in seconds (no timeout when unset)
    pub timeout: Option<u64>,

    /// Crawl parameter: "false", "true" or a positive integer
    pub crawl: Option<String>,

    /// Only follow links whose hostname equals the seed's
    pub same_host: Option<bool>,

    /// Validate just the seed when link discovery fails instead of aborting
    pub discovery_fallback: Option<bool>,

    /// Output format (raw, document, text)
    pub output_format: Option<String>,

    /// Namespace prefix of document tags
    pub tag_namespace: Option<String>,

    /// Chart segments below this percentage merge into "Other"
    pub chart_threshold: Option<f64>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            validator_endpoint: Some(validator::DEFAULT_ENDPOINT.to_string()),
            user_agent: None, // Falls back to the browser user agent
            timeout: None,
            crawl: None, // No crawling by default
            same_host: Some(true),
            discovery_fallback: Some(false), // Abort the run when discovery fails
            output_format: Some(output_formats::DEFAULT.to_string()),
            tag_namespace: Some(report::DEFAULT_TAG_NAMESPACE.to_string()),
            chart_threshold: Some(report::DEFAULT_CHART_THRESHOLD),
            verbose: Some(false),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            HtmlSupError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            HtmlSupError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        // Validate the loaded configuration
        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        // Check for .htmlsup.toml in current directory
        if let Ok(config) = Self::load_from_file(files::CONFIG_FILE_NAME) {
            return config;
        }

        // Check for .htmlsup.toml in parent directories
        for i in 1..=files::CONFIG_SEARCH_DEPTH {
            let path = format!("{}{}", "../".repeat(i), files::CONFIG_FILE_NAME);
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        // Fall back to defaults
        Self::default()
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        // Discovery
        if let Some(ref crawl) = cli_config.crawl {
            self.crawl = Some(crawl.clone());
        }
        if cli_config.any_host {
            self.same_host = Some(false);
        }
        if cli_config.discovery_fallback {
            self.discovery_fallback = Some(true);
        }

        // Network
        if let Some(ref endpoint) = cli_config.validator_endpoint {
            self.validator_endpoint = Some(endpoint.clone());
        }
        if let Some(ref user_agent) = cli_config.user_agent {
            self.user_agent = Some(user_agent.clone());
        }
        if let Some(timeout) = cli_config.timeout {
            self.timeout = Some(timeout);
        }

        // Output & format
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }
        if let Some(ref namespace) = cli_config.tag_namespace {
            self.tag_namespace = Some(namespace.clone());
        }
        if let Some(threshold) = cli_config.chart_threshold {
            self.chart_threshold = Some(threshold);
        }
        if cli_config.verbose {
            self.verbose = Some(true);
        }
    }

    /// Get timeout as Duration, if one is configured
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }

    /// Validator endpoint, defaulting to the public Nu HTML Checker
    pub fn validator_endpoint(&self) -> &str {
        self.validator_endpoint
            .as_deref()
            .unwrap_or(validator::DEFAULT_ENDPOINT)
    }

    /// User-Agent header sent with every request
    pub fn user_agent(&self) -> &str {
        self.user_agent
            .as_deref()
            .unwrap_or(validator::DEFAULT_USER_AGENT)
    }

    /// Parsed crawl parameter
    pub fn crawl(&self) -> Result<Crawl> {
        match self.crawl.as_deref() {
            Some(value) => value.parse(),
            None => Ok(Crawl::Disabled),
        }
    }

    pub fn discovery_options(&self) -> DiscoveryOptions {
        DiscoveryOptions {
            same_host: self.same_host.unwrap_or(true),
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            tag_namespace: self
                .tag_namespace
                .clone()
                .unwrap_or_else(|| report::DEFAULT_TAG_NAMESPACE.to_string()),
            chart_threshold: self
                .chart_threshold
                .unwrap_or(report::DEFAULT_CHART_THRESHOLD),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate timeout
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err(HtmlSupError::Config(
                    "Timeout cannot be 0. Expected a positive integer representing seconds."
                        .to_string(),
                ));
            }
            if timeout > timeouts::MAX_TIMEOUT_SECONDS {
                return Err(HtmlSupError::Config(format!(
                    "Timeout of {timeout} seconds is extremely large (>24 hours). Consider using a smaller value."
                )));
            }
        }

        // Validate crawl parameter
        if let Some(ref crawl) = self.crawl {
            crawl
                .parse::<Crawl>()
                .map_err(|e| HtmlSupError::Config(e.to_string()))?;
        }

        // Validate validator endpoint
        if let Some(ref endpoint) = self.validator_endpoint {
            match Url::parse(endpoint) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {}
                _ => {
                    return Err(HtmlSupError::Config(format!(
                        "Validator endpoint '{endpoint}' is not a valid http(s) URL."
                    )));
                }
            }
        }

        // Validate output format
        if let Some(ref format) = self.output_format
            && !output_formats::ALL.contains(&format.as_str())
        {
            return Err(HtmlSupError::Config(format!(
                "Invalid output format '{format}'. Expected one of: {}.",
                output_formats::ALL.join(", ")
            )));
        }

        // Validate tag namespace
        if let Some(ref namespace) = self.tag_namespace
            && namespace.trim().is_empty()
        {
            return Err(HtmlSupError::Config(
                "Tag namespace cannot be empty.".to_string(),
            ));
        }

        // Validate chart threshold
        if let Some(threshold) = self.chart_threshold
            && !(0.0..=100.0).contains(&threshold)
        {
            return Err(HtmlSupError::Config(format!(
                "Chart threshold {threshold}% is invalid. Expected a value between 0-100."
            )));
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Discovery
    pub crawl: Option<String>,    // --crawl
    pub any_host: bool,           // --any-host
    pub discovery_fallback: bool, // --discovery-fallback

    // Network
    pub validator_endpoint: Option<String>, // --endpoint
    pub user_agent: Option<String>,         // --user-agent
    pub timeout: Option<u64>,               // --timeout

    // Output & format
    pub quiet: bool,                     // --quiet
    pub verbose: bool,                   // --verbose
    pub output_format: Option<String>,   // --format
    pub no_progress: bool,               // --no-progress
    pub tag_namespace: Option<String>,   // --tag-namespace
    pub chart_threshold: Option<f64>,    // --chart-threshold

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}
