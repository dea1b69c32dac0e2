//! Check web pages against the Nu HTML Checker and summarize the findings.
//!
//! A run expands a seed URL into the pages to check, validates them
//! concurrently, compiles every message into a sorted summary and renders
//! that summary as raw JSON or as a publishable document.

pub mod config;
pub mod core;
pub mod discovery;
pub mod pipeline;
pub mod reporting;
pub mod ui;
pub mod validation;

// Re-export commonly used items
pub use config::{CliConfig, Config};
pub use crate::core::{
    Crawl, HtmlSupError, MessageType, OutputKind, Result, Stage, ValidatorMessage,
    ValidatorResponse,
};
pub use discovery::{CandidateUrls, DiscoveryOptions, HttpLinkScraper, LinkScraper, discover};
pub use pipeline::{RunRequest, run};
pub use reporting::{DocumentReport, RawReport, RenderOptions, Report, render};
pub use validation::{Summary, ValidateDocuments, W3cValidator, compile_summary};
