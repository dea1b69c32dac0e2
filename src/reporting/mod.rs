//! Report rendering and logging
//!
//! This module turns a compiled summary into raw JSON or a publishable
//! document, and provides structured logging for the application.

pub mod chart;
pub mod document;
pub mod escape;
pub mod logging;

use serde::Serialize;

use crate::core::constants::report;
use crate::core::types::OutputKind;
use crate::validation::Summary;

// Re-export commonly used items
pub use chart::{ChartSegment, chart_segments};
pub use document::{DocumentReport, document_tags};
pub use escape::{escape_extract, slug};

/// Settings of the document renderer
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Prefix of every document tag
    pub tag_namespace: String,
    /// Chart segments below this percentage merge into "Other"
    pub chart_threshold: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            tag_namespace: report::DEFAULT_TAG_NAMESPACE.to_string(),
            chart_threshold: report::DEFAULT_CHART_THRESHOLD,
        }
    }
}

/// The summary and the URLs it covers, unchanged
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawReport {
    pub summary: Summary,
    pub urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Report {
    Raw(RawReport),
    Document(DocumentReport),
}

impl Report {
    /// The summary behind the report, if it carries one
    pub fn summary(&self) -> Option<&Summary> {
        match self {
            Report::Raw(raw) => Some(&raw.summary),
            Report::Document(_) => None,
        }
    }
}

/// Render a summary of the inspected URLs. The first URL is the seed.
pub fn render(summary: Summary, urls: Vec<String>, kind: OutputKind, options: &RenderOptions) -> Report {
    match kind {
        OutputKind::Raw => Report::Raw(RawReport { summary, urls }),
        OutputKind::Document => Report::Document(DocumentReport::new(&summary, &urls, options)),
    }
}
