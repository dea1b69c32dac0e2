use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use crate::core::constants::{crawl, output_formats};
use crate::core::error::HtmlSupError;

/// The validator's top-level message classification.
///
/// The taxonomy is closed: the Nu HTML Checker documents exactly these three
/// types, and anything else is rejected when messages are classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageType {
    Error,
    Info,
    NonDocumentError,
}

impl MessageType {
    /// Every type, in report order
    pub const ALL: [MessageType; 3] = [
        MessageType::Error,
        MessageType::Info,
        MessageType::NonDocumentError,
    ];

    /// Wire name of the type
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Error => "error",
            MessageType::Info => "info",
            MessageType::NonDocumentError => "non-document-error",
        }
    }

    /// Plural heading used in rendered reports, e.g. "Errors"
    pub fn label(&self) -> &'static str {
        match self {
            MessageType::Error => "Errors",
            MessageType::Info => "Infos",
            MessageType::NonDocumentError => "Non-document-errors",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = HtmlSupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(MessageType::Error),
            "info" => Ok(MessageType::Info),
            "non-document-error" => Ok(MessageType::NonDocumentError),
            other => Err(HtmlSupError::Classification(other.to_string())),
        }
    }
}

/// One finding reported by the validator.
///
/// Only `type` is mandatory in the validator's JSON; the type is kept as
/// received and classified later so unknown values surface as errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorMessage {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, alias = "subType", skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extract: Option<String>,
}

impl ValidatorMessage {
    /// Create a message of the given type with no optional fields.
    pub fn new<S: Into<String>>(kind: S) -> Self {
        Self {
            kind: kind.into(),
            subtype: None,
            message: None,
            extract: None,
        }
    }

    pub fn with_subtype<S: Into<String>>(mut self, subtype: S) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    pub fn with_message<S: Into<String>>(mut self, message: S) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_extract<S: Into<String>>(mut self, extract: S) -> Self {
        self.extract = Some(extract.into());
        self
    }
}

/// Messages the validator returned for one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorResponse {
    pub url: String,
    pub messages: Vec<ValidatorMessage>,
}

/// How far URL discovery follows links from the seed page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Crawl {
    /// Validate the seed only
    #[default]
    Disabled,
    /// Follow every qualifying link
    Unlimited,
    /// Stop once this many URLs (seed included) are collected
    Limit(NonZeroUsize),
}

impl Crawl {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Crawl::Disabled)
    }

    /// Maximum size of the candidate set, `None` when unbounded.
    pub fn limit(&self) -> Option<usize> {
        match self {
            Crawl::Disabled => Some(1),
            Crawl::Unlimited => None,
            Crawl::Limit(n) => Some(n.get()),
        }
    }
}

impl FromStr for Crawl {
    type Err = HtmlSupError;

    /// Accepts `false`, `true` or a positive integer.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.eq_ignore_ascii_case(crawl::DISABLED) {
            return Ok(Crawl::Disabled);
        }
        if value.eq_ignore_ascii_case(crawl::UNLIMITED) {
            return Ok(Crawl::Unlimited);
        }

        value
            .parse::<usize>()
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Crawl::Limit)
            .ok_or_else(|| {
                HtmlSupError::InvalidArgument(format!(
                    "Crawl value '{s}' is invalid. Expected 'true', 'false' or a positive integer."
                ))
            })
    }
}

impl fmt::Display for Crawl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Crawl::Disabled => f.write_str(crawl::DISABLED),
            Crawl::Unlimited => f.write_str(crawl::UNLIMITED),
            Crawl::Limit(n) => write!(f, "{n}"),
        }
    }
}

/// What the report renderer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// Summary and inspected URLs, unchanged
    Raw,
    /// Publishable `{title, tags, content}` document
    Document,
}

impl FromStr for OutputKind {
    type Err = HtmlSupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            output_formats::RAW => Ok(OutputKind::Raw),
            output_formats::DOCUMENT => Ok(OutputKind::Document),
            other => Err(HtmlSupError::InvalidArgument(format!(
                "Output kind '{other}' is invalid. Expected one of: {}, {}.",
                output_formats::RAW,
                output_formats::DOCUMENT
            ))),
        }
    }
}
