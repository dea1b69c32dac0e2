use std::fmt;

/// Pipeline stage that produced a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Discovery,
    Validation,
    Compilation,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Discovery => "discovery",
            Stage::Validation => "validation",
            Stage::Compilation => "compilation",
        };
        f.write_str(name)
    }
}

/// Comprehensive error types for htmlsup operations
#[derive(Debug)]
pub enum HtmlSupError {
    /// IO error (config files, stdout)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// Invalid user input (seed URL, crawl value, output kind)
    InvalidArgument(String),

    /// HTTP client error, including undecodable response bodies
    Http(reqwest::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// JSON serialization error
    Json(serde_json::Error),

    /// The seed page could not be fetched for link discovery
    Scraper { url: String, status: u16 },

    /// The validator answered with a non-success status
    ValidatorStatus { url: String, status: u16 },

    /// A validator message carried a type outside the known taxonomy
    Classification(String),

    /// A pipeline run failed; carries the seed URL and the failing stage
    Run {
        seed: String,
        stage: Stage,
        source: Box<HtmlSupError>,
    },
}

impl HtmlSupError {
    /// Wrap an error with the seed URL and stage of the run it aborted.
    pub fn in_run(self, seed: &str, stage: Stage) -> Self {
        HtmlSupError::Run {
            seed: seed.to_string(),
            stage,
            source: Box::new(self),
        }
    }

    /// Stage of a wrapped run failure, if any
    pub fn stage(&self) -> Option<Stage> {
        match self {
            HtmlSupError::Run { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

impl fmt::Display for HtmlSupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HtmlSupError::Io(err) => write!(f, "IO error: {err}"),
            HtmlSupError::Config(msg) => write!(f, "Configuration error: {msg}"),
            HtmlSupError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            HtmlSupError::Http(err) => write!(f, "HTTP error: {err}"),
            HtmlSupError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            HtmlSupError::Json(err) => write!(f, "JSON error: {err}"),
            HtmlSupError::Scraper { url, status } => {
                write!(f, "Scraper error: {url} answered with status {status}")
            }
            HtmlSupError::ValidatorStatus { url, status } => {
                write!(f, "Invalid validator response status {status} for {url}")
            }
            HtmlSupError::Classification(kind) => {
                write!(f, "Classification error: unknown validator message type '{kind}'")
            }
            HtmlSupError::Run {
                seed,
                stage,
                source,
            } => write!(f, "Run for {seed} failed during {stage}: {source}"),
        }
    }
}

impl std::error::Error for HtmlSupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HtmlSupError::Io(err) => Some(err),
            HtmlSupError::Http(err) => Some(err),
            HtmlSupError::TomlParsing(err) => Some(err),
            HtmlSupError::Json(err) => Some(err),
            HtmlSupError::Run { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for HtmlSupError {
    fn from(err: std::io::Error) -> Self {
        HtmlSupError::Io(err)
    }
}

impl From<reqwest::Error> for HtmlSupError {
    fn from(err: reqwest::Error) -> Self {
        HtmlSupError::Http(err)
    }
}

impl From<toml::de::Error> for HtmlSupError {
    fn from(err: toml::de::Error) -> Self {
        HtmlSupError::TomlParsing(err)
    }
}

impl From<serde_json::Error> for HtmlSupError {
    fn from(err: serde_json::Error) -> Self {
        HtmlSupError::Json(err)
    }
}

/// Type alias for Results using HtmlSupError
pub type Result<T> = std::result::Result<T, HtmlSupError>;
