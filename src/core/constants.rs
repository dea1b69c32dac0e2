/// Application-wide constants to avoid magic values throughout the codebase.
///
/// This module centralizes all magic strings, numbers, and other literal values
/// used across the application, making them easier to maintain and modify.
/// Output format constants
pub mod output_formats {
    /// Raw format - the summary and inspected URLs as JSON
    pub const RAW: &str = "raw";
    /// Document format - `{title, tags, content}` JSON ready for publishing
    pub const DOCUMENT: &str = "document";
    /// Text format - colored terminal summary
    pub const TEXT: &str = "text";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 3] = [RAW, DOCUMENT, TEXT];
}

/// External validator constants
pub mod validator {
    /// Nu HTML Checker endpoint
    pub const DEFAULT_ENDPOINT: &str = "https://validator.w3.org/nu/";
    /// Query parameter carrying the document URL
    pub const DOC_PARAM: &str = "doc";
    /// Query parameter selecting the response format
    pub const OUT_PARAM: &str = "out";
    /// Response format requested from the validator
    pub const OUT_JSON: &str = "json";
    /// The validator rejects requests from unknown agents, so present as a browser
    pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/41.0.2272.101 Safari/537.36";
    /// Content type sent with every validation request
    pub const CONTENT_TYPE: &str = "text/html; charset=UTF-8";
}

/// Message classification constants
pub mod messages {
    /// Subtype used when a message carries none
    pub const DEFAULT_SUBTYPE: &str = "other";
    /// Key a type bucket already uses for its own total
    pub const RESERVED_SUBTYPE: &str = "count";
    /// Bucket for messages whose subtype is the reserved key
    pub const RESERVED_SUBTYPE_RENAMED: &str = "count-subtype";
}

/// Crawl parameter spellings
pub mod crawl {
    /// Crawling disabled
    pub const DISABLED: &str = "false";
    /// Crawl every discovered link
    pub const UNLIMITED: &str = "true";
}

/// Report rendering constants
pub mod report {
    /// Tag every published document carries
    pub const DEFAULT_TAG_NAMESPACE: &str = "htmlsup";
    /// Chart segments below this share of their type (percent) merge into "Other"
    pub const DEFAULT_CHART_THRESHOLD: f64 = 5.0;
    /// Label of the merged chart segment
    pub const OTHER_SEGMENT_LABEL: &str = "Other";
    /// Colors cycled through by chart segments
    pub const CHART_COLORS: [&str; 4] = ["darksalmon", "moccasin", "thistle", "skyblue"];
    /// Color of the merged chart segment
    pub const OTHER_SEGMENT_COLOR: &str = "gainsboro";
    /// Title prefix of every document
    pub const TITLE_PREFIX: &str = "HTML Validator";
    /// Tag suffix used when no summary is available
    pub const UNKNOWN_TAG: &str = "unknown";
    /// Line-break marker for escaped extracts
    pub const LINE_BREAK: &str = "<br />";
}

/// Configuration file constants
pub mod files {
    /// Name of the configuration file looked up in standard locations
    pub const CONFIG_FILE_NAME: &str = ".htmlsup.toml";
    /// How many parent directories are searched for a configuration file
    pub const CONFIG_SEARCH_DEPTH: usize = 3;
}

/// Timeout constants
pub mod timeouts {
    /// Largest accepted request timeout in seconds (24 hours)
    pub const MAX_TIMEOUT_SECONDS: u64 = 86400;
}

/// Display and formatting constants
pub mod display {
    /// Emoji for success status
    pub const SUCCESS_EMOJI: &str = "✅";
    /// Emoji for error status
    pub const ERROR_EMOJI: &str = "❌";
    /// Emoji for informational findings
    pub const INFO_EMOJI: &str = "ℹ️";
}
