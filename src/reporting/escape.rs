//! Text helpers for publishable documents.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::constants::report;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Failed to compile whitespace pattern"));

static URL_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://").expect("Failed to compile scheme pattern"));

static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_-]+").expect("Failed to compile slug pattern"));

/// Escape text for embedding in a document body.
///
/// `<`, `>`, `&` and every non-ASCII character become numeric character
/// references. The result is trimmed and each whitespace run collapses to a
/// single space, or to a line break marker when the run spans lines.
pub fn escape_extract(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '<' | '>' | '&') || !c.is_ascii() {
            escaped.push_str(&format!("&#{};", u32::from(c)));
        } else {
            escaped.push(c);
        }
    }

    WHITESPACE_RUN
        .replace_all(escaped.trim(), |caps: &regex::Captures| {
            if caps[0].contains(['\n', '\r']) {
                report::LINE_BREAK
            } else {
                " "
            }
        })
        .into_owned()
}

/// [`escape_extract`] for text placed inside a double-quoted attribute.
pub fn escape_attribute(text: &str) -> String {
    escape_extract(text).replace('"', "&#34;")
}

/// Turn a URL or label into a tag-safe slug, e.g. `https://www.Example.com/a/`
/// becomes `example-com-a`.
pub fn slug(text: &str) -> String {
    let lowered = text.to_lowercase();
    let without_scheme = URL_SCHEME.replace(&lowered, "");
    let without_www = without_scheme
        .strip_prefix("www.")
        .unwrap_or(&*without_scheme);
    let dashed = without_www.replace(['/', '.', ' '], "-");
    let cleaned = NON_SLUG_CHARS.replace_all(&dashed, "");

    cleaned
        .strip_suffix('-')
        .unwrap_or(&*cleaned)
        .to_string()
}

/// Upper-case the first character, e.g. `fatal` becomes `Fatal`
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn test_escape_extract__escapes_markup_characters() {
        assert_eq!(
            escape_extract(r#"<script>&"quote""#),
            r#"&#60;script&#62;&#38;"quote""#
        );
    }

    #[test]
    fn test_escape_extract__escapes_non_ascii() {
        assert_eq!(escape_extract("café\u{a0}ok"), "caf&#233;&#160;ok");
    }

    #[test]
    fn test_escape_extract__trims_and_collapses_whitespace() {
        assert_eq!(escape_extract("  <p>   hello \t world  "), "&#60;p&#62; hello world");
    }

    #[test]
    fn test_escape_extract__line_breaks_become_markers() {
        assert_eq!(escape_extract("a\n  b\r\nc d"), "a<br />b<br />c d");
    }

    #[test]
    fn test_escape_extract__when_empty__returns_empty() {
        assert_eq!(escape_extract(""), "");
        assert_eq!(escape_extract(" \n "), "");
    }

    #[test]
    fn test_escape_attribute__escapes_quotes() {
        assert_eq!(
            escape_attribute(r#"<img src=x>" a"#),
            "&#60;img src=x&#62;&#34; a"
        );
    }

    #[test]
    fn test_slug__strips_scheme_and_www() {
        assert_eq!(slug("https://www.Example.com/blog/"), "example-com-blog");
        assert_eq!(slug("HTTP://example.com"), "example-com");
    }

    #[test]
    fn test_slug__removes_non_word_characters() {
        assert_eq!(slug("https://example.com/a?b=c&d"), "example-com-abcd");
        assert_eq!(slug("my page"), "my-page");
    }

    #[test]
    fn test_slug__trims_only_one_trailing_dash() {
        assert_eq!(slug("https://example.com//"), "example-com-");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("fatal"), "Fatal");
        assert_eq!(capitalize(""), "");
    }
}
