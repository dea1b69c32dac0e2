use serde::Serialize;

use crate::core::constants::report;
use crate::core::types::MessageType;
use crate::validation::{SubtypeSummary, Summary};

use super::RenderOptions;
use super::chart::render_chart;
use super::escape::{capitalize, escape_extract, slug};

/// A report ready for publishing: exactly what the publishing collaborator accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentReport {
    pub title: String,
    pub tags: Vec<String>,
    pub content: String,
}

impl DocumentReport {
    /// Render the document for a summary of the given inspected URLs.
    ///
    /// The first URL is the seed of the run.
    pub fn new(summary: &Summary, urls: &[String], options: &RenderOptions) -> Self {
        let seed = urls.first().map_or("", String::as_str);

        Self {
            title: format!(
                "{} | {seed} | {} errors",
                report::TITLE_PREFIX,
                summary.error.count
            ),
            tags: document_tags(seed, Some(summary), &options.tag_namespace),
            content: document_content(summary, urls, options),
        }
    }

    /// The document published when a run fails before a summary exists.
    pub fn failure(seed: &str, error: &dyn std::error::Error, options: &RenderOptions) -> Self {
        Self {
            title: format!("{} | {seed}", report::TITLE_PREFIX),
            tags: document_tags(seed, None, &options.tag_namespace),
            content: format!(
                "Oops. Something went wrong: {}",
                escape_extract(&error.to_string())
            ),
        }
    }
}

/// Tags for a document about `seed`; without a summary the result is marked unknown.
pub fn document_tags(seed: &str, summary: Option<&Summary>, namespace: &str) -> Vec<String> {
    let mut tags = vec![namespace.to_string(), format!("{namespace}-{}", slug(seed))];

    let Some(summary) = summary else {
        tags.push(format!("{namespace}-{}", report::UNKNOWN_TAG));
        return tags;
    };

    for (kind, bucket) in summary.iter() {
        if bucket.is_empty() {
            continue;
        }

        tags.push(format!("{namespace}-{kind}"));
        for (subtype, _) in bucket.non_empty_subtypes() {
            let tag = format!("{namespace}-{}-{kind}", slug(subtype));
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
    }

    tags
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// Join phrases as `a, b and c were encountered.`
pub fn tally_sentence(items: &[String]) -> String {
    match items {
        [] => "No validation issues were encountered.".to_string(),
        [only] => format!("{only} were encountered."),
        [init @ .., last] => format!("{} and {last} were encountered.", init.join(", ")),
    }
}

fn document_content(summary: &Summary, urls: &[String], options: &RenderOptions) -> String {
    let ns = options.tag_namespace.as_str();
    let mut html = String::new();

    html.push_str("<p>The following URLs were inspected:</p>");
    html.push_str(&format!(r#"<ul class="{ns}-urls">"#));
    for url in urls {
        html.push_str(&format!("<li>{}</li>", escape_extract(url)));
    }
    html.push_str("</ul>");

    let tally: Vec<String> = summary
        .iter()
        .flat_map(|(kind, bucket)| {
            bucket.non_empty_subtypes().map(move |(subtype, entry)| {
                format!(
                    r#"<span class="{ns}-summary-{kind} {ns}-summary-{kind}-{sub}">{text}</span>"#,
                    sub = slug(subtype),
                    text = plural(entry.count, &format!("{} {kind}", escape_extract(subtype))),
                )
            })
        })
        .collect();
    html.push_str(&format!(
        r#"<p class="{ns}-summary">{}</p>"#,
        tally_sentence(&tally)
    ));

    for (kind, bucket) in summary.iter() {
        if bucket.is_empty() {
            continue;
        }

        html.push_str(&format!("<h2>{}</h2>", kind.label()));
        html.push_str(&render_chart(kind, bucket, ns, options.chart_threshold));

        for (subtype, entry) in bucket.non_empty_subtypes() {
            render_subtype(&mut html, ns, kind, subtype, entry);
        }
    }

    html.replace(['\r', '\n', '\t'], "")
}

fn render_subtype(html: &mut String, ns: &str, kind: MessageType, subtype: &str, entry: &SubtypeSummary) {
    let class = format!("{ns}-{kind}-{}", slug(subtype));

    html.push_str(&format!(
        "<h3>{} {}</h3>",
        escape_extract(&capitalize(subtype)),
        kind.label()
    ));
    html.push_str("<details>");
    html.push_str(&format!(
        r#"<summary class="{ns}-details-summary {class}-details-summary">View {} {} {kind}s</summary>"#,
        entry.count,
        escape_extract(subtype),
    ));
    html.push_str(&format!(r#"<ul class="{ns}-list {class}-list">"#));

    for message in &entry.messages {
        html.push_str(&format!(
            r#"<li class="{ns}-item {class}-item"><span class="{ns}-item-count {class}-item-count">{}</span> findings for: <span class="{ns}-item-msg {class}-item-msg">{}</span>"#,
            message.count,
            escape_extract(&message.message),
        ));
        if let Some(extract) = message.first_extract() {
            html.push_str(&format!(
                r#"<ul class="{ns}-item-examples {class}-item-examples"><li><code style="font-size: 0.75rem;">{}</code></li></ul>"#,
                escape_extract(extract)
            ));
        }
        html.push_str("</li>");
    }

    html.push_str("</ul>");
    html.push_str("</details>");
}
