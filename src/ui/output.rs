//! Output formatting and display logic for htmlsup

use std::io::Write;

use crate::core::constants::display;
use crate::core::error::Result;
use crate::core::types::MessageType;
use crate::reporting::escape::capitalize;
use crate::reporting::{DocumentReport, Report};
use crate::ui::color::{Colors, bold, colorize, dim};
use crate::validation::Summary;

/// Serialize a report as pretty-printed JSON
pub fn report_to_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Serialize a failure document as pretty-printed JSON
pub fn document_to_json(document: &DocumentReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Render a summary as terminal text.
///
/// A bold tally line comes first, then every non-empty type and subtype
/// with `N findings for: message` lines and the first extract dimmed.
pub fn render_text(summary: &Summary, urls: &[String]) -> String {
    let mut lines = Vec::new();

    lines.push(bold(&format!(
        "There are {} errors and {} info warnings",
        summary.error.count, summary.info.count
    )));
    if summary.non_document_error.count > 0 {
        lines.push(colorize(
            &format!(
                "{} The validator could not fully process {} documents",
                display::ERROR_EMOJI,
                summary.non_document_error.count
            ),
            Colors::RED,
        ));
    }

    lines.push(String::new());
    lines.push(format!("Inspected {} URLs:", urls.len()));
    for url in urls {
        lines.push(format!("  {url}"));
    }

    for (kind, bucket) in summary.iter() {
        if bucket.is_empty() {
            continue;
        }

        let (emoji, heading_color) = match kind {
            MessageType::Info => (display::INFO_EMOJI, Colors::CYAN),
            _ => (display::ERROR_EMOJI, Colors::RED),
        };
        lines.push(String::new());
        lines.push(colorize(
            &format!("{emoji} {} ({})", kind.label(), bucket.count),
            heading_color,
        ));

        for (subtype, entry) in bucket.non_empty_subtypes() {
            lines.push(colorize(
                &format!("  {} {} ({})", capitalize(subtype), kind.label(), entry.count),
                Colors::YELLOW,
            ));
            for message in &entry.messages {
                lines.push(format!(
                    "    {} findings for: {}",
                    message.count, message.message
                ));
                if let Some(extract) = message.first_extract() {
                    let extract = extract.split_whitespace().collect::<Vec<_>>().join(" ");
                    lines.push(dim(&format!("      eg: {extract}")));
                }
            }
        }
    }

    if summary.total() == 0 {
        lines.push(String::new());
        lines.push(colorize(
            &format!("{} No validation issues found", display::SUCCESS_EMOJI),
            Colors::GREEN,
        ));
    }

    lines.join("\n")
}

/// Write a successful report in the requested format
pub fn write_report(out: &mut dyn Write, report: &Report, text: bool) -> Result<()> {
    match report {
        Report::Raw(raw) if text => writeln!(out, "{}", render_text(&raw.summary, &raw.urls))?,
        _ => writeln!(out, "{}", report_to_json(report)?)?,
    }
    Ok(())
}
