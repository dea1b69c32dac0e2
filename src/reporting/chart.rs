use crate::core::constants::{messages, report};
use crate::core::types::MessageType;
use crate::validation::TypeSummary;

use super::escape::{capitalize, escape_attribute, escape_extract};

/// One bar of a type's proportional chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSegment {
    pub label: String,
    /// Share of the type total, 0-100
    pub percentage: f64,
    pub color: &'static str,
}

/// Split a type's total across its non-empty subtypes.
///
/// Subtypes whose share is below `threshold` percent are merged into a
/// single "Other" segment. That is the `other` subtype's own segment when it
/// is shown, otherwise a trailing one.
pub fn chart_segments(bucket: &TypeSummary, threshold: f64) -> Vec<ChartSegment> {
    if bucket.count == 0 {
        return Vec::new();
    }

    let total = bucket.count as f64;
    let mut segments: Vec<ChartSegment> = Vec::new();
    let mut merged = 0.0;
    let mut other_index = None;

    for (name, subtype) in bucket.non_empty_subtypes() {
        let percentage = subtype.count as f64 * 100.0 / total;
        if percentage < threshold {
            merged += percentage;
            continue;
        }

        if name == messages::DEFAULT_SUBTYPE {
            other_index = Some(segments.len());
        }
        let color = report::CHART_COLORS[segments.len() % report::CHART_COLORS.len()];
        segments.push(ChartSegment {
            label: capitalize(name),
            percentage,
            color,
        });
    }

    if merged > 0.0 {
        if let Some(index) = other_index {
            segments[index].percentage += merged;
            return segments;
        }
        segments.push(ChartSegment {
            label: report::OTHER_SEGMENT_LABEL.to_string(),
            percentage: merged,
            color: report::OTHER_SEGMENT_COLOR,
        });
    }

    segments
}

/// Render a horizontal bar chart for one message type.
pub fn render_chart(kind: MessageType, bucket: &TypeSummary, namespace: &str, threshold: f64) -> String {
    let segments = chart_segments(bucket, threshold);
    if segments.is_empty() {
        return String::new();
    }

    let mut html = format!(
        r#"<div class="{namespace}-chart {namespace}-{kind}-chart" style="display: flex; width: 100%; height: 1.5rem;">"#
    );
    for segment in &segments {
        let rounded = segment.percentage.ceil() as u32;
        html.push_str(&format!(
            r#"<div title="{title}: {rounded}%" style="width: {width:.2}%; background-color: {color};">{label} {rounded}%</div>"#,
            title = escape_attribute(&segment.label),
            label = escape_extract(&segment.label),
            width = segment.percentage,
            color = segment.color,
        ));
    }
    html.push_str("</div>");

    html
}
