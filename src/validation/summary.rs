use rustc_hash::FxHashMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use crate::core::constants::messages;
use crate::core::error::Result;
use crate::core::types::{MessageType, ValidatorMessage};

/// One distinct message text within a subtype
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEntry {
    pub message: String,
    pub count: usize,
    /// Extracts in arrival order, duplicates kept
    pub extracts: Vec<String>,
}

impl MessageEntry {
    fn new(message: String) -> Self {
        Self {
            message,
            count: 0,
            extracts: Vec::new(),
        }
    }

    pub fn first_extract(&self) -> Option<&str> {
        self.extracts.first().map(String::as_str)
    }
}

#[derive(Serialize)]
struct MessageRecord<'a> {
    count: usize,
    extracts: &'a [String],
}

/// Serialize entries as a JSON object keyed by message text, keeping their order.
fn serialize_messages<S: Serializer>(
    entries: &[MessageEntry],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_map(entries.iter().map(|entry| {
        (
            entry.message.as_str(),
            MessageRecord {
                count: entry.count,
                extracts: &entry.extracts,
            },
        )
    }))
}

/// Counts and messages of one subtype.
///
/// `count` includes messages without text, so it can exceed the sum of the
/// entry counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubtypeSummary {
    pub count: usize,
    #[serde(serialize_with = "serialize_messages")]
    pub messages: Vec<MessageEntry>,
}

/// Counts of one message type, broken down by subtype
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TypeSummary {
    pub count: usize,
    #[serde(flatten)]
    pub subtypes: BTreeMap<String, SubtypeSummary>,
}

impl TypeSummary {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Subtypes that received at least one message
    pub fn non_empty_subtypes(&self) -> impl Iterator<Item = (&str, &SubtypeSummary)> {
        self.subtypes
            .iter()
            .filter(|(_, subtype)| subtype.count > 0)
            .map(|(name, subtype)| (name.as_str(), subtype))
    }
}

/// Aggregated validator findings of one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub error: TypeSummary,
    pub info: TypeSummary,
    #[serde(rename = "non-document-error")]
    pub non_document_error: TypeSummary,
}

impl Summary {
    pub fn get(&self, kind: MessageType) -> &TypeSummary {
        match kind {
            MessageType::Error => &self.error,
            MessageType::Info => &self.info,
            MessageType::NonDocumentError => &self.non_document_error,
        }
    }

    fn get_mut(&mut self, kind: MessageType) -> &mut TypeSummary {
        match kind {
            MessageType::Error => &mut self.error,
            MessageType::Info => &mut self.info,
            MessageType::NonDocumentError => &mut self.non_document_error,
        }
    }

    /// All three types in report order
    pub fn iter(&self) -> impl Iterator<Item = (MessageType, &TypeSummary)> {
        MessageType::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }

    /// Number of messages across all types
    pub fn total(&self) -> usize {
        self.iter().map(|(_, summary)| summary.count).sum()
    }
}

/// Subtype bucket under construction; `index` maps message text to its entry.
#[derive(Default)]
struct SubtypeBuilder {
    count: usize,
    entries: Vec<MessageEntry>,
    index: FxHashMap<String, usize>,
}

impl SubtypeBuilder {
    fn record(&mut self, message: &ValidatorMessage) {
        self.count += 1;

        let Some(ref text) = message.message else {
            return;
        };

        let position = match self.index.get(text) {
            Some(&position) => position,
            None => {
                self.entries.push(MessageEntry::new(text.clone()));
                self.index.insert(text.clone(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };

        let entry = &mut self.entries[position];
        entry.count += 1;
        if let Some(ref extract) = message.extract {
            entry.extracts.push(extract.clone());
        }
    }

    fn build(self) -> SubtypeSummary {
        SubtypeSummary {
            count: self.count,
            messages: sort_messages_by_count(self.entries),
        }
    }
}

#[derive(Default)]
struct SummaryBuilder {
    counts: [usize; 3],
    subtypes: [BTreeMap<String, SubtypeBuilder>; 3],
}

impl SummaryBuilder {
    fn slot(kind: MessageType) -> usize {
        match kind {
            MessageType::Error => 0,
            MessageType::Info => 1,
            MessageType::NonDocumentError => 2,
        }
    }

    fn record(mut self, message: &ValidatorMessage) -> Result<Self> {
        let kind: MessageType = message.kind.parse()?;
        let slot = Self::slot(kind);
        let subtype = message
            .subtype
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(messages::DEFAULT_SUBTYPE);
        // Subtypes share the JSON object with the type's own count
        let subtype = if subtype == messages::RESERVED_SUBTYPE {
            messages::RESERVED_SUBTYPE_RENAMED
        } else {
            subtype
        };

        self.counts[slot] += 1;
        self.subtypes[slot]
            .entry(subtype.to_string())
            .or_default()
            .record(message);

        Ok(self)
    }

    fn build(self) -> Summary {
        let mut summary = Summary::default();
        for (kind, (count, subtypes)) in MessageType::ALL
            .into_iter()
            .zip(self.counts.into_iter().zip(self.subtypes))
        {
            let bucket = summary.get_mut(kind);
            bucket.count = count;
            bucket.subtypes = subtypes
                .into_iter()
                .map(|(name, builder)| (name, builder.build()))
                .collect();
        }
        summary
    }
}

/// Classify and aggregate validator messages into a sorted summary.
///
/// Fails on the first message whose type is not `error`, `info` or
/// `non-document-error`.
pub fn compile_summary(messages: &[ValidatorMessage]) -> Result<Summary> {
    let summary = messages
        .iter()
        .try_fold(SummaryBuilder::default(), SummaryBuilder::record)?
        .build();

    log::debug!(
        "Compiled summary: {} errors, {} infos, {} non-document errors",
        summary.error.count,
        summary.info.count,
        summary.non_document_error.count
    );

    Ok(summary)
}

/// Order entries by descending count. Ties keep their relative order.
pub fn sort_messages_by_count(mut entries: Vec<MessageEntry>) -> Vec<MessageEntry> {
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}
