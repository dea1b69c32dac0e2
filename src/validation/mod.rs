//! Document validation and summary compilation
//!
//! This module sends documents to the external HTML validator and
//! aggregates the returned messages into a sorted summary.

pub mod client;
pub mod summary;

// Re-export commonly used items
pub use client::{ValidateDocuments, W3cValidator};
pub use summary::{
    MessageEntry, SubtypeSummary, Summary, TypeSummary, compile_summary, sort_messages_by_count,
};
