//! URL discovery
//!
//! This module expands a seed URL into the set of pages to validate,
//! optionally following the links found on the seed page.

pub mod crawler;

// Re-export commonly used items
pub use crawler::{CandidateUrls, DiscoveryOptions, HttpLinkScraper, LinkScraper, discover};
