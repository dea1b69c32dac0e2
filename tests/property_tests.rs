//! Property-based tests for htmlsup using proptest
//!
//! These tests generate random validator output and link lists to check
//! that summary counts, candidate sets and escaping hold their shape.

use htmlsup::core::{Crawl, MessageType, ValidatorMessage};
use htmlsup::discovery::{CandidateUrls, DiscoveryOptions};
use htmlsup::reporting::escape_extract;
use htmlsup::validation::{MessageEntry, compile_summary, sort_messages_by_count};
use proptest::prelude::*;
use std::num::NonZeroUsize;

const SEED: &str = "https://example.com";

/// Generate well-formed validator messages
fn message_strategy() -> impl Strategy<Value = ValidatorMessage> {
    (
        prop_oneof![
            Just("error"),
            Just("info"),
            Just("non-document-error")
        ],
        prop_oneof![
            Just(String::new()),
            Just("fatal".to_string()),
            Just("warning".to_string()),
            Just("io".to_string()),
        ],
        prop_oneof![
            Just("Stray end tag".to_string()),
            Just("Duplicate ID".to_string()),
            Just("Trailing slash on void elements".to_string()),
            "[a-z ]{1,20}",
        ],
        prop::option::of(r"[<>&a-z \n]{0,30}"),
    )
        .prop_map(|(kind, subtype, message, extract)| {
            let mut msg = ValidatorMessage::new(kind).with_message(message);
            if !subtype.is_empty() {
                msg = msg.with_subtype(subtype);
            }
            if let Some(extract) = extract {
                msg = msg.with_extract(extract);
            }
            msg
        })
}

/// Generate links mixing same-host, foreign-host and non-http entries
fn link_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        r"[a-z]{1,6}".prop_map(|path| format!("{SEED}/{path}")),
        r"[a-z]{1,6}".prop_map(|path| format!("{SEED}/{path}/")),
        r"[a-z]{1,6}".prop_map(|path| format!("https://other.example/{path}")),
        r"[a-z]{1,6}".prop_map(|path| format!("mailto:{path}@example.com")),
        r"[a-z]{1,6}".prop_map(|path| format!("/{path}")),
        Just(format!("{SEED}/")),
    ]
}

fn entry_strategy() -> impl Strategy<Value = Vec<MessageEntry>> {
    prop::collection::vec((0usize..5, "[a-z]{1,8}"), 0..20).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(count, message)| MessageEntry {
                message,
                count,
                extracts: Vec::new(),
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_summary_counts_are_consistent(
        messages in prop::collection::vec(message_strategy(), 0..40)
    ) {
        let summary = compile_summary(&messages).unwrap();

        prop_assert_eq!(summary.total(), messages.len());
        let by_type: usize = summary.iter().map(|(_, bucket)| bucket.count).sum();
        prop_assert_eq!(by_type, summary.total());

        for (kind, bucket) in summary.iter() {
            let expected = messages
                .iter()
                .filter(|m| m.kind == kind.as_str())
                .count();
            prop_assert_eq!(bucket.count, expected);

            let by_subtype: usize = bucket.subtypes.values().map(|s| s.count).sum();
            prop_assert_eq!(by_subtype, bucket.count);

            for subtype in bucket.subtypes.values() {
                let by_message: usize = subtype.messages.iter().map(|m| m.count).sum();
                prop_assert_eq!(by_message, subtype.count);
                prop_assert!(
                    subtype.messages.windows(2).all(|w| w[0].count >= w[1].count),
                    "messages must be sorted by descending count"
                );
                for entry in &subtype.messages {
                    prop_assert!(entry.extracts.len() <= entry.count);
                }
            }
        }
    }

    #[test]
    fn test_sort_messages_by_count_is_stable_and_idempotent(entries in entry_strategy()) {
        let sorted = sort_messages_by_count(entries.clone());

        prop_assert_eq!(sorted.len(), entries.len());
        prop_assert!(sorted.windows(2).all(|w| w[0].count >= w[1].count));

        // Ties keep arrival order
        for count in 0..5 {
            let before: Vec<_> = entries.iter().filter(|e| e.count == count).collect();
            let after: Vec<_> = sorted.iter().filter(|e| e.count == count).collect();
            prop_assert_eq!(before, after);
        }

        prop_assert_eq!(sort_messages_by_count(sorted.clone()), sorted);
    }

    #[test]
    fn test_candidate_urls_respect_crawl_limit(
        links in prop::collection::vec(link_strategy(), 0..30),
        limit in 1usize..8
    ) {
        let crawl = Crawl::Limit(NonZeroUsize::new(limit).unwrap());
        let candidates =
            CandidateUrls::from_links(SEED, &links, crawl, DiscoveryOptions::default());

        prop_assert!(candidates.len() <= limit);
        prop_assert_eq!(candidates.seed(), SEED);
        prop_assert_eq!(&candidates.as_slice()[0], SEED);
    }

    #[test]
    fn test_candidate_urls_are_unique_and_same_host(
        links in prop::collection::vec(link_strategy(), 0..30)
    ) {
        let candidates =
            CandidateUrls::from_links(SEED, &links, Crawl::Unlimited, DiscoveryOptions::default());
        let urls = candidates.as_slice();

        for (i, url) in urls.iter().enumerate() {
            prop_assert!(url.starts_with(SEED));
            prop_assert!(!url.ends_with('/'), "trailing slash kept on {}", url);
            prop_assert!(!urls[i + 1..].contains(url), "duplicate {}", url);
        }
    }

    #[test]
    fn test_candidate_urls_when_disabled__only_seed(
        links in prop::collection::vec(link_strategy(), 0..30)
    ) {
        let candidates =
            CandidateUrls::from_links(SEED, &links, Crawl::Disabled, DiscoveryOptions::default());

        prop_assert_eq!(candidates.into_vec(), vec![SEED.to_string()]);
    }

    #[test]
    fn test_escape_extract_never_leaks_markup(text in r"[<>&a-zé \t\r\n]{0,60}") {
        let escaped = escape_extract(&text);

        let without_breaks = escaped.replace("<br />", "");
        prop_assert!(!without_breaks.contains('<'));
        prop_assert!(!without_breaks.contains('>'));
        prop_assert!(without_breaks.is_ascii());
        prop_assert!(
            without_breaks
                .match_indices('&')
                .all(|(i, _)| without_breaks[i..].starts_with("&#")),
            "bare ampersand in {}",
            escaped
        );
    }
}

#[test]
fn test_message_type_covers_all_buckets() {
    let messages: Vec<_> = MessageType::ALL
        .iter()
        .map(|kind| ValidatorMessage::new(kind.as_str()).with_message("m"))
        .collect();
    let summary = compile_summary(&messages).unwrap();

    for (_, bucket) in summary.iter() {
        assert_eq!(bucket.count, 1);
    }
}
