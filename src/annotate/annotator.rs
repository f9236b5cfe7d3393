//! Result annotation
//!
//! Decorates a result batch with presentation flags without reordering it:
//! the top result, which later rows share the top result's address, and
//! which rows have an exact name-plus-address duplicate somewhere in the
//! batch. Annotation never fails — records with missing fields simply
//! compare as empty strings.

use super::highlight::{highlight, split_terms, Segment};
use crate::registry::VoterRecord;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// How many results the compact view shows; the rest are only counted
pub const COMPACT_VIEW_LIMIT: usize = 20;

/// One result row with its presentation flags and highlighted fields
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedResult {
    #[serde(flatten)]
    pub record: VoterRecord,
    /// Display fields split into highlight segments, keyed by field name
    pub highlighted_fields: BTreeMap<String, Vec<Segment>>,
    pub is_top_result: bool,
    pub shares_address_with_top: bool,
    pub has_name_address_duplicate: bool,
}

/// The annotated batch handed to presentation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome {
    /// At most `COMPACT_VIEW_LIMIT` rows, store order preserved
    pub results: Vec<AnnotatedResult>,
    /// Size of the full matching set, including rows not shown
    pub total_matches: usize,
    /// Terms used for highlighting
    pub search_terms: Vec<String>,
}

impl SearchOutcome {
    pub fn empty() -> Self {
        SearchOutcome {
            results: Vec::new(),
            total_matches: 0,
            search_terms: Vec::new(),
        }
    }
}

fn highlight_fields(record: &VoterRecord, terms: &[String]) -> BTreeMap<String, Vec<Segment>> {
    let state_zip = {
        let parts = [record.address.state.as_str(), record.address.zip_code.as_str()];
        parts
            .iter()
            .filter(|p| !p.trim().is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    };
    let street = {
        let parts = [
            record.address.street_number.as_str(),
            record.address.street.as_str(),
        ];
        parts
            .iter()
            .filter(|p| !p.trim().is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    };

    let mut fields = BTreeMap::new();
    fields.insert("name".to_string(), highlight(&record.display_name(), terms));
    fields.insert("address".to_string(), highlight(&record.address_line(), terms));
    fields.insert("firstName".to_string(), highlight(&record.first_name, terms));
    fields.insert("lastName".to_string(), highlight(&record.last_name, terms));
    fields.insert(
        "middleName".to_string(),
        highlight(record.middle_name.as_deref().unwrap_or(""), terms),
    );
    fields.insert("street".to_string(), highlight(&street, terms));
    fields.insert("city".to_string(), highlight(&record.address.city, terms));
    fields.insert("stateZip".to_string(), highlight(&state_zip, terms));
    fields
}

/// Annotate a result batch against the raw query text
///
/// Order is preserved exactly as the store returned it. `records` is the
/// full matching set; only the first `COMPACT_VIEW_LIMIT` rows are carried
/// into the outcome, the rest contribute to `total_matches` only.
pub fn annotate(records: Vec<VoterRecord>, raw_query: &str) -> SearchOutcome {
    let terms = split_terms(raw_query);
    let total_matches = records.len();

    if records.is_empty() {
        return SearchOutcome {
            results: Vec::new(),
            total_matches: 0,
            search_terms: terms,
        };
    }

    // Address sharing is only meaningful when the top result actually has
    // an address: an empty street or city would make every similarly bare
    // record "share" it.
    let top_address = records[0].normalized_address();
    let top_addressable = !top_address.0.is_empty() && !top_address.1.is_empty();

    let keys: Vec<((String, String), (String, String, String))> = records
        .iter()
        .map(|r| (r.normalized_name(), r.normalized_address()))
        .collect();

    let duplicate_flags: Vec<bool> = keys
        .iter()
        .enumerate()
        .map(|(i, key)| keys.iter().enumerate().any(|(j, other)| i != j && key == other))
        .collect();

    debug!(
        total = total_matches,
        shown = total_matches.min(COMPACT_VIEW_LIMIT),
        "Annotating result batch"
    );

    let results = records
        .into_iter()
        .enumerate()
        .take(COMPACT_VIEW_LIMIT)
        .map(|(i, record)| {
            let shares_address_with_top = if !top_addressable {
                false
            } else if i == 0 {
                // The top row is flagged when any later row shares its
                // address, so the pairing is visible from either side.
                keys.iter().skip(1).any(|(_, addr)| *addr == top_address)
            } else {
                keys[i].1 == top_address
            };

            AnnotatedResult {
                highlighted_fields: highlight_fields(&record, &terms),
                is_top_result: i == 0,
                shares_address_with_top,
                has_name_address_duplicate: duplicate_flags[i],
                record,
            }
        })
        .collect();

    SearchOutcome {
        results,
        total_matches,
        search_terms: terms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::VoterAddress;

    fn voter(first: &str, last: &str, street: &str, city: &str, unit: Option<&str>) -> VoterRecord {
        VoterRecord {
            id: format!("{}-{}", first, last),
            first_name: first.to_string(),
            last_name: last.to_string(),
            address: VoterAddress {
                street_number: "1".to_string(),
                street: street.to_string(),
                unit: unit.map(|u| u.to_string()),
                city: city.to_string(),
                state: "IL".to_string(),
                zip_code: "62704".to_string(),
                ..VoterAddress::default()
            },
            voter_id: format!("{}{}", first, last),
            ..VoterRecord::default()
        }
    }

    #[test]
    fn test_order_is_preserved_and_first_is_top() {
        let records = vec![
            voter("Alex", "Hamilton", "Maple Ave", "Springfield", None),
            voter("Rita", "Hammond", "Main St", "Springfield", None),
        ];
        let outcome = annotate(records, "ha");
        assert_eq!(outcome.results.len(), 2);
        assert!(outcome.results[0].is_top_result);
        assert!(!outcome.results[1].is_top_result);
        assert_eq!(outcome.results[0].record.last_name, "Hamilton");
        assert_eq!(outcome.results[1].record.last_name, "Hammond");
    }

    #[test]
    fn test_compact_view_caps_rows_but_counts_all() {
        let records: Vec<VoterRecord> = (0..35)
            .map(|i| voter(&format!("F{}", i), "Doe", "Elm St", "Springfield", None))
            .collect();
        let outcome = annotate(records, "doe");
        assert_eq!(outcome.results.len(), COMPACT_VIEW_LIMIT);
        assert_eq!(outcome.total_matches, 35);
    }

    #[test]
    fn test_shares_address_with_top_both_sides() {
        let records = vec![
            voter("Alex", "Hamilton", "Maple Ave", "Springfield", None),
            voter("Rita", "Hammond", "maple ave ", " SPRINGFIELD", None),
            voter("John", "Harper", "Oak St", "Springfield", None),
        ];
        let outcome = annotate(records, "ha");
        assert!(outcome.results[0].shares_address_with_top);
        assert!(outcome.results[1].shares_address_with_top);
        assert!(!outcome.results[2].shares_address_with_top);
    }

    #[test]
    fn test_unit_distinguishes_addresses() {
        let records = vec![
            voter("Alex", "Hamilton", "Maple Ave", "Springfield", Some("1A")),
            voter("Rita", "Hammond", "Maple Ave", "Springfield", Some("2B")),
            voter("Lee", "Hart", "Maple Ave", "Springfield", Some("1a")),
        ];
        let outcome = annotate(records, "ha");
        assert!(!outcome.results[1].shares_address_with_top, "different unit");
        assert!(outcome.results[2].shares_address_with_top, "unit compares case-insensitively");
    }

    #[test]
    fn test_empty_top_address_never_shares() {
        let records = vec![
            voter("Alex", "Hamilton", "", "", None),
            voter("Rita", "Hammond", "", "", None),
        ];
        let outcome = annotate(records, "ha");
        assert!(!outcome.results[0].shares_address_with_top);
        assert!(!outcome.results[1].shares_address_with_top);
    }

    #[test]
    fn test_name_address_duplicates_are_flagged_pairwise() {
        let records = vec![
            voter("Jane", "Doe", "Elm St", "Springfield", None),
            voter("John", "Doe", "Elm St", "Springfield", None),
            voter("jane", " doe", "ELM ST", "springfield ", None),
        ];
        let outcome = annotate(records, "doe");
        assert!(outcome.results[0].has_name_address_duplicate);
        assert!(!outcome.results[1].has_name_address_duplicate, "same address, different first name");
        assert!(outcome.results[2].has_name_address_duplicate);
    }

    #[test]
    fn test_search_terms_come_from_raw_query() {
        let outcome = annotate(Vec::new(), "ha x Main");
        assert_eq!(outcome.search_terms, vec!["ha", "Main"]);
        assert_eq!(outcome.total_matches, 0);
    }

    #[test]
    fn test_highlighting_marks_matched_prefix() {
        let records = vec![voter("Alex", "Hamilton", "Maple Ave", "Springfield", None)];
        let outcome = annotate(records, "ha");
        let name_segments = &outcome.results[0].highlighted_fields["lastName"];
        assert_eq!(name_segments[0].text, "Ha");
        assert!(name_segments[0].is_match);
        assert_eq!(name_segments[1].text, "milton");
        assert!(!name_segments[1].is_match);
    }

    #[test]
    fn test_missing_fields_do_not_abort_annotation() {
        let bare = VoterRecord {
            id: "x".to_string(),
            ..VoterRecord::default()
        };
        let outcome = annotate(vec![bare], "ha");
        assert_eq!(outcome.results.len(), 1);
        assert!(!outcome.results[0].shares_address_with_top);
        assert!(!outcome.results[0].has_name_address_duplicate);
        assert_eq!(outcome.results[0].highlighted_fields["name"][0].text, "-");
    }
}
