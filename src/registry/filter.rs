//! Registry filter translation
//!
//! Translates a `SearchQuery` into the document store's query dialect:
//! anchored case-insensitive regex constraints for text fields, exact
//! equality for the street number. User input is escaped before being
//! embedded in a pattern — a literal `.` in a name matches only a literal
//! `.`, never "any character".

use crate::query::{MatchMode, SearchField, SearchQuery};
use serde_json::{json, Map, Value};

/// Translated filter, ready for the store's query endpoint
#[derive(Debug, Clone, PartialEq)]
pub enum StoreFilter {
    /// Sentinel for the empty query. The store must never be handed a
    /// filter that matches every record, so this never goes on the wire.
    MatchNothing,
    /// AND of per-field conditions, keyed by document path
    Conditions(Map<String, Value>),
}

impl StoreFilter {
    pub fn matches_nothing(&self) -> bool {
        matches!(self, StoreFilter::MatchNothing)
    }

    /// The filter document, if there is one to send
    pub fn as_document(&self) -> Option<&Map<String, Value>> {
        match self {
            StoreFilter::MatchNothing => None,
            StoreFilter::Conditions(doc) => Some(doc),
        }
    }
}

fn regex_condition(field: &SearchField) -> Value {
    let escaped = regex::escape(&field.value);
    let pattern = match field.mode {
        MatchMode::Starts => format!("^{}", escaped),
        MatchMode::Within => escaped,
        MatchMode::Ends => format!("{}$", escaped),
    };
    json!({ "$regex": pattern, "$options": "i" })
}

/// Translate a query into the store dialect
pub fn translate(query: &SearchQuery) -> StoreFilter {
    let query = query.normalized();
    if query.is_empty() {
        return StoreFilter::MatchNothing;
    }

    let mut doc = Map::new();

    if let Some(field) = &query.first_name {
        doc.insert("firstName".to_string(), regex_condition(field));
    }
    if let Some(field) = &query.last_name {
        doc.insert("lastName".to_string(), regex_condition(field));
    }
    if let Some(number) = &query.street_number {
        doc.insert("address.streetNumber".to_string(), json!(number));
    }
    if let Some(field) = &query.street_name {
        doc.insert("address.street".to_string(), regex_condition(field));
    }

    StoreFilter::Conditions(doc)
}
