//! Query builder
//!
//! Builds a `SearchQuery` from raw form input: trims every value and omits
//! fields whose trimmed value is empty. Omission matters — the empty-query
//! short-circuit downstream tests for "no fields present", not "all
//! predicates true".

use super::matcher::MatchMode;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One constrained text field: a value plus how it must align
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SearchField {
    pub value: String,
    #[serde(rename = "match", default)]
    pub mode: MatchMode,
}

impl SearchField {
    pub fn new(value: impl Into<String>, mode: MatchMode) -> Self {
        Self {
            value: value.into(),
            mode,
        }
    }
}

/// Structured registry filter: an AND of every present constraint
///
/// This is also the wire shape of the search interface: optional
/// `firstName{value, match}`, `lastName{value, match}`, `streetNumber`
/// (plain string), `streetName{value, match}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<SearchField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<SearchField>,
    /// Street numbers are unambiguous tokens: always an exact, literal
    /// equality constraint, never pattern-matched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_name: Option<SearchField>,
}

impl SearchQuery {
    /// True when no field constrains the search
    ///
    /// The empty query must short-circuit to zero results without contacting
    /// the store — it would otherwise match every record in the registry.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.street_number.is_none()
            && self.street_name.is_none()
    }

    /// Re-apply trimming and empty-field omission
    ///
    /// Queries arriving over the wire may carry untrimmed or empty values;
    /// this restores the builder's invariants.
    pub fn normalized(&self) -> SearchQuery {
        let text_field = |f: &Option<SearchField>| {
            f.as_ref().and_then(|f| {
                let trimmed = f.value.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(SearchField::new(trimmed, f.mode))
                }
            })
        };

        SearchQuery {
            first_name: text_field(&self.first_name),
            last_name: text_field(&self.last_name),
            street_number: self.street_number.as_ref().and_then(|n| {
                let trimmed = n.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }),
            street_name: text_field(&self.street_name),
        }
    }

    /// Human-readable rendering for logging and the query echo line,
    /// e.g. `lastName starts "ha" AND streetNumber == "123"`
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();

        if let Some(f) = &self.first_name {
            parts.push(format!("firstName {} \"{}\"", f.mode.as_str(), f.value));
        }
        if let Some(f) = &self.last_name {
            parts.push(format!("lastName {} \"{}\"", f.mode.as_str(), f.value));
        }
        if let Some(n) = &self.street_number {
            parts.push(format!("streetNumber == \"{}\"", n));
        }
        if let Some(f) = &self.street_name {
            parts.push(format!("streetName {} \"{}\"", f.mode.as_str(), f.value));
        }

        if parts.is_empty() {
            "Empty Query".to_string()
        } else {
            parts.join(" AND ")
        }
    }

    /// All raw field values joined for highlight-term extraction
    pub fn raw_text(&self) -> String {
        let mut pieces = Vec::new();
        if let Some(f) = &self.first_name {
            pieces.push(f.value.clone());
        }
        if let Some(f) = &self.last_name {
            pieces.push(f.value.clone());
        }
        if let Some(n) = &self.street_number {
            pieces.push(n.clone());
        }
        if let Some(f) = &self.street_name {
            pieces.push(f.value.clone());
        }
        pieces.join(" ")
    }
}

/// Raw search form state as the operator typed it
#[derive(Debug, Clone, Default)]
pub struct SearchForm {
    pub first_name: String,
    pub first_name_mode: MatchMode,
    pub last_name: String,
    pub last_name_mode: MatchMode,
    pub street_number: String,
    pub street_name: String,
    pub street_name_mode: MatchMode,
}

/// A ballot sheet entry pending verification: the printed name plus the
/// registered address as written
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BallotEntry {
    pub name_printed: String,
    pub street_number: String,
    pub street_name: String,
}

impl SearchForm {
    /// Prefill a form from a ballot sheet entry
    ///
    /// The printed name is split on whitespace: first token becomes the
    /// first name, the remainder the last name. Crude, but it mirrors how
    /// ballot sheets record "First Last" and the operator can correct it.
    pub fn from_ballot_entry(entry: &BallotEntry) -> Self {
        let mut parts = entry.name_printed.split_whitespace();
        let first_name = parts.next().unwrap_or_default().to_string();
        let last_name = parts.collect::<Vec<_>>().join(" ");

        SearchForm {
            first_name,
            last_name,
            street_number: entry.street_number.clone(),
            street_name: entry.street_name.clone(),
            ..SearchForm::default()
        }
    }
}

/// Pure transformation from form state to a structured query
pub struct QueryBuilder;

impl QueryBuilder {
    /// Build a `SearchQuery`, trimming every field and omitting empty ones
    pub fn build(form: &SearchForm) -> SearchQuery {
        let field = |value: &str, mode: MatchMode| {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(SearchField::new(trimmed, mode))
            }
        };

        let street_number = {
            let trimmed = form.street_number.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        };

        SearchQuery {
            first_name: field(&form.first_name, form.first_name_mode),
            last_name: field(&form.last_name, form.last_name_mode),
            street_number,
            street_name: field(&form.street_name, form.street_name_mode),
        }
    }
}
