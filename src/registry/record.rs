//! Voter record types
//!
//! Mirrors the registry's document shape. Records are immutable snapshots
//! for the duration of one search; the store owns them. Every optional field
//! degrades to an empty string for comparison and display — a malformed
//! record must never abort annotation of the whole batch.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoterAddress {
    #[serde(default)]
    pub street_number: String,
    #[serde(default)]
    pub street: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoterRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    /// Pre-composed display name, when the registry carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub address: VoterAddress,
    #[serde(default)]
    pub voter_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_affiliation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voter_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
}

fn norm(value: &str) -> String {
    value.trim().to_lowercase()
}

impl VoterRecord {
    /// Display name: the stored `name` when present, else "first last",
    /// else a placeholder dash. A non-empty title is appended with a comma.
    pub fn display_name(&self) -> String {
        let base = match &self.name {
            Some(n) if !n.trim().is_empty() => n.trim().to_string(),
            _ => {
                let joined = [self.first_name.as_str(), self.last_name.as_str()]
                    .iter()
                    .filter(|p| !p.trim().is_empty())
                    .map(|p| p.trim())
                    .collect::<Vec<_>>()
                    .join(" ");
                if joined.is_empty() {
                    "-".to_string()
                } else {
                    joined
                }
            }
        };

        match &self.title {
            Some(t) if !t.trim().is_empty() => format!("{}, {}", base, t.trim()),
            _ => base,
        }
    }

    /// One-line address: street, unit, city, state joined with ", ",
    /// skipping empty parts; "-" when everything is missing
    pub fn address_line(&self) -> String {
        let unit = self.address.unit.as_deref().unwrap_or("");
        let parts = [
            self.address.street.as_str(),
            unit,
            self.address.city.as_str(),
            self.address.state.as_str(),
        ];
        let joined = parts
            .iter()
            .filter(|p| !p.trim().is_empty())
            .map(|p| p.trim())
            .collect::<Vec<_>>()
            .join(", ");
        if joined.is_empty() {
            "-".to_string()
        } else {
            joined
        }
    }

    /// Normalized `(street, city, unit)` triple for address equality.
    /// A missing unit normalizes to the empty string, so "no unit" on both
    /// sides compares equal.
    pub fn normalized_address(&self) -> (String, String, String) {
        (
            norm(&self.address.street),
            norm(&self.address.city),
            norm(self.address.unit.as_deref().unwrap_or("")),
        )
    }

    /// Normalized `(first, last)` name pair for duplicate detection
    pub fn normalized_name(&self) -> (String, String) {
        (norm(&self.first_name), norm(&self.last_name))
    }
}
