//! Result sorting for the advanced search view
//!
//! Sorting is an optional, explicit post-step over the store's result order.
//! The sort is stable, so records that compare equal keep the order the
//! store returned them in.

use crate::error::AppError;
use crate::registry::VoterRecord;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    FirstName,
    LastName,
    StreetNumber,
    StreetName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortField {
    pub fn parse(token: &str) -> Result<Self, AppError> {
        match token.trim() {
            "firstName" => Ok(SortField::FirstName),
            "lastName" => Ok(SortField::LastName),
            "streetNumber" => Ok(SortField::StreetNumber),
            "streetName" => Ok(SortField::StreetName),
            other => Err(AppError::InvalidQuery(format!(
                "Unknown sort field '{}', expected firstName|lastName|streetNumber|streetName",
                other
            ))),
        }
    }
}

impl SortOrder {
    pub fn parse(token: &str) -> Result<Self, AppError> {
        match token.trim().to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(AppError::InvalidQuery(format!(
                "Unknown sort order '{}', expected asc|desc",
                other
            ))),
        }
    }
}

fn text_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Street numbers sort numerically when both sides parse as integers, so
/// "9" comes before "10". Otherwise they fall back to text comparison.
fn street_number_cmp(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<i64>(), b.trim().parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => text_cmp(a, b),
    }
}

/// Sort records in place by `field`, ascending or descending
pub fn sort_records(records: &mut [VoterRecord], field: SortField, order: SortOrder) {
    records.sort_by(|a, b| {
        let ordering = match field {
            SortField::FirstName => text_cmp(&a.first_name, &b.first_name),
            SortField::LastName => text_cmp(&a.last_name, &b.last_name),
            SortField::StreetNumber => {
                street_number_cmp(&a.address.street_number, &b.address.street_number)
            }
            SortField::StreetName => text_cmp(&a.address.street, &b.address.street),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::VoterAddress;

    fn voter(first: &str, last: &str, number: &str, street: &str) -> VoterRecord {
        VoterRecord {
            id: format!("{}-{}", first, last),
            first_name: first.to_string(),
            last_name: last.to_string(),
            address: VoterAddress {
                street_number: number.to_string(),
                street: street.to_string(),
                ..VoterAddress::default()
            },
            ..VoterRecord::default()
        }
    }

    #[test]
    fn test_last_name_sort_is_case_insensitive() {
        let mut records = vec![
            voter("A", "smith", "1", "Elm"),
            voter("B", "Doe", "2", "Elm"),
            voter("C", "HART", "3", "Elm"),
        ];
        sort_records(&mut records, SortField::LastName, SortOrder::Asc);
        let names: Vec<&str> = records.iter().map(|r| r.last_name.as_str()).collect();
        assert_eq!(names, vec!["Doe", "HART", "smith"]);
    }

    #[test]
    fn test_street_number_sorts_numerically() {
        let mut records = vec![
            voter("A", "Doe", "10", "Elm"),
            voter("B", "Doe", "9", "Elm"),
            voter("C", "Doe", "100", "Elm"),
        ];
        sort_records(&mut records, SortField::StreetNumber, SortOrder::Asc);
        let numbers: Vec<&str> = records
            .iter()
            .map(|r| r.address.street_number.as_str())
            .collect();
        assert_eq!(numbers, vec!["9", "10", "100"]);
    }

    #[test]
    fn test_non_numeric_street_numbers_fall_back_to_text() {
        let mut records = vec![
            voter("A", "Doe", "10A", "Elm"),
            voter("B", "Doe", "10", "Elm"),
            voter("C", "Doe", "2B", "Elm"),
        ];
        sort_records(&mut records, SortField::StreetNumber, SortOrder::Asc);
        let numbers: Vec<&str> = records
            .iter()
            .map(|r| r.address.street_number.as_str())
            .collect();
        // Mixed batch: any pair with a non-numeric side compares as text
        assert_eq!(numbers, vec!["10", "10A", "2B"]);
    }

    #[test]
    fn test_descending_reverses() {
        let mut records = vec![
            voter("Amy", "Doe", "1", "Elm"),
            voter("Zoe", "Doe", "2", "Elm"),
        ];
        sort_records(&mut records, SortField::FirstName, SortOrder::Desc);
        assert_eq!(records[0].first_name, "Zoe");
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut records = vec![
            voter("Amy", "Doe", "1", "Elm"),
            voter("Bob", "doe", "2", "Oak"),
            voter("Cal", "DOE", "3", "Pine"),
        ];
        sort_records(&mut records, SortField::LastName, SortOrder::Asc);
        let firsts: Vec<&str> = records.iter().map(|r| r.first_name.as_str()).collect();
        assert_eq!(firsts, vec!["Amy", "Bob", "Cal"]);
    }

    #[test]
    fn test_parse_wire_tokens() {
        assert_eq!(SortField::parse("streetNumber").unwrap(), SortField::StreetNumber);
        assert!(SortField::parse("zipCode").is_err());
        assert_eq!(SortOrder::parse("DESC").unwrap(), SortOrder::Desc);
        assert!(SortOrder::parse("up").is_err());
    }
}
