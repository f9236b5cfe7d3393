//! Per-field match-mode evaluation
//!
//! A field value can be required to start with, contain, or end with the
//! operator's input. Matching is case-insensitive and treats the input as
//! literal text — pattern construction (and escaping) is the store
//! translator's concern, never this layer's.

use crate::error::AppError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How an operator-supplied value must align with a registry field
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Field starts with the input
    #[default]
    Starts,
    /// Field contains the input anywhere
    Within,
    /// Field ends with the input
    Ends,
}

impl MatchMode {
    /// Parse a wire/CLI token (`starts`, `within`, `ends`)
    pub fn parse(token: &str) -> Result<Self, AppError> {
        match token.trim().to_lowercase().as_str() {
            "starts" => Ok(MatchMode::Starts),
            "within" => Ok(MatchMode::Within),
            "ends" => Ok(MatchMode::Ends),
            other => Err(AppError::InvalidQuery(format!(
                "Unknown match mode '{}', expected starts|within|ends",
                other
            ))),
        }
    }

    /// Wire name of this mode
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Starts => "starts",
            MatchMode::Within => "within",
            MatchMode::Ends => "ends",
        }
    }
}

/// Check whether `field_value` satisfies `input` under `mode`
///
/// Both sides are lower-cased before comparison. An empty input is vacuously
/// true in every mode: the field is simply unconstrained.
pub fn field_matches(field_value: &str, input: &str, mode: MatchMode) -> bool {
    if input.is_empty() {
        return true;
    }

    let target = field_value.to_lowercase();
    let needle = input.to_lowercase();

    match mode {
        MatchMode::Starts => target.starts_with(&needle),
        MatchMode::Within => target.contains(&needle),
        MatchMode::Ends => target.ends_with(&needle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_vacuously_true() {
        for mode in [MatchMode::Starts, MatchMode::Within, MatchMode::Ends] {
            assert!(field_matches("Hamilton", "", mode));
            assert!(field_matches("", "", mode));
        }
    }

    #[test]
    fn test_value_matches_itself_in_every_mode() {
        for mode in [MatchMode::Starts, MatchMode::Within, MatchMode::Ends] {
            assert!(field_matches("Springfield", "Springfield", mode));
            assert!(field_matches("Springfield", "SPRINGFIELD", mode));
            assert!(field_matches("SPRINGFIELD", "springfield", mode));
        }
    }

    #[test]
    fn test_prefix_mode() {
        assert!(field_matches("Hamilton", "ha", MatchMode::Starts));
        assert!(field_matches("hamilton", "HAM", MatchMode::Starts));
        assert!(!field_matches("Smith", "ha", MatchMode::Starts));
        assert!(!field_matches("Graham", "ham", MatchMode::Starts));
    }

    #[test]
    fn test_substring_mode() {
        assert!(field_matches("Graham", "ham", MatchMode::Within));
        assert!(field_matches("Hammond", "ham", MatchMode::Within));
        assert!(!field_matches("Smith", "ham", MatchMode::Within));
    }

    #[test]
    fn test_suffix_mode() {
        assert!(field_matches("Graham", "ham", MatchMode::Ends));
        assert!(!field_matches("Hammond", "ham", MatchMode::Ends));
    }

    #[test]
    fn test_input_is_literal_not_a_pattern() {
        // Regex metacharacters carry no special meaning here
        assert!(!field_matches("abc", "a.c", MatchMode::Within));
        assert!(field_matches("a.c street", "a.c", MatchMode::Starts));
        assert!(!field_matches("aaa", "a*", MatchMode::Within));
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!(MatchMode::parse("starts").unwrap(), MatchMode::Starts);
        assert_eq!(MatchMode::parse("WITHIN").unwrap(), MatchMode::Within);
        assert_eq!(MatchMode::parse(" ends ").unwrap(), MatchMode::Ends);
        assert!(MatchMode::parse("fuzzy").is_err());
    }

    #[test]
    fn test_mode_wire_names() {
        assert_eq!(MatchMode::Starts.as_str(), "starts");
        assert_eq!(
            serde_json::to_string(&MatchMode::Within).unwrap(),
            "\"within\""
        );
        let parsed: MatchMode = serde_json::from_str("\"ends\"").unwrap();
        assert_eq!(parsed, MatchMode::Ends);
    }
}
