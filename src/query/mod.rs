//! Query construction for registry searches
//!
//! Turns free-text form fields plus per-field match modes into a structured
//! `SearchQuery`, the single filter shape the rest of the pipeline consumes.

pub mod builder;
pub mod matcher;

pub use builder::{BallotEntry, QueryBuilder, SearchField, SearchForm, SearchQuery};
pub use matcher::{field_matches, MatchMode};
