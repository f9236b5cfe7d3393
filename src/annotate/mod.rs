//! Result annotation and presentation support
//!
//! Everything that happens to a result batch after the store returns it:
//! highlighting, presentation flags, and the optional advanced-search sort.

pub mod annotator;
pub mod highlight;
pub mod sort;

pub use annotator::{annotate, AnnotatedResult, SearchOutcome, COMPACT_VIEW_LIMIT};
pub use highlight::{highlight, split_terms, Segment};
pub use sort::{sort_records, SortField, SortOrder};
