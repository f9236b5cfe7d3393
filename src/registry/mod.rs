//! Registry store integration
//!
//! The registry is an external document store holding `VoterRecord` entries.
//! This module owns the record shape, the translation from `SearchQuery` to
//! the store's query dialect, and the store clients (HTTP, plus an in-memory
//! fake that implements the same contract for tests).

pub mod client;
pub mod filter;
pub mod memory;
pub mod record;

pub use client::{HttpRegistryStore, RegistryStore, RESULT_CAP};
pub use filter::{translate, StoreFilter};
pub use memory::InMemoryRegistry;
pub use record::{VoterAddress, VoterRecord};
