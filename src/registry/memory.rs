//! In-memory registry fake
//!
//! Implements the `RegistryStore` contract over a vector of records using
//! the same match semantics the translated store filter expresses. Exists
//! for tests and offline demos; production always goes through
//! `HttpRegistryStore`.

use super::client::{RegistryStore, RESULT_CAP};
use super::record::VoterRecord;
use crate::error::AppError;
use crate::query::{field_matches, SearchQuery};
use async_trait::async_trait;

pub struct InMemoryRegistry {
    records: Vec<VoterRecord>,
}

impl InMemoryRegistry {
    pub fn new(records: Vec<VoterRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl RegistryStore for InMemoryRegistry {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<VoterRecord>, AppError> {
        let query = query.normalized();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let mut matched: Vec<VoterRecord> = self
            .records
            .iter()
            .filter(|voter| {
                let first_ok = query
                    .first_name
                    .as_ref()
                    .map(|f| field_matches(&voter.first_name, &f.value, f.mode))
                    .unwrap_or(true);
                let last_ok = query
                    .last_name
                    .as_ref()
                    .map(|f| field_matches(&voter.last_name, &f.value, f.mode))
                    .unwrap_or(true);
                let number_ok = query
                    .street_number
                    .as_ref()
                    .map(|n| voter.address.street_number == *n)
                    .unwrap_or(true);
                let street_ok = query
                    .street_name
                    .as_ref()
                    .map(|f| field_matches(&voter.address.street, &f.value, f.mode))
                    .unwrap_or(true);

                first_ok && last_ok && number_ok && street_ok
            })
            .cloned()
            .collect();

        matched.truncate(RESULT_CAP);
        Ok(matched)
    }
}
