//! Registry store clients
//!
//! One search is one outbound call: no streaming, no pagination cursor. The
//! full matching set, capped at `RESULT_CAP`, comes back in one response.

use super::filter::translate;
use super::record::VoterRecord;
use crate::error::AppError;
use crate::query::SearchQuery;
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Safety limit on one response from the store
pub const RESULT_CAP: usize = 1000;

/// The registry search contract
///
/// Implemented over HTTP in production and by `InMemoryRegistry` in tests;
/// both honor the same semantics, including the empty-query short-circuit.
#[async_trait]
pub trait RegistryStore: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<VoterRecord>, AppError>;
}

/// HTTP client for the registry's document query endpoint
pub struct HttpRegistryStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRegistryStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = crate::http::client_with_timeout(Duration::from_secs(30));
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl RegistryStore for HttpRegistryStore {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<VoterRecord>, AppError> {
        let filter = translate(query);

        let doc = match filter.as_document() {
            // Empty query: zero results with no round-trip. Handing the
            // store an unconstrained filter would scan the whole registry.
            None => {
                debug!("Empty query short-circuited; store not contacted");
                return Ok(Vec::new());
            }
            Some(doc) => doc,
        };

        let url = format!("{}/api/voters/query", self.base_url);
        debug!("Registry query: {}", query.describe());

        let response = self
            .client
            .post(&url)
            .json(&json!({ "filter": doc, "limit": RESULT_CAP }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Transport(format!(
                "registry returned HTTP {}",
                response.status()
            )));
        }

        let mut records: Vec<VoterRecord> = response.json().await?;
        // Defensive cap in case the store ignores the limit
        records.truncate(RESULT_CAP);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let store = HttpRegistryStore::new("http://localhost:5000/");
        assert_eq!(store.base_url, "http://localhost:5000");
    }

    #[tokio::test]
    async fn test_empty_query_makes_no_round_trip() {
        // Unroutable base URL: any network attempt would error, so an Ok
        // empty result proves the store was never contacted.
        let store = HttpRegistryStore::new("http://127.0.0.1:1");
        let results = store.search(&SearchQuery::default()).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_store_is_a_transport_error() {
        use crate::query::{MatchMode, SearchField};

        let store = HttpRegistryStore::new("http://127.0.0.1:1");
        let query = SearchQuery {
            last_name: Some(SearchField::new("doe", MatchMode::Starts)),
            ..SearchQuery::default()
        };
        let err = store.search(&query).await.unwrap_err();
        assert_eq!(err.error_code(), "search_transport_error");
    }
}
