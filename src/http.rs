//! HTTP client utilities
//!
//! Provides a reqwest::Client configured with a request timeout. The timeout
//! is the transport boundary's own deadline; a slow registry surfaces as a
//! transport error rather than blocking the caller indefinitely.

use reqwest::Client;
use std::time::Duration;

/// Build a reqwest Client with the given timeout
pub fn client_with_timeout(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("rollmatch/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to create HTTP client")
}
