//! Shared HTTP client construction for provider requests.
//!
//! Provides a configured [`reqwest::Client`] with the request timeout from
//! config and a descriptive product User-Agent (Overpass mirrors expect
//! one). Clients are built per request; no connection or cookie state is
//! shared between calls.

use crate::config::DiscoveryConfig;
use crate::error::DiscoveryError;
use std::time::Duration;

/// Product User-Agent sent with every provider request.
const USER_AGENT: &str = concat!("medlocate/", env!("CARGO_PKG_VERSION"));

/// Build a [`reqwest::Client`] configured for provider calls.
///
/// The client has:
/// - Timeout from config (covers connect plus body read)
/// - The crate's product User-Agent
/// - Gzip decompression
///
/// # Errors
///
/// Returns [`DiscoveryError::ProviderUnavailable`] if the client cannot be
/// constructed.
pub fn build_client(config: &DiscoveryConfig) -> Result<reqwest::Client, DiscoveryError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| DiscoveryError::ProviderUnavailable(format!("failed to build HTTP client: {e}")))
}
