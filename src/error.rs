//! Error types for the medlocate crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. No API keys or sensitive data appear in
//! error messages.

/// Errors that can occur during facility discovery.
///
/// Only [`DiscoveryError::Config`] ever reaches callers of the public
/// entry points; the other variants are recovered internally by the
/// provider failover chain and the seed-list degradation path.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// A provider could not be reached or answered with an error:
    /// transport failure, timeout, non-2xx status, or an error envelope.
    #[error("provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// A provider payload could not be parsed at the top level.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// Every provider in the failover chain failed for a query.
    #[error("all providers exhausted: {0}")]
    AllProvidersExhausted(String),

    /// Invalid discovery configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for medlocate results.
pub type Result<T> = std::result::Result<T, DiscoveryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_provider_unavailable() {
        let err = DiscoveryError::ProviderUnavailable("connection refused".into());
        assert_eq!(err.to_string(), "provider unavailable: connection refused");
    }

    #[test]
    fn display_malformed_response() {
        let err = DiscoveryError::MalformedResponse("missing elements array".into());
        assert_eq!(
            err.to_string(),
            "malformed provider response: missing elements array"
        );
    }

    #[test]
    fn display_all_providers_exhausted() {
        let err = DiscoveryError::AllProvidersExhausted("places: 500; overpass: timeout".into());
        assert_eq!(
            err.to_string(),
            "all providers exhausted: places: 500; overpass: timeout"
        );
    }

    #[test]
    fn display_config() {
        let err = DiscoveryError::Config("limit must be > 0".into());
        assert_eq!(err.to_string(), "config error: limit must be > 0");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DiscoveryError>();
    }
}
