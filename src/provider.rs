//! Trait definition for pluggable directory provider backends.
//!
//! Each provider (Places dialect, Overpass dialect) implements
//! [`ProviderClient`] to give the orchestrator one uniform interface for
//! nearby queries, free-text queries, and detail enrichment.

use crate::config::DiscoveryConfig;
use crate::error::DiscoveryError;
use crate::types::{PlaceDetails, Provider, RawHit};

/// A pluggable directory provider backend.
///
/// Implementors speak one provider's wire dialect and emit validated
/// [`RawHit`] values. Each provider handles its own:
///
/// - Request construction (query params or QL body) with encoding
/// - Status-envelope interpretation (empty answer vs provider error)
/// - Strict payload decode with per-hit validation (a hit without a name
///   or coordinates is dropped, never an error)
///
/// All implementations must be `Send + Sync` for concurrent category
/// queries.
pub trait ProviderClient: Send + Sync {
    /// Query facilities of one category around an origin point.
    ///
    /// # Arguments
    ///
    /// * `lat`, `lon` - Query origin in decimal degrees.
    /// * `radius_km` - Search radius in kilometres.
    /// * `category_tag` - [`QUERY_HOSPITAL`](crate::types::QUERY_HOSPITAL)
    ///   or [`QUERY_DOCTOR`](crate::types::QUERY_DOCTOR); each provider maps
    ///   the tag onto its own type/amenity vocabulary.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::ProviderUnavailable`] for transport
    /// failures, timeouts, non-2xx responses, and error envelopes, or
    /// [`DiscoveryError::MalformedResponse`] when the payload cannot be
    /// decoded. An empty result list is `Ok(vec![])`, not an error.
    fn nearby_search(
        &self,
        lat: f64,
        lon: f64,
        radius_km: f64,
        category_tag: &str,
        config: &DiscoveryConfig,
    ) -> impl std::future::Future<Output = Result<Vec<RawHit>, DiscoveryError>> + Send;

    /// Look up enrichment details for one hit by its provider-native id.
    ///
    /// Best-effort by contract: any failure is logged and swallowed, and
    /// the empty partial comes back instead. Enrichment must never sink a
    /// request that already has usable hits.
    fn place_details(
        &self,
        provider_id: &str,
        config: &DiscoveryConfig,
    ) -> impl std::future::Future<Output = PlaceDetails> + Send;

    /// Query facilities matching a free-text name near an origin point.
    ///
    /// Same error semantics as [`ProviderClient::nearby_search`].
    fn text_search(
        &self,
        query: &str,
        lat: f64,
        lon: f64,
        radius_km: f64,
        config: &DiscoveryConfig,
    ) -> impl std::future::Future<Output = Result<Vec<RawHit>, DiscoveryError>> + Send;

    /// Returns which [`Provider`] variant this implementation represents.
    fn provider(&self) -> Provider;
}
