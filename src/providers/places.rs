//! Places-dialect provider: richest field coverage, needs an API key.
//!
//! Speaks the classic `{status, results}` JSON envelope with
//! `nearbysearch`, `textsearch`, and `details` endpoints under one
//! configurable base URL. The status string distinguishes "no data"
//! (`ZERO_RESULTS`, an empty success) from provider failure (anything
//! else but `OK`), which is what the failover chain keys on.

use crate::config::DiscoveryConfig;
use crate::error::DiscoveryError;
use crate::http;
use crate::provider::ProviderClient;
use crate::types::{PlaceDetails, Provider, RawHit};
use serde::Deserialize;

const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Detail fields requested during enrichment lookups.
const DETAIL_FIELDS: &str = "formatted_phone_number,website,opening_hours";

/// Places-dialect JSON API client.
///
/// Primary provider. Carries phones, ratings, websites, and an open-now
/// flag, but answers with an error envelope when unkeyed or over quota.
pub struct PlacesClient;

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    status: String,
    #[serde(default)]
    results: Vec<WirePlace>,
}

#[derive(Debug, Deserialize)]
struct DetailsEnvelope {
    status: String,
    result: Option<WireDetails>,
}

/// One place entry as the dialect sends it. Everything beyond the fields
/// the validating step requires stays optional.
#[derive(Debug, Deserialize)]
struct WirePlace {
    place_id: Option<String>,
    name: Option<String>,
    #[serde(default)]
    types: Vec<String>,
    geometry: Option<WireGeometry>,
    vicinity: Option<String>,
    formatted_address: Option<String>,
    rating: Option<f64>,
    formatted_phone_number: Option<String>,
    website: Option<String>,
    opening_hours: Option<WireOpeningHours>,
}

#[derive(Debug, Deserialize)]
struct WireGeometry {
    location: Option<WireLocation>,
}

#[derive(Debug, Deserialize)]
struct WireLocation {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct WireOpeningHours {
    open_now: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct WireDetails {
    formatted_phone_number: Option<String>,
    website: Option<String>,
    opening_hours: Option<WireOpeningHours>,
}

impl PlacesClient {
    async fn fetch_details(
        &self,
        provider_id: &str,
        config: &DiscoveryConfig,
    ) -> Result<PlaceDetails, DiscoveryError> {
        let client = http::build_client(config)?;

        let mut params: Vec<(&str, String)> = vec![
            ("place_id", provider_id.to_string()),
            ("fields", DETAIL_FIELDS.to_string()),
        ];
        if let Some(key) = &config.places.api_key {
            params.push(("key", key.clone()));
        }

        let url = format!("{}/details/json", config.places.base_url);
        let response = client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| DiscoveryError::ProviderUnavailable(format!("places request failed: {e}")))?
            .error_for_status()
            .map_err(|e| DiscoveryError::ProviderUnavailable(format!("places HTTP error: {e}")))?;

        let body = response.text().await.map_err(|e| {
            DiscoveryError::ProviderUnavailable(format!("places response read failed: {e}"))
        })?;

        parse_details_payload(&body)
    }
}

impl ProviderClient for PlacesClient {
    async fn nearby_search(
        &self,
        lat: f64,
        lon: f64,
        radius_km: f64,
        category_tag: &str,
        config: &DiscoveryConfig,
    ) -> Result<Vec<RawHit>, DiscoveryError> {
        tracing::trace!(lat, lon, radius_km, category_tag, "places nearby search");

        let client = http::build_client(config)?;

        let mut params: Vec<(&str, String)> = vec![
            ("location", format!("{lat},{lon}")),
            ("radius", radius_metres(radius_km)),
            ("type", category_tag.to_string()),
        ];
        if let Some(key) = &config.places.api_key {
            params.push(("key", key.clone()));
        }

        let url = format!("{}/nearbysearch/json", config.places.base_url);
        let response = client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| DiscoveryError::ProviderUnavailable(format!("places request failed: {e}")))?
            .error_for_status()
            .map_err(|e| DiscoveryError::ProviderUnavailable(format!("places HTTP error: {e}")))?;

        let body = response.text().await.map_err(|e| {
            DiscoveryError::ProviderUnavailable(format!("places response read failed: {e}"))
        })?;

        tracing::trace!(bytes = body.len(), "places response received");

        parse_search_payload(&body)
    }

    async fn place_details(&self, provider_id: &str, config: &DiscoveryConfig) -> PlaceDetails {
        tracing::trace!(provider_id, "places detail lookup");

        match self.fetch_details(provider_id, config).await {
            Ok(details) => details,
            Err(e) => {
                tracing::warn!(provider_id, error = %e, "places detail lookup failed");
                PlaceDetails::default()
            }
        }
    }

    async fn text_search(
        &self,
        query: &str,
        lat: f64,
        lon: f64,
        radius_km: f64,
        config: &DiscoveryConfig,
    ) -> Result<Vec<RawHit>, DiscoveryError> {
        tracing::trace!(query, lat, lon, "places text search");

        let client = http::build_client(config)?;

        let mut params: Vec<(&str, String)> = vec![
            ("query", query.to_string()),
            ("location", format!("{lat},{lon}")),
            ("radius", radius_metres(radius_km)),
        ];
        if let Some(key) = &config.places.api_key {
            params.push(("key", key.clone()));
        }

        let url = format!("{}/textsearch/json", config.places.base_url);
        let response = client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| DiscoveryError::ProviderUnavailable(format!("places request failed: {e}")))?
            .error_for_status()
            .map_err(|e| DiscoveryError::ProviderUnavailable(format!("places HTTP error: {e}")))?;

        let body = response.text().await.map_err(|e| {
            DiscoveryError::ProviderUnavailable(format!("places response read failed: {e}"))
        })?;

        parse_search_payload(&body)
    }

    fn provider(&self) -> Provider {
        Provider::Places
    }
}

fn radius_metres(radius_km: f64) -> String {
    ((radius_km * 1000.0).round() as u64).to_string()
}

/// Parse a `{status, results}` search payload into validated hits.
///
/// Extracted as a separate function for testability with fixture payloads.
pub(crate) fn parse_search_payload(payload: &str) -> Result<Vec<RawHit>, DiscoveryError> {
    let envelope: SearchEnvelope = serde_json::from_str(payload)
        .map_err(|e| DiscoveryError::MalformedResponse(format!("places payload: {e}")))?;

    match envelope.status.as_str() {
        STATUS_OK => {}
        STATUS_ZERO_RESULTS => return Ok(Vec::new()),
        other => {
            return Err(DiscoveryError::ProviderUnavailable(format!(
                "places status {other}"
            )))
        }
    }

    let hits: Vec<RawHit> = envelope
        .results
        .into_iter()
        .filter_map(validate_place)
        .collect();

    tracing::debug!(count = hits.len(), "places hits parsed");
    Ok(hits)
}

/// Parse a `{status, result}` detail payload.
///
/// A non-`OK` status yields the empty partial, matching the best-effort
/// enrichment contract.
pub(crate) fn parse_details_payload(payload: &str) -> Result<PlaceDetails, DiscoveryError> {
    let envelope: DetailsEnvelope = serde_json::from_str(payload)
        .map_err(|e| DiscoveryError::MalformedResponse(format!("places details payload: {e}")))?;

    if envelope.status != STATUS_OK {
        return Ok(PlaceDetails::default());
    }
    let Some(result) = envelope.result else {
        return Ok(PlaceDetails::default());
    };

    Ok(PlaceDetails {
        phone: result.formatted_phone_number.and_then(non_empty),
        website: result.website.and_then(non_empty),
        open_now: result.opening_hours.and_then(|h| h.open_now),
    })
}

/// Validate one wire place into a hit. Entries without a name or
/// coordinates are dropped here, never surfaced as errors.
fn validate_place(place: WirePlace) -> Option<RawHit> {
    let name = place.name.and_then(non_empty)?;
    let location = place.geometry?.location?;

    Some(RawHit {
        provider_id: place.place_id.and_then(non_empty),
        name,
        tags: place.types,
        lat: location.lat,
        lon: location.lng,
        // nearby answers carry `vicinity`, text answers `formatted_address`
        address: place
            .formatted_address
            .and_then(non_empty)
            .or_else(|| place.vicinity.and_then(non_empty)),
        rating: place.rating,
        phone: place.formatted_phone_number.and_then(non_empty),
        website: place.website.and_then(non_empty),
        open_now: place.opening_hours.and_then(|h| h.open_now),
    })
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
