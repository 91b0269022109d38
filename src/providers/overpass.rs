//! Overpass-dialect provider: keyless community data, the fallback.
//!
//! Speaks Overpass QL over a single form-POST endpoint (`data=` body) and
//! the `{elements}` JSON envelope. Nearby queries filter on amenity values
//! mapped from the category tag; text search filters on a case-insensitive
//! name regex; detail lookups re-query one element by id. OSM tags are
//! normalized into the shared tag vocabulary at parse time.

use crate::config::DiscoveryConfig;
use crate::error::DiscoveryError;
use crate::http;
use crate::provider::ProviderClient;
use crate::types::{PlaceDetails, Provider, RawHit, QUERY_HOSPITAL};
use serde::Deserialize;
use std::collections::HashMap;

/// Overpass QL client over an OSM mirror.
///
/// Fallback provider. No API key and no ratings, but dense coverage and
/// a tag set rich enough for phones, websites, and addresses.
pub struct OverpassClient;

#[derive(Debug, Deserialize)]
struct OverpassEnvelope {
    #[serde(default)]
    elements: Vec<WireElement>,
}

#[derive(Debug, Deserialize)]
struct WireElement {
    #[serde(rename = "type")]
    kind: Option<String>,
    id: Option<u64>,
    lat: Option<f64>,
    lon: Option<f64>,
    /// Ways carry their centroid here instead of `lat`/`lon`.
    center: Option<WireCenter>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct WireCenter {
    lat: f64,
    lon: f64,
}

impl OverpassClient {
    async fn post_query(
        &self,
        query: &str,
        config: &DiscoveryConfig,
    ) -> Result<String, DiscoveryError> {
        let client = http::build_client(config)?;

        let response = client
            .post(&config.overpass.base_url)
            .form(&[("data", query)])
            .send()
            .await
            .map_err(|e| {
                DiscoveryError::ProviderUnavailable(format!("overpass request failed: {e}"))
            })?
            .error_for_status()
            .map_err(|e| DiscoveryError::ProviderUnavailable(format!("overpass HTTP error: {e}")))?;

        response.text().await.map_err(|e| {
            DiscoveryError::ProviderUnavailable(format!("overpass response read failed: {e}"))
        })
    }

    async fn fetch_details(
        &self,
        provider_id: &str,
        config: &DiscoveryConfig,
    ) -> Result<PlaceDetails, DiscoveryError> {
        // Ids from other providers have no Overpass form; nothing to look up.
        let Some(query) = details_query(provider_id, config.timeout_seconds) else {
            return Ok(PlaceDetails::default());
        };

        let body = self.post_query(&query, config).await?;
        let hits = parse_elements(&body)?;

        Ok(hits
            .into_iter()
            .next()
            .map(|hit| PlaceDetails {
                phone: hit.phone,
                website: hit.website,
                open_now: None,
            })
            .unwrap_or_default())
    }
}

impl ProviderClient for OverpassClient {
    async fn nearby_search(
        &self,
        lat: f64,
        lon: f64,
        radius_km: f64,
        category_tag: &str,
        config: &DiscoveryConfig,
    ) -> Result<Vec<RawHit>, DiscoveryError> {
        tracing::trace!(lat, lon, radius_km, category_tag, "overpass nearby search");

        let query = nearby_query(lat, lon, radius_km, category_tag, config.timeout_seconds);
        let body = self.post_query(&query, config).await?;

        tracing::trace!(bytes = body.len(), "overpass response received");

        parse_elements(&body)
    }

    async fn place_details(&self, provider_id: &str, config: &DiscoveryConfig) -> PlaceDetails {
        tracing::trace!(provider_id, "overpass detail lookup");

        match self.fetch_details(provider_id, config).await {
            Ok(details) => details,
            Err(e) => {
                tracing::warn!(provider_id, error = %e, "overpass detail lookup failed");
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
        tracing::trace!(query, lat, lon, "overpass text search");

        let ql = text_query(query, lat, lon, radius_km, config.timeout_seconds);
        let body = self.post_query(&ql, config).await?;

        parse_elements(&body)
    }

    fn provider(&self) -> Provider {
        Provider::Overpass
    }
}

/// Amenity values queried for a category tag.
fn amenities_for(category_tag: &str) -> &'static [&'static str] {
    if category_tag == QUERY_HOSPITAL {
        &["hospital"]
    } else {
        &["clinic", "doctors"]
    }
}

/// Build the QL for a nearby category query. Nodes and ways both matter;
/// `out center` makes ways carry a usable centroid.
pub(crate) fn nearby_query(
    lat: f64,
    lon: f64,
    radius_km: f64,
    category_tag: &str,
    timeout_seconds: u64,
) -> String {
    let around = format!("around:{},{lat},{lon}", radius_metres(radius_km));

    let mut clauses = String::new();
    for amenity in amenities_for(category_tag) {
        clauses.push_str(&format!("  node[\"amenity\"=\"{amenity}\"]({around});\n"));
        clauses.push_str(&format!("  way[\"amenity\"=\"{amenity}\"]({around});\n"));
    }

    format!("[out:json][timeout:{timeout_seconds}];\n(\n{clauses});\nout center;")
}

/// Build the QL for a free-text name query across all medical amenities.
pub(crate) fn text_query(
    query: &str,
    lat: f64,
    lon: f64,
    radius_km: f64,
    timeout_seconds: u64,
) -> String {
    let around = format!("around:{},{lat},{lon}", radius_metres(radius_km));
    let pattern = escape_pattern(query);

    format!(
        "[out:json][timeout:{timeout_seconds}];\n(\n  \
         node[\"amenity\"~\"hospital|clinic|doctors\"][\"name\"~\"{pattern}\",i]({around});\n  \
         way[\"amenity\"~\"hospital|clinic|doctors\"][\"name\"~\"{pattern}\",i]({around});\n\
         );\nout center;"
    )
}

/// Build the QL for a detail lookup by the `node/<id>` / `way/<id>` ids
/// this provider mints. Returns `None` for ids in any other format.
pub(crate) fn details_query(provider_id: &str, timeout_seconds: u64) -> Option<String> {
    let (kind, id) = provider_id.split_once('/')?;
    if !matches!(kind, "node" | "way") {
        return None;
    }
    let id: u64 = id.parse().ok()?;

    Some(format!(
        "[out:json][timeout:{timeout_seconds}];\n{kind}({id});\nout center;"
    ))
}

/// Escape a user query into a literal-match QL regex. Regex metacharacters
/// get a (QL-escaped) backslash; double quotes use the QL string escape.
fn escape_pattern(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\\\\\"),
            '.' | '^' | '$' | '*' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|' => {
                out.push_str("\\\\");
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

fn radius_metres(radius_km: f64) -> u64 {
    (radius_km * 1000.0).round() as u64
}

/// Parse an `{elements}` payload into validated hits.
///
/// Extracted as a separate function for testability with fixture payloads.
pub(crate) fn parse_elements(payload: &str) -> Result<Vec<RawHit>, DiscoveryError> {
    let envelope: OverpassEnvelope = serde_json::from_str(payload)
        .map_err(|e| DiscoveryError::MalformedResponse(format!("overpass payload: {e}")))?;

    let hits: Vec<RawHit> = envelope
        .elements
        .into_iter()
        .filter_map(validate_element)
        .collect();

    tracing::debug!(count = hits.len(), "overpass hits parsed");
    Ok(hits)
}

/// Validate one element into a hit. Unnamed elements and elements without
/// usable coordinates are dropped here, never surfaced as errors.
fn validate_element(element: WireElement) -> Option<RawHit> {
    let name = element.tags.get("name").cloned().and_then(non_empty)?;

    let (lat, lon) = match (element.lat, element.lon) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => {
            let center = element.center?;
            (center.lat, center.lon)
        }
    };

    let provider_id = match (element.kind.as_deref(), element.id) {
        (Some(kind @ ("node" | "way")), Some(id)) => Some(format!("{kind}/{id}")),
        _ => None,
    };

    let phone = element
        .tags
        .get("phone")
        .or_else(|| element.tags.get("contact:phone"))
        .cloned()
        .and_then(non_empty);
    let website = element
        .tags
        .get("website")
        .or_else(|| element.tags.get("contact:website"))
        .cloned()
        .and_then(non_empty);

    Some(RawHit {
        provider_id,
        name,
        tags: normalize_tags(&element.tags),
        lat,
        lon,
        address: assemble_address(&element.tags),
        // OSM carries no ratings
        rating: None,
        phone,
        website,
        // opening_hours is a rules string, not an open/closed flag
        open_now: None,
    })
}

/// Flatten OSM tags into the shared tag vocabulary the categorizer and
/// specialty mapping understand.
fn normalize_tags(tags: &HashMap<String, String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut push = |tag: String| {
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    };

    if let Some(amenity) = tags.get("amenity") {
        push(amenity.clone());
    }
    if tags.get("emergency").map(String::as_str) == Some("yes") {
        push("emergency".into());
    }
    if tags.get("urgent_care").map(String::as_str) == Some("yes") {
        push("urgent_care".into());
    }
    if let Some(healthcare) = tags.get("healthcare") {
        push(healthcare.clone());
    }
    if let Some(speciality) = tags.get("speciality") {
        push(speciality.clone());
    }

    out
}

/// Assemble `addr:*` tags into one display line. Street-gated: without a
/// street there is no usable address.
fn assemble_address(tags: &HashMap<String, String>) -> Option<String> {
    let street = tags.get("addr:street").cloned().and_then(non_empty)?;

    let street_line = match tags.get("addr:housenumber").cloned().and_then(non_empty) {
        Some(number) => format!("{number} {street}"),
        None => street,
    };

    Some(match tags.get("addr:city").cloned().and_then(non_empty) {
        Some(city) => format!("{street_line}, {city}"),
        None => street_line,
    })
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
