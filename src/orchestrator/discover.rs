//! The discovery pipeline.
//!
//! A nearby query splits the result limit into a hospital bucket and a
//! clinic/doctor bucket, runs one provider chain per bucket concurrently,
//! merges the capped batches, enriches hits that lack a phone number,
//! normalizes every hit into a [`Facility`], deduplicates by proximity,
//! sorts by distance and truncates to the limit. When no provider yields
//! anything the caller still gets the seed facilities, never an empty
//! list. Text search reuses the chain and normalization but skips
//! deduplication and degrades to an empty list instead of seeds.

use std::cmp::Ordering;

use futures::future;

use crate::category;
use crate::config::DiscoveryConfig;
use crate::error::{DiscoveryError, Result};
use crate::geo;
use crate::provider::ProviderClient;
use crate::providers::{OverpassClient, PlacesClient};
use crate::seed;
use crate::types::{
    self, Facility, Provider, RawHit, ADDRESS_UNAVAILABLE, PHONE_UNAVAILABLE, QUERY_DOCTOR,
    QUERY_HOSPITAL, QUERY_TEXT,
};

use super::dedup::deduplicate;
use super::enrich::enrich_candidates;
use super::failover::{ChainState, ProviderChain};
use super::Candidate;

/// Find medical facilities around a coordinate.
pub async fn discover(lat: f64, lon: f64, config: &DiscoveryConfig) -> Result<Vec<Facility>> {
    config.validate()?;
    tracing::debug!(
        lat,
        lon,
        radius_km = config.radius_km,
        limit = config.limit,
        "starting nearby discovery"
    );

    let candidates = gather_candidates(lat, lon, config).await;
    if candidates.is_empty() {
        tracing::warn!("no provider yielded candidates, falling back to seed facilities");
        let mut seeds = seed::seed_facilities(lat, lon);
        sort_by_distance(&mut seeds);
        return Ok(seeds);
    }

    let candidates = enrich_candidates(candidates, config).await;
    let facilities: Vec<Facility> = candidates
        .iter()
        .map(|candidate| normalize(candidate, lat, lon))
        .collect();

    let mut facilities = deduplicate(facilities, config.cluster_decimals);
    sort_by_distance(&mut facilities);
    facilities.truncate(config.limit);

    tracing::debug!(count = facilities.len(), "nearby discovery complete");
    Ok(facilities)
}

/// Find medical facilities matching a free-text query near a coordinate.
///
/// Unlike nearby discovery this degrades to an empty list when every
/// provider fails, and it performs no proximity deduplication since all
/// hits come from a single provider batch.
pub async fn search_text(
    query: &str,
    lat: f64,
    lon: f64,
    config: &DiscoveryConfig,
) -> Result<Vec<Facility>> {
    config.validate()?;
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    tracing::debug!(query = trimmed, lat, lon, "starting text search");

    let chain_query = ChainQuery::Text {
        query: trimmed,
        lat,
        lon,
        radius_km: config.radius_km,
    };
    let (provider, hits) = match run_chain(&chain_query, config).await {
        Ok(Some(batch)) => batch,
        Ok(None) => return Ok(Vec::new()),
        Err(err) => {
            tracing::warn!(error = %err, "text search exhausted all providers");
            return Ok(Vec::new());
        }
    };

    let candidates: Vec<Candidate> = hits
        .into_iter()
        .take(config.limit)
        .enumerate()
        .map(|(ordinal, hit)| Candidate {
            provider,
            category_tag: QUERY_TEXT,
            ordinal,
            hit,
        })
        .collect();
    let candidates = enrich_candidates(candidates, config).await;

    let mut facilities: Vec<Facility> = candidates
        .iter()
        .map(|candidate| normalize(candidate, lat, lon))
        .collect();
    sort_by_distance(&mut facilities);
    facilities.truncate(config.limit);

    tracing::debug!(count = facilities.len(), "text search complete");
    Ok(facilities)
}

/// How the result limit is split across the two category queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CategoryBuckets {
    pub hospital: usize,
    pub clinic: usize,
}

/// Split `limit` into a hospital bucket and a clinic/doctor bucket.
///
/// The hospital bucket takes `hospital_share` of the limit, rounded
/// down but never below one slot, so a limit of one still surfaces a
/// hospital. The clinic bucket takes the remainder.
pub(crate) fn split_limit(limit: usize, hospital_share: f64) -> CategoryBuckets {
    let hospital = ((limit as f64 * hospital_share).floor() as usize)
        .max(1)
        .min(limit);
    CategoryBuckets {
        hospital,
        clinic: limit - hospital,
    }
}

/// Run both category chains concurrently and merge their capped batches
/// in category order. A chain that exhausts every provider only costs
/// its own category.
async fn gather_candidates(lat: f64, lon: f64, config: &DiscoveryConfig) -> Vec<Candidate> {
    let buckets = split_limit(config.limit, config.hospital_share);
    let mut queries: Vec<(&'static str, usize)> = Vec::new();
    if buckets.hospital > 0 {
        queries.push((QUERY_HOSPITAL, buckets.hospital));
    }
    if buckets.clinic > 0 {
        queries.push((QUERY_DOCTOR, buckets.clinic));
    }

    let outcomes = future::join_all(queries.iter().map(|&(category_tag, _)| {
        let chain_query = ChainQuery::Nearby {
            lat,
            lon,
            radius_km: config.radius_km,
            category_tag,
        };
        async move { run_chain(&chain_query, config).await }
    }))
    .await;

    let mut candidates = Vec::new();
    for (outcome, (category_tag, cap)) in outcomes.into_iter().zip(queries) {
        match outcome {
            Ok(Some((provider, hits))) => {
                for (ordinal, hit) in hits.into_iter().take(cap).enumerate() {
                    candidates.push(Candidate {
                        provider,
                        category_tag,
                        ordinal,
                        hit,
                    });
                }
            }
            Ok(None) => {
                tracing::debug!(category = category_tag, "no facilities in category");
            }
            Err(err) => {
                tracing::warn!(
                    category = category_tag,
                    error = %err,
                    "category query exhausted all providers"
                );
            }
        }
    }
    candidates
}

/// A single query shape the provider chain can carry across providers.
enum ChainQuery<'a> {
    Nearby {
        lat: f64,
        lon: f64,
        radius_km: f64,
        category_tag: &'a str,
    },
    Text {
        query: &'a str,
        lat: f64,
        lon: f64,
        radius_km: f64,
    },
}

/// Walk the provider chain until one provider yields hits.
///
/// Errors retry the same provider with exponential backoff up to
/// `max_attempts`, then advance. An empty response advances immediately
/// without retrying. Returns `Ok(None)` when the chain exhausts but at
/// least one provider answered with a legitimate empty result, and
/// [`DiscoveryError::AllProvidersExhausted`] when every provider failed
/// outright.
async fn run_chain(
    query: &ChainQuery<'_>,
    config: &DiscoveryConfig,
) -> Result<Option<(Provider, Vec<RawHit>)>> {
    let mut chain = ProviderChain::new(
        config.providers.clone(),
        config.max_attempts,
        config.retry_backoff_ms,
    );
    let mut errors: Vec<String> = Vec::new();
    let mut saw_empty = false;

    loop {
        match chain.state() {
            ChainState::Attempting { provider, attempt } => {
                tracing::debug!(provider = provider.name(), attempt, "querying provider");
                match dispatch(provider, query, config).await {
                    Ok(hits) if !hits.is_empty() => {
                        tracing::debug!(
                            provider = provider.name(),
                            hits = hits.len(),
                            "provider answered"
                        );
                        return Ok(Some((provider, hits)));
                    }
                    Ok(_) => {
                        saw_empty = true;
                        chain.record_empty();
                    }
                    Err(err) => {
                        errors.push(format!("{}: {err}", provider.name()));
                        if let Some(backoff) = chain.record_failure() {
                            tokio::time::sleep(backoff).await;
                        }
                    }
                }
            }
            ChainState::Exhausted => {
                if saw_empty {
                    return Ok(None);
                }
                return Err(DiscoveryError::AllProvidersExhausted(errors.join("; ")));
            }
        }
    }
}

async fn dispatch(
    provider: Provider,
    query: &ChainQuery<'_>,
    config: &DiscoveryConfig,
) -> Result<Vec<RawHit>> {
    match (provider, query) {
        (Provider::Places, ChainQuery::Nearby { lat, lon, radius_km, category_tag }) => {
            PlacesClient
                .nearby_search(*lat, *lon, *radius_km, category_tag, config)
                .await
        }
        (Provider::Places, ChainQuery::Text { query, lat, lon, radius_km }) => {
            PlacesClient
                .text_search(query, *lat, *lon, *radius_km, config)
                .await
        }
        (Provider::Overpass, ChainQuery::Nearby { lat, lon, radius_km, category_tag }) => {
            OverpassClient
                .nearby_search(*lat, *lon, *radius_km, category_tag, config)
                .await
        }
        (Provider::Overpass, ChainQuery::Text { query, lat, lon, radius_km }) => {
            OverpassClient
                .text_search(query, *lat, *lon, *radius_km, config)
                .await
        }
    }
}

/// Turn an enriched hit into the caller-facing record. Missing fields
/// become the placeholder strings, never empty strings.
fn normalize(candidate: &Candidate, origin_lat: f64, origin_lon: f64) -> Facility {
    let hit = &candidate.hit;
    Facility {
        id: types::facility_id(
            candidate.provider,
            hit.provider_id.as_deref(),
            candidate.category_tag,
            candidate.ordinal,
        ),
        name: hit.name.clone(),
        category: category::categorize(&hit.tags),
        latitude: hit.lat,
        longitude: hit.lon,
        address: hit
            .address
            .clone()
            .unwrap_or_else(|| ADDRESS_UNAVAILABLE.to_string()),
        phone: hit
            .phone
            .clone()
            .unwrap_or_else(|| PHONE_UNAVAILABLE.to_string()),
        distance_km: geo::round_km(geo::haversine_km(origin_lat, origin_lon, hit.lat, hit.lon)),
        rating: hit.rating.unwrap_or(0.0).max(0.0),
        website: hit.website.clone(),
        opening_status: category::opening_status(hit.open_now),
        specialties: category::specialties(&hit.tags),
        emergency: category::emergency(&hit.tags),
    }
}

/// Stable ascending sort by distance. Ties keep their relative order so
/// deduplication survivors stay where merging put them.
fn sort_by_distance(facilities: &mut [Facility]) {
    facilities.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(Ordering::Equal)
    });
}
