//! Bounded-concurrency detail enrichment.
//!
//! Hits that arrive without a phone number but with a provider-native id
//! get one detail lookup against the provider that produced them, with at
//! most `detail_concurrency` lookups in flight at a time. Lookup failures
//! keep the original hit untouched. The candidate order is preserved so
//! downstream first-seen semantics hold, and dropping the future cancels
//! any in-flight lookups.

use futures::stream::{self, StreamExt};

use crate::config::DiscoveryConfig;
use crate::provider::ProviderClient;
use crate::providers::{OverpassClient, PlacesClient};
use crate::types::{PlaceDetails, Provider, RawHit};

use super::Candidate;

/// Run detail enrichment over the candidate list.
pub async fn enrich_candidates(
    mut candidates: Vec<Candidate>,
    config: &DiscoveryConfig,
) -> Vec<Candidate> {
    let mut lookups: Vec<(usize, Provider, String)> = Vec::new();
    for (index, candidate) in candidates.iter().enumerate() {
        if !needs_details(&candidate.hit) {
            continue;
        }
        let Some(provider_id) = candidate.hit.provider_id.clone() else {
            continue;
        };
        lookups.push((index, candidate.provider, provider_id));
    }

    if lookups.is_empty() {
        return candidates;
    }

    tracing::debug!(count = lookups.len(), "enriching hits without phone numbers");

    let fetched: Vec<(usize, PlaceDetails)> =
        stream::iter(lookups.into_iter().map(|(index, provider, provider_id)| async move {
            let details = lookup_details(provider, &provider_id, config).await;
            (index, details)
        }))
        .buffered(config.detail_concurrency)
        .collect()
        .await;

    for (index, details) in fetched {
        merge_details(&mut candidates[index].hit, details);
    }

    candidates
}

/// Whether a hit warrants a detail lookup: no phone yet, and a native id
/// to look it up by.
pub(crate) fn needs_details(hit: &RawHit) -> bool {
    hit.phone.is_none() && hit.provider_id.is_some()
}

/// Merge detail fields into a hit. A detail field only wins when the
/// lookup actually carried it; fields already on the hit are never
/// cleared.
pub(crate) fn merge_details(hit: &mut RawHit, details: PlaceDetails) {
    if let Some(phone) = details.phone {
        hit.phone = Some(phone);
    }
    if let Some(website) = details.website {
        hit.website = Some(website);
    }
    if let Some(open_now) = details.open_now {
        hit.open_now = Some(open_now);
    }
}

/// Dispatch a detail lookup to the provider that produced the hit.
async fn lookup_details(
    provider: Provider,
    provider_id: &str,
    config: &DiscoveryConfig,
) -> PlaceDetails {
    match provider {
        Provider::Places => PlacesClient.place_details(provider_id, config).await,
        Provider::Overpass => OverpassClient.place_details(provider_id, config).await,
    }
}
