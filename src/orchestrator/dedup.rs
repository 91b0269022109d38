//! Proximity-cluster deduplication across providers.
//!
//! Two providers reporting the same physical facility rarely agree on the
//! exact coordinates, so exact matching misses them. Instead, latitude and
//! longitude are independently rounded to a configured number of decimal
//! places and the rounded pair becomes the cluster key (4 decimals is a
//! ~11 m cell). Within a cluster the copy with the strictly higher
//! completeness score wins; ties keep the first-seen copy. Output order
//! preserves first-seen positions so the later distance sort has
//! deterministic tie behaviour.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::types::Facility;

use super::quality::has_better_info;

/// Cluster key for a coordinate pair at the given decimal precision.
///
/// Rounds each axis to `decimals` places and scales to integers, so the
/// key is hashable and immune to float noise.
pub(crate) fn cluster_key(lat: f64, lon: f64, decimals: u32) -> (i64, i64) {
    let scale = 10f64.powi(decimals as i32);
    ((lat * scale).round() as i64, (lon * scale).round() as i64)
}

/// Deduplicate facilities by proximity cluster.
///
/// Single pass, O(n): each facility either starts a new cluster (keeping
/// its position) or challenges the cluster's incumbent in place. A
/// challenger only replaces the incumbent when
/// [`has_better_info`](super::quality::has_better_info) says it carries
/// strictly more information.
pub fn deduplicate(facilities: Vec<Facility>, decimals: u32) -> Vec<Facility> {
    let mut kept: Vec<Facility> = Vec::with_capacity(facilities.len());
    // Map from cluster key → index of the incumbent in `kept`.
    let mut clusters: HashMap<(i64, i64), usize> = HashMap::new();

    for facility in facilities {
        let key = cluster_key(facility.latitude, facility.longitude, decimals);
        match clusters.entry(key) {
            Entry::Occupied(slot) => {
                let incumbent = &mut kept[*slot.get()];
                if has_better_info(&facility, incumbent) {
                    tracing::trace!(
                        winner = %facility.id,
                        loser = %incumbent.id,
                        "duplicate cluster resolved"
                    );
                    *incumbent = facility;
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(kept.len());
                kept.push(facility);
            }
        }
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, HOURS_UNAVAILABLE, PHONE_UNAVAILABLE};

    fn make_facility(id: &str, lat: f64, lon: f64, phone: Option<&str>) -> Facility {
        Facility {
            id: id.into(),
            name: format!("Facility {id}"),
            category: Category::Hospital,
            latitude: lat,
            longitude: lon,
            address: "addr".into(),
            phone: phone.unwrap_or(PHONE_UNAVAILABLE).into(),
            distance_km: 1.0,
            rating: 0.0,
            website: None,
            opening_status: HOURS_UNAVAILABLE.into(),
            specialties: vec![],
            emergency: false,
        }
    }

    #[test]
    fn distinct_locations_pass_through_in_order() {
        let facilities = vec![
            make_facility("a", 19.08, 72.88, None),
            make_facility("b", 19.10, 72.90, None),
            make_facility("c", 19.12, 72.92, None),
        ];
        let deduped = deduplicate(facilities, 4);
        let ids: Vec<&str> = deduped.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn nearby_copies_collapse_to_one() {
        // 19.0800 vs 19.08004 round to the same 4-decimal cell
        let facilities = vec![
            make_facility("a", 19.0800, 72.8800, None),
            make_facility("b", 19.08004, 72.88004, None),
        ];
        let deduped = deduplicate(facilities, 4);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].id, "a");
    }

    #[test]
    fn richer_copy_replaces_incumbent_in_place() {
        let facilities = vec![
            make_facility("first", 19.08, 72.88, None),
            make_facility("solo", 19.10, 72.90, None),
            make_facility("richer", 19.08, 72.88, Some("+91 22 1234")),
        ];
        let deduped = deduplicate(facilities, 4);
        assert_eq!(deduped.len(), 2);
        // replacement keeps the first-seen position
        assert_eq!(deduped[0].id, "richer");
        assert_eq!(deduped[1].id, "solo");
    }

    #[test]
    fn equal_scores_keep_first_seen() {
        let facilities = vec![
            make_facility("first", 19.08, 72.88, Some("+91 11")),
            make_facility("second", 19.08, 72.88, Some("+91 22")),
        ];
        let deduped = deduplicate(facilities, 4);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].id, "first");
    }

    #[test]
    fn deduplication_is_idempotent() {
        let facilities = vec![
            make_facility("a", 19.0800, 72.8800, Some("+91 1")),
            make_facility("b", 19.08001, 72.88001, None),
            make_facility("c", 19.10, 72.90, None),
        ];
        let once = deduplicate(facilities, 4);
        let twice = deduplicate(once.clone(), 4);
        let once_ids: Vec<&str> = once.iter().map(|f| f.id.as_str()).collect();
        let twice_ids: Vec<&str> = twice.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(once_ids, twice_ids);
    }

    #[test]
    fn third_decimal_difference_is_not_a_duplicate() {
        // ~110 m apart, distinct facilities at 4-decimal precision
        let facilities = vec![
            make_facility("a", 19.080, 72.880, None),
            make_facility("b", 19.081, 72.880, None),
        ];
        let deduped = deduplicate(facilities, 4);
        assert_eq!(deduped.len(), 2);
    }

    #[test]
    fn precision_knob_widens_clusters() {
        // distinct at 4 decimals, same cell at 2 decimals
        let facilities = vec![
            make_facility("a", 19.080, 72.880, None),
            make_facility("b", 19.081, 72.880, None),
        ];
        assert_eq!(deduplicate(facilities.clone(), 4).len(), 2);
        assert_eq!(deduplicate(facilities, 2).len(), 1);
    }

    #[test]
    fn cluster_key_rounds_not_truncates() {
        assert_eq!(cluster_key(19.08006, 72.88004, 4), (190801, 728800));
        assert_ne!(
            cluster_key(19.08001, 0.0, 4),
            cluster_key(19.08009, 0.0, 4),
        );
    }

    #[test]
    fn empty_input_returns_empty() {
        assert!(deduplicate(vec![], 4).is_empty());
    }
}
