//! Discovery orchestrator: category fan-out, provider failover, detail
//! enrichment, dedup, and ranking.
//!
//! This module runs the category queries concurrently through the provider
//! failover chain, enriches hits that arrived without contact data,
//! normalizes everything into facilities, collapses proximity duplicates,
//! and returns a distance-sorted, truncated list, or the seed fallback
//! when every provider came up empty.

pub mod dedup;
pub mod discover;
pub mod enrich;
pub mod failover;
pub mod quality;

use crate::types::{Provider, RawHit};

/// One raw hit plus the provenance the pipeline needs downstream: which
/// provider produced it, under which category query, at which position
/// within that query's batch.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub provider: Provider,
    pub category_tag: &'static str,
    pub ordinal: usize,
    pub hit: RawHit,
}
