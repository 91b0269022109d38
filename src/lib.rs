//! # medlocate
//!
//! Nearby medical facility discovery across unreliable directory providers.
//!
//! This crate answers "what hospitals and clinics are near me" by querying
//! public place directories, reconciling their differently-shaped answers
//! into one record type, and ranking the merged set by distance. It is a
//! library with no state of its own; every call stands alone.
//!
//! ## Design
//!
//! - Splits the result limit into a hospital query and a clinic/doctor
//!   query and runs both concurrently
//! - Walks a provider failover chain per query: a Places-dialect API first,
//!   an Overpass-dialect API second, with retries and backoff in between
//! - Enriches hits that lack a phone number through bounded-concurrency
//!   detail lookups
//! - Deduplicates facilities reported by coordinate proximity, keeping the
//!   record with more usable contact data
//! - Falls back to fixed seed facilities rather than returning nothing
//!
//! ## Reliability
//!
//! - Provider failures never surface to callers of nearby discovery; the
//!   pipeline degrades through the chain and ends at the seed entries
//! - Missing fields come back as fixed placeholder strings, never as
//!   empty strings
//! - Facility ids are deterministic for a given provider answer, so
//!   repeated queries over stable data produce stable ids

pub mod category;
pub mod config;
pub mod error;
pub mod geo;
pub mod http;
pub mod orchestrator;
pub mod provider;
pub mod providers;
pub mod seed;
pub mod types;

pub use config::{DiscoveryConfig, OverpassConfig, PlacesConfig};
pub use error::{DiscoveryError, Result};
pub use provider::ProviderClient;
pub use types::{Category, Facility, Provider};

/// Find medical facilities around a coordinate.
///
/// Runs the hospital and clinic/doctor category queries concurrently
/// across the configured provider chain, merges and deduplicates the
/// answers, and returns up to `config.limit` facilities sorted by
/// ascending distance from the origin.
///
/// # Errors
///
/// Returns [`DiscoveryError::Config`] if the configuration fails
/// validation. Provider failures are handled inside the pipeline: when
/// every provider errors or answers empty, the seed facilities are
/// returned instead of an error.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> medlocate::Result<()> {
/// let config = medlocate::DiscoveryConfig::default();
/// let facilities = medlocate::discover_nearby(19.0760, 72.8777, &config).await?;
/// for facility in &facilities {
///     println!("{} ({:.2} km)", facility.name, facility.distance_km);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn discover_nearby(
    lat: f64,
    lon: f64,
    config: &DiscoveryConfig,
) -> Result<Vec<Facility>> {
    orchestrator::discover::discover(lat, lon, config).await
}

/// Find medical facilities around a coordinate with default configuration.
///
/// Convenience wrapper around [`discover_nearby`] using
/// [`DiscoveryConfig::default()`].
///
/// # Errors
///
/// Same as [`discover_nearby`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> medlocate::Result<()> {
/// let facilities = medlocate::discover_nearby_default(19.0760, 72.8777).await?;
/// for facility in &facilities {
///     println!("{}", facility.name);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn discover_nearby_default(lat: f64, lon: f64) -> Result<Vec<Facility>> {
    discover_nearby(lat, lon, &DiscoveryConfig::default()).await
}

/// Find medical facilities matching a free-text query near a coordinate.
///
/// Walks the same provider chain as [`discover_nearby`] but with the
/// caller's query instead of category terms, skips proximity
/// deduplication, and returns up to `config.limit` facilities sorted by
/// ascending distance. A blank query returns an empty list.
///
/// # Errors
///
/// Returns [`DiscoveryError::Config`] if the configuration fails
/// validation. When every provider fails the result degrades to an empty
/// list rather than an error.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> medlocate::Result<()> {
/// let config = medlocate::DiscoveryConfig::default();
/// let facilities =
///     medlocate::search_by_text("cardiology", 19.0760, 72.8777, &config).await?;
/// for facility in &facilities {
///     println!("{}: {:?}", facility.name, facility.specialties);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_by_text(
    query: &str,
    lat: f64,
    lon: f64,
    config: &DiscoveryConfig,
) -> Result<Vec<Facility>> {
    orchestrator::discover::search_text(query, lat, lon, config).await
}
