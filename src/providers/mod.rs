//! Directory provider implementations.
//!
//! Each module provides a struct implementing
//! [`crate::provider::ProviderClient`] that speaks one provider's wire
//! dialect and emits validated hits.

pub mod overpass;
pub mod places;

pub use overpass::OverpassClient;
pub use places::PlacesClient;
