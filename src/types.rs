//! Core types for facility discovery: the output model, provider and
//! category identification, and the provider-shaped intermediates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder for a missing street address. Output string fields are never
/// empty; absent data carries one of these sentinels instead.
pub const ADDRESS_UNAVAILABLE: &str = "Address not available";
/// Placeholder for a missing phone number.
pub const PHONE_UNAVAILABLE: &str = "Phone not available";
/// Placeholder when a provider reports no opening hours.
pub const HOURS_UNAVAILABLE: &str = "Hours not available";
/// Opening status when the provider reports the place currently open.
pub const OPEN_NOW: &str = "Open Now";
/// Opening status when the provider reports the place currently closed.
pub const CLOSED: &str = "Closed";

/// Category tag for the hospital share of a discovery request.
pub const QUERY_HOSPITAL: &str = "hospital";
/// Category tag for the clinic/doctor share of a discovery request.
pub const QUERY_DOCTOR: &str = "doctor";
/// Category tag used for free-text searches.
pub const QUERY_TEXT: &str = "search";

/// A single medical facility in the reconciled output list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facility {
    /// Unique within one response. Derived deterministically from the
    /// producing provider, its native place id (or `synthetic`), the
    /// category tag, and the hit's ordinal, never from the wall clock.
    pub id: String,
    /// Facility name as reported by the provider.
    pub name: String,
    /// Engine-assigned category, never a raw provider tag.
    pub category: Category,
    /// WGS84 latitude in decimal degrees.
    pub latitude: f64,
    /// WGS84 longitude in decimal degrees.
    pub longitude: f64,
    /// Street address, or [`ADDRESS_UNAVAILABLE`].
    pub address: String,
    /// Contact number, or [`PHONE_UNAVAILABLE`].
    pub phone: String,
    /// Great-circle distance from the query origin, rounded to 2 decimals.
    pub distance_km: f64,
    /// Provider rating, `0.0` when the provider has none. Never negative.
    pub rating: f64,
    /// Facility website, if any provider reported one.
    pub website: Option<String>,
    /// Human-readable opening summary: [`OPEN_NOW`], [`CLOSED`], or
    /// [`HOURS_UNAVAILABLE`].
    pub opening_status: String,
    /// Display specialties derived from provider tags. May be empty.
    pub specialties: Vec<String>,
    /// Whether the facility is emergency-capable per the tag heuristics.
    pub emergency: bool,
}

/// Facility categories the engine assigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Full hospitals, including emergency-capable ones.
    Hospital,
    /// Clinics and doctor practices.
    Clinic,
    /// Anything medical that matches neither specific category.
    Medical,
}

impl Category {
    /// Returns the lowercase name of this category.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hospital => "hospital",
            Self::Clinic => "clinic",
            Self::Medical => "medical",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Directory providers the engine can query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Places-dialect JSON API. Richest data; needs an API key. Primary.
    Places,
    /// Overpass-dialect OSM mirror. Keyless community data. Fallback.
    Overpass,
}

impl Provider {
    /// Returns the lowercase name of this provider, also used as the id
    /// namespace prefix.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Places => "places",
            Self::Overpass => "overpass",
        }
    }

    /// All providers in default failover order.
    pub fn all() -> &'static [Provider] {
        &[Self::Places, Self::Overpass]
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One validated hit from a provider payload, before normalization.
///
/// Parse steps guarantee `name` and coordinates; everything else stays
/// optional until the orchestrator applies placeholders.
#[derive(Debug, Clone)]
pub struct RawHit {
    /// Provider-native place id, when the dialect has one.
    pub provider_id: Option<String>,
    pub name: String,
    /// Normalized tag vocabulary: provider types, amenity values,
    /// `emergency`, healthcare/speciality markers.
    pub tags: Vec<String>,
    pub lat: f64,
    pub lon: f64,
    pub address: Option<String>,
    pub rating: Option<f64>,
    pub phone: Option<String>,
    pub website: Option<String>,
    /// Whether the provider reports the place open right now.
    pub open_now: Option<bool>,
}

/// Best-effort enrichment fields from a provider's detail lookup.
#[derive(Debug, Clone, Default)]
pub struct PlaceDetails {
    pub phone: Option<String>,
    pub website: Option<String>,
    pub open_now: Option<bool>,
}

/// Build the deterministic facility id for a hit.
///
/// `{provider}_{native-id}_{category-tag}_{ordinal}`, with `synthetic` in
/// place of a missing native id. Ordinals are per category batch, so ids
/// stay unique across providers, categories, and repeat hits.
pub fn facility_id(
    provider: Provider,
    native_id: Option<&str>,
    category_tag: &str,
    ordinal: usize,
) -> String {
    match native_id {
        Some(native) => format!("{}_{native}_{category_tag}_{ordinal}", provider.name()),
        None => format!("{}_synthetic_{category_tag}_{ordinal}", provider.name()),
    }
}
