//! Great-circle distance math for ranking facilities by proximity.
//!
//! Uses the haversine formula on a spherical Earth (R = 6371 km), which is
//! exact to well under 0.5% at the sub-50 km ranges this crate queries.
//! Output distances are rounded to 2 decimal places (~10 m) before they
//! reach callers.

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two WGS84 points, in kilometres.
///
/// # Formula
///
/// ```text
/// a = sin²(Δlat/2) + cos(lat1) · cos(lat2) · sin²(Δlon/2)
/// d = 2R · asin(√a)
/// ```
///
/// Inputs are decimal degrees. The result is unrounded; apply [`round_km`]
/// at the output boundary.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

/// Round a distance to 2 decimal places for the output contract.
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_points_are_zero_distance() {
        let d = haversine_km(19.0760, 72.8777, 19.0760, 72.8777);
        assert!(d.abs() < f64::EPSILON);
    }

    #[test]
    fn distance_is_symmetric() {
        let ab = haversine_km(19.0760, 72.8777, 18.5204, 73.8567);
        let ba = haversine_km(18.5204, 73.8567, 19.0760, 72.8777);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude_at_equator() {
        // 2πR / 360 = 111.1949… km
        let d = haversine_km(0.0, 0.0, 1.0, 0.0);
        assert!((d - 111.1949).abs() < 0.001);
    }

    #[test]
    fn one_degree_of_longitude_at_equator() {
        let d = haversine_km(0.0, 0.0, 0.0, 1.0);
        assert!((d - 111.1949).abs() < 0.001);
    }

    #[test]
    fn known_city_pair_mumbai_to_pune() {
        // ≈ 120 km great-circle
        let d = haversine_km(19.0760, 72.8777, 18.5204, 73.8567);
        assert!(d > 118.0 && d < 123.0, "got {d}");
    }

    #[test]
    fn small_offset_scale_is_roughly_a_kilometre() {
        // +0.01°/+0.01° near Mumbai is ~1.5 km, not metres and not tens of km
        let d = haversine_km(19.0760, 72.8777, 19.0860, 72.8877);
        assert!(d > 1.4 && d < 1.7, "got {d}");
    }

    #[test]
    fn rounding_keeps_two_decimals() {
        assert_eq!(round_km(1.234), 1.23);
        assert_eq!(round_km(1.236), 1.24);
        assert_eq!(round_km(3.0), 3.0);
        assert_eq!(round_km(0.0), 0.0);
    }
}
