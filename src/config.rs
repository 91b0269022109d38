//! Discovery configuration with sensible defaults.
//!
//! [`DiscoveryConfig`] controls the provider failover order, search radius
//! and result limit, timeouts, retry behaviour, and the dedup tolerance.
//! The defaults are tuned for a responsive "what's near me" request.

use crate::error::DiscoveryError;
use crate::types::Provider;

/// Configuration for a discovery request.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Providers in failover order. The first is tried first; later ones
    /// only run when an earlier provider errors or answers empty.
    pub providers: Vec<Provider>,
    /// Search radius around the query origin, in kilometres.
    pub radius_km: f64,
    /// Maximum number of facilities to return after dedup and ranking.
    pub limit: usize,
    /// Share of `limit` reserved for the hospital category query; the
    /// remainder goes to the clinic/doctor query.
    pub hospital_share: f64,
    /// Per-request HTTP timeout in seconds, applied to every provider call.
    pub timeout_seconds: u64,
    /// Maximum concurrent detail-enrichment calls.
    pub detail_concurrency: usize,
    /// Attempts per provider before the chain moves on.
    pub max_attempts: u32,
    /// Base backoff between same-provider retries, in milliseconds.
    /// Doubles on each retry.
    pub retry_backoff_ms: u64,
    /// Coordinate decimal places for the dedup cluster key. 4 decimals is
    /// roughly an 11 m tolerance; raise it to tighten clustering in dense
    /// areas.
    pub cluster_decimals: u32,
    /// Places-dialect provider settings.
    pub places: PlacesConfig,
    /// Overpass-dialect provider settings.
    pub overpass: OverpassConfig,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            providers: Provider::all().to_vec(),
            radius_km: 10.0,
            limit: 20,
            hospital_share: 0.6,
            timeout_seconds: 12,
            detail_concurrency: 5,
            max_attempts: 2,
            retry_backoff_ms: 500,
            cluster_decimals: 4,
            places: PlacesConfig::default(),
            overpass: OverpassConfig::default(),
        }
    }
}

impl DiscoveryConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `limit` must be greater than 0
    /// - `radius_km` must be finite and greater than 0
    /// - `hospital_share` must be within (0, 1]
    /// - `timeout_seconds` must be greater than 0
    /// - `detail_concurrency` must be greater than 0
    /// - `max_attempts` must be greater than 0
    /// - `cluster_decimals` must be at most 6
    /// - `providers` must not be empty
    /// - provider base URLs must not be empty
    pub fn validate(&self) -> Result<(), DiscoveryError> {
        if self.limit == 0 {
            return Err(DiscoveryError::Config("limit must be greater than 0".into()));
        }
        if !(self.radius_km.is_finite() && self.radius_km > 0.0) {
            return Err(DiscoveryError::Config(
                "radius_km must be finite and greater than 0".into(),
            ));
        }
        if !(self.hospital_share > 0.0 && self.hospital_share <= 1.0) {
            return Err(DiscoveryError::Config(
                "hospital_share must be within (0, 1]".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(DiscoveryError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.detail_concurrency == 0 {
            return Err(DiscoveryError::Config(
                "detail_concurrency must be greater than 0".into(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(DiscoveryError::Config(
                "max_attempts must be greater than 0".into(),
            ));
        }
        if self.cluster_decimals > 6 {
            return Err(DiscoveryError::Config(
                "cluster_decimals must be at most 6".into(),
            ));
        }
        if self.providers.is_empty() {
            return Err(DiscoveryError::Config(
                "at least one provider must be enabled".into(),
            ));
        }
        if self.places.base_url.is_empty() {
            return Err(DiscoveryError::Config(
                "places base_url must not be empty".into(),
            ));
        }
        if self.overpass.base_url.is_empty() {
            return Err(DiscoveryError::Config(
                "overpass base_url must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Settings for the Places-dialect provider.
#[derive(Debug, Clone)]
pub struct PlacesConfig {
    /// Base URL up to (not including) the `/nearbysearch/json` style
    /// endpoint suffixes. Overridable for mock servers and proxies.
    pub base_url: String,
    /// API key sent with every request when present. Without a key most
    /// deployments answer with an error envelope and the chain falls
    /// through to the next provider.
    pub api_key: Option<String>,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            base_url: "https://maps.googleapis.com/maps/api/place".into(),
            api_key: None,
        }
    }
}

impl PlacesConfig {
    /// Override the base URL (mock servers, self-hosted proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Settings for the Overpass-dialect provider.
#[derive(Debug, Clone)]
pub struct OverpassConfig {
    /// Full interpreter endpoint URL. Overridable for mock servers and
    /// self-hosted mirrors.
    pub base_url: String,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            base_url: "https://overpass-api.de/api/interpreter".into(),
        }
    }
}

impl OverpassConfig {
    /// Override the interpreter URL (mock servers, self-hosted mirrors).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = DiscoveryConfig::default();
        assert_eq!(config.limit, 20);
        assert!((config.radius_km - 10.0).abs() < f64::EPSILON);
        assert!((config.hospital_share - 0.6).abs() < f64::EPSILON);
        assert_eq!(config.timeout_seconds, 12);
        assert_eq!(config.detail_concurrency, 5);
        assert_eq!(config.max_attempts, 2);
        assert_eq!(config.retry_backoff_ms, 500);
        assert_eq!(config.cluster_decimals, 4);
    }

    #[test]
    fn default_provider_order_is_places_then_overpass() {
        let config = DiscoveryConfig::default();
        assert_eq!(config.providers, vec![Provider::Places, Provider::Overpass]);
    }

    #[test]
    fn valid_config_passes_validation() {
        let config = DiscoveryConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_limit_rejected() {
        let config = DiscoveryConfig {
            limit: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("limit"));
    }

    #[test]
    fn non_positive_radius_rejected() {
        for radius_km in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = DiscoveryConfig {
                radius_km,
                ..Default::default()
            };
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("radius_km"));
        }
    }

    #[test]
    fn hospital_share_out_of_range_rejected() {
        for hospital_share in [0.0, -0.2, 1.5, f64::NAN] {
            let config = DiscoveryConfig {
                hospital_share,
                ..Default::default()
            };
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("hospital_share"));
        }
    }

    #[test]
    fn full_hospital_share_valid() {
        let config = DiscoveryConfig {
            hospital_share: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = DiscoveryConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn zero_detail_concurrency_rejected() {
        let config = DiscoveryConfig {
            detail_concurrency: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("detail_concurrency"));
    }

    #[test]
    fn zero_max_attempts_rejected() {
        let config = DiscoveryConfig {
            max_attempts: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_attempts"));
    }

    #[test]
    fn oversized_cluster_decimals_rejected() {
        let config = DiscoveryConfig {
            cluster_decimals: 7,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cluster_decimals"));
    }

    #[test]
    fn empty_providers_rejected() {
        let config = DiscoveryConfig {
            providers: vec![],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("provider"));
    }

    #[test]
    fn empty_base_url_rejected() {
        let config = DiscoveryConfig {
            places: PlacesConfig {
                base_url: String::new(),
                api_key: None,
            },
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn single_provider_valid() {
        let config = DiscoveryConfig {
            providers: vec![Provider::Overpass],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn base_url_override() {
        let places = PlacesConfig::default().with_base_url("http://127.0.0.1:9000");
        assert_eq!(places.base_url, "http://127.0.0.1:9000");
        let overpass = OverpassConfig::default().with_base_url("http://127.0.0.1:9001");
        assert_eq!(overpass.base_url, "http://127.0.0.1:9001");
    }
}
