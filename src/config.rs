//! Directions provider configuration
//!
//! Connection settings for the hosted directions API, and loading of the
//! tracker and camera tunables ([`NavigationParams`]) through the named
//! parameter store.

use std::env;
use std::time::Duration;

use trailnav_core::parameters::{NavigationParams, ParameterStore};

use crate::error::NavigationError;

/// Environment variable holding the directions API access token.
pub const ACCESS_TOKEN_ENV: &str = "MAPBOX_ACCESS_TOKEN";
/// Environment variable overriding the directions API base URL.
pub const BASE_URL_ENV: &str = "MAPBOX_API_URL";
/// Default directions API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";
/// Default routing profile.
pub const DEFAULT_PROFILE: &str = "walking";

/// Configuration for a hosted directions provider.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsConfig {
    /// API base URL, without trailing slash.
    pub base_url: String,
    /// API access token.
    pub access_token: String,
    /// Routing profile (e.g. `walking`).
    pub profile: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl DirectionsConfig {
    /// Create a configuration with default URL, profile and timeout.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: access_token.into(),
            profile: DEFAULT_PROFILE.to_string(),
            request_timeout: Duration::from_secs(15),
        }
    }

    /// Load from `MAPBOX_ACCESS_TOKEN` / `MAPBOX_API_URL`.
    pub fn from_env() -> Result<Self, NavigationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using an arbitrary key lookup (environment, config file, tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, NavigationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(ACCESS_TOKEN_ENV)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| NavigationError::Config(format!("{ACCESS_TOKEN_ENV} is not set")))?;

        let mut config = Self::new(token.trim());
        if let Some(url) = lookup(BASE_URL_ENV).filter(|u| !u.trim().is_empty()) {
            config.base_url = url.trim().trim_end_matches('/').to_string();
        }
        Ok(config)
    }

    /// Override the routing profile.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Split a `NAME=VALUE` parameter override.
pub fn parse_param_override(text: &str) -> Result<(&str, &str), NavigationError> {
    match text.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value.trim())),
        _ => Err(NavigationError::Config(format!(
            "expected NAME=VALUE, got '{text}'"
        ))),
    }
}

/// Build navigation parameters from the registered defaults plus `overrides`.
///
/// Each override is a parameter name and its text value. Unknown names,
/// unparsable values and read-only parameters are configuration errors;
/// numeric values outside their range are clamped on load.
pub fn load_navigation_params<'a, I>(overrides: I) -> Result<NavigationParams, NavigationError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut store = ParameterStore::new();
    NavigationParams::register_defaults(&mut store)
        .map_err(|e| NavigationError::Config(format!("parameter defaults: {e}")))?;

    for (name, value) in overrides {
        store
            .set_from_str(name, value)
            .map_err(|e| NavigationError::Config(format!("{name}={value}: {e}")))?;
        crate::log_debug!("Parameter {} set to {}", name, value);
    }

    let params = NavigationParams::from_store(&store);
    if !params.is_valid() {
        return Err(NavigationError::Config(
            "navigation parameters out of range".to_string(),
        ));
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_token_is_config_error() {
        let err = DirectionsConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, NavigationError::Config(_)));

        let err = DirectionsConfig::from_lookup(lookup(&[(ACCESS_TOKEN_ENV, "  ")])).unwrap_err();
        assert!(matches!(err, NavigationError::Config(_)));
    }

    #[test]
    fn defaults_applied() {
        let config = DirectionsConfig::from_lookup(lookup(&[(ACCESS_TOKEN_ENV, "pk.abc")])).unwrap();
        assert_eq!(config.access_token, "pk.abc");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.profile, "walking");
        assert_eq!(config.request_timeout, Duration::from_secs(15));
    }

    #[test]
    fn base_url_override_strips_trailing_slash() {
        let config = DirectionsConfig::from_lookup(lookup(&[
            (ACCESS_TOKEN_ENV, "pk.abc"),
            (BASE_URL_ENV, "http://localhost:8080/"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn builder_overrides() {
        let config = DirectionsConfig::new("t")
            .with_profile("cycling")
            .with_timeout(Duration::from_secs(3));
        assert_eq!(config.profile, "cycling");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn no_overrides_gives_defaults() {
        let params = load_navigation_params([]).unwrap();
        assert_eq!(params, NavigationParams::default());
    }

    #[test]
    fn overrides_flow_through_store() {
        let params =
            load_navigation_params([("NAV_ARRIVE_RAD", "15"), ("CAM_ANIM_MS", "250")]).unwrap();
        assert!((params.arrival_radius_m - 15.0).abs() < 1e-6);
        assert_eq!(params.camera_animation_ms, 250);
        assert_eq!(params.fix_min_interval_ms, 2000);
    }

    #[test]
    fn out_of_range_override_is_clamped() {
        let params = load_navigation_params([("CAM_PITCH", "170")]).unwrap();
        assert!(params.is_valid());
        assert!(params.camera_pitch_deg < 170.0);
    }

    #[test]
    fn bad_overrides_are_config_errors() {
        for pair in [
            ("NAV_ARRIVE_RAD", "far"),
            ("NOT_A_PARAM", "1"),
            ("NAV_PROFILE", "cycling"),
        ] {
            let err = load_navigation_params([pair]).unwrap_err();
            assert!(matches!(err, NavigationError::Config(_)), "{pair:?}: {err:?}");
        }
    }

    #[test]
    fn override_text_is_split_on_first_equals() {
        assert_eq!(
            parse_param_override("NAV_ARRIVE_RAD=12").unwrap(),
            ("NAV_ARRIVE_RAD", "12")
        );
        assert_eq!(parse_param_override(" A = b=c ").unwrap(), ("A", "b=c"));
        assert!(parse_param_override("NAV_ARRIVE_RAD").is_err());
        assert!(parse_param_override("=5").is_err());
    }
}
