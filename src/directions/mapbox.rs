//! Mapbox Directions v5 client.

use async_trait::async_trait;
use reqwest::Client;
use trailnav_core::Waypoint;
use url::Url;

use super::response::{parse_response, DirectionsResponse};
use super::DirectionsProvider;
use crate::config::DirectionsConfig;
use crate::error::NavigationError;

/// Provider codes that mean "no route between these points" rather than a
/// transport failure.
const NO_ROUTE_CODES: [&str; 2] = ["NoRoute", "NoSegment"];

/// Directions provider backed by the Mapbox HTTP API.
pub struct MapboxDirections {
    client: Client,
    config: DirectionsConfig,
}

impl MapboxDirections {
    /// Create a client with the configured request timeout.
    pub fn new(config: DirectionsConfig) -> Result<Self, NavigationError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| NavigationError::Config(format!("HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    /// Provider configuration.
    pub fn config(&self) -> &DirectionsConfig {
        &self.config
    }
}

/// Build the directions request URL for `waypoints`.
///
/// Coordinates go into the path as `lon,lat` pairs separated by `;`.
pub fn request_url(config: &DirectionsConfig, waypoints: &[Waypoint]) -> Result<Url, NavigationError> {
    let coordinates = waypoints
        .iter()
        .map(|w| format!("{},{}", w.longitude, w.latitude))
        .collect::<Vec<_>>()
        .join(";");

    let mut url = Url::parse(&config.base_url)
        .map_err(|e| NavigationError::Config(format!("invalid base URL {}: {e}", config.base_url)))?;

    url.path_segments_mut()
        .map_err(|_| NavigationError::Config(format!("base URL cannot be a base: {}", config.base_url)))?
        .pop_if_empty()
        .extend(["directions", "v5", "mapbox", config.profile.as_str(), coordinates.as_str()]);

    url.query_pairs_mut()
        .append_pair("steps", "true")
        .append_pair("geometries", "geojson")
        .append_pair("overview", "full")
        .append_pair("access_token", &config.access_token);

    Ok(url)
}

/// Map a non-success HTTP response to a session error.
fn error_from_status(status: u16, body: &str) -> NavigationError {
    let decoded = parse_response(body).ok();
    let code = decoded.as_ref().and_then(|r| r.code.clone());
    if code.as_deref().is_some_and(|c| NO_ROUTE_CODES.contains(&c)) {
        return NavigationError::NoRouteFound;
    }
    let message = decoded
        .and_then(|r| r.message)
        .unwrap_or_else(|| "unexpected response".to_string());
    NavigationError::RouteFetchFailed(format!("HTTP {status}: {message}"))
}

#[async_trait]
impl DirectionsProvider for MapboxDirections {
    fn provider_name(&self) -> &str {
        "mapbox"
    }

    async fn route(&self, waypoints: &[Waypoint]) -> Result<DirectionsResponse, NavigationError> {
        let url = request_url(&self.config, waypoints)?;
        crate::log_debug!(
            "Requesting {} directions for {} waypoints",
            self.config.profile,
            waypoints.len()
        );

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(error_from_status(status.as_u16(), &body));
        }

        Ok(parse_response(&body)?)
    }
}
