//! Route preparation
//!
//! Turns an ordered list of waypoints into a [`PreparedRoute`]: the flat
//! step list the tracker consumes plus the GeoJSON layers the map draws.
//! The directions backend sits behind [`DirectionsProvider`] so sessions can
//! run against Mapbox, a canned response or a simulator.

pub mod display;
pub mod mapbox;
pub mod response;

use async_trait::async_trait;
use trailnav_core::route::validate_waypoints;
use trailnav_core::{Route, Waypoint};

use crate::error::NavigationError;

pub use display::{RouteDisplay, RouteSummary};
pub use mapbox::MapboxDirections;
pub use response::{DirectionsResponse, DirectionsRoute, LineGeometry, Maneuver, RouteLeg, RouteStep};

/// Directions backend.
///
/// Implementations perform exactly one request per call and never retry.
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    /// Short name used in log output.
    fn provider_name(&self) -> &str;

    /// Request walking directions through `waypoints` in order.
    async fn route(&self, waypoints: &[Waypoint]) -> Result<DirectionsResponse, NavigationError>;
}

/// A route ready for tracking and display.
#[derive(Debug, Clone)]
pub struct PreparedRoute {
    pub route: Route,
    pub display: RouteDisplay,
}

impl PreparedRoute {
    pub fn from_route(route: Route) -> Self {
        let display = RouteDisplay::from_route(&route);
        Self { route, display }
    }

    /// Total duration and distance strings.
    pub fn summary(&self) -> RouteSummary {
        RouteSummary::from_route(&self.route)
    }
}

/// Fetch directions and build a [`PreparedRoute`].
///
/// Uses the first route of the response. Fails with
/// [`NavigationError::InvalidWaypoints`] before any request when fewer than
/// two waypoints are given.
pub async fn prepare_route<P>(provider: &P, waypoints: &[Waypoint]) -> Result<PreparedRoute, NavigationError>
where
    P: DirectionsProvider + ?Sized,
{
    validate_waypoints(waypoints)?;

    let response = provider.route(waypoints).await.map_err(|e| {
        crate::log_error!("{} directions request failed: {}", provider.provider_name(), e);
        e
    })?;

    let Some(best) = response.routes.into_iter().next() else {
        crate::log_warn!("{} returned no routes", provider.provider_name());
        return Err(NavigationError::NoRouteFound);
    };

    let route = best.into_route()?;
    crate::log_info!(
        "Route prepared: {} steps, {:.0} m, {:.0} s",
        route.step_count(),
        route.distance_m(),
        route.duration_s()
    );
    Ok(PreparedRoute::from_route(route))
}
