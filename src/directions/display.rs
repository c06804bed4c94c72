//! Map display artifacts
//!
//! GeoJSON layers derived from a prepared route: the full path line and one
//! bearing-tagged point per step anchor for drawing maneuver arrows.

use serde_json::{json, Value};
use trailnav_core::format::{format_duration, format_route_distance};
use trailnav_core::Route;

/// GeoJSON layers for the map renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDisplay {
    /// FeatureCollection with a single LineString feature.
    pub route_line: Value,
    /// FeatureCollection with one Point feature per step.
    pub step_arrows: Value,
}

impl RouteDisplay {
    pub fn from_route(route: &Route) -> Self {
        Self {
            route_line: route_line(route),
            step_arrows: step_arrows(route),
        }
    }
}

/// Bottom-bar summary strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSummary {
    /// e.g. `"4 mins 57s"`
    pub duration: String,
    /// e.g. `"0.4 km"`
    pub distance: String,
}

impl RouteSummary {
    pub fn from_route(route: &Route) -> Self {
        Self {
            duration: format_duration(route.duration_s()),
            distance: format_route_distance(route.distance_m()),
        }
    }
}

/// Full path as a GeoJSON FeatureCollection.
pub fn route_line(route: &Route) -> Value {
    let coordinates: Vec<[f64; 2]> = route.geometry().iter().map(|w| w.to_lon_lat()).collect();
    json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": {
                "type": "LineString",
                "coordinates": coordinates,
            },
            "properties": {},
        }],
    })
}

/// Step anchors as GeoJSON points tagged with outgoing bearing.
pub fn step_arrows(route: &Route) -> Value {
    let features: Vec<Value> = route
        .arrow_markers()
        .map(|marker| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": marker.position.to_lon_lat(),
                },
                "properties": {
                    "bearing": marker.bearing,
                    "instruction": marker.instruction,
                },
            })
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}
