//! Directions response wire format
//!
//! Mirrors the subset of the Mapbox Directions v5 JSON response that the
//! tracker needs. Unknown fields are ignored; optional bearings default to 0.

use serde::{Deserialize, Serialize};
use trailnav_core::{Route, RouteError, Step, Waypoint};

/// Top-level directions response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectionsResponse {
    /// Status code reported by the provider (`Ok`, `NoRoute`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Human-readable error message, present on failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Candidate routes, best first.
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
}

/// One candidate route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectionsRoute {
    /// Total distance in meters.
    #[serde(default)]
    pub distance: f64,
    /// Total duration in seconds.
    #[serde(default)]
    pub duration: f64,
    /// Full overview geometry (GeoJSON LineString).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<LineGeometry>,
    /// Legs between consecutive waypoints.
    #[serde(default)]
    pub legs: Vec<RouteLeg>,
}

/// GeoJSON LineString geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    /// `[longitude, latitude]` pairs.
    pub coordinates: Vec<[f64; 2]>,
}

impl LineGeometry {
    pub fn line_string(coordinates: Vec<[f64; 2]>) -> Self {
        Self {
            kind: "LineString".to_string(),
            coordinates,
        }
    }
}

/// Route leg between two waypoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    #[serde(default)]
    pub steps: Vec<RouteStep>,
}

/// One maneuver step as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
    pub maneuver: Maneuver,
}

/// Maneuver details of a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Maneuver {
    #[serde(default)]
    pub instruction: String,
    /// `[longitude, latitude]` of the maneuver point.
    pub location: [f64; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearing_before: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearing_after: Option<f64>,
}

impl RouteStep {
    fn to_step(&self) -> Step {
        Step::new(
            self.maneuver.instruction.clone(),
            Waypoint::from_lon_lat(self.maneuver.location),
            self.distance,
        )
        .with_duration(self.duration)
        .with_bearings(
            self.maneuver.bearing_before.unwrap_or(0.0),
            self.maneuver.bearing_after.unwrap_or(0.0),
        )
    }
}

impl DirectionsRoute {
    /// Flatten legs into a single ordered step list.
    pub fn flatten_steps(&self) -> Vec<Step> {
        self.legs
            .iter()
            .flat_map(|leg| leg.steps.iter().map(RouteStep::to_step))
            .collect()
    }

    /// Convert into a validated [`Route`].
    ///
    /// Without an overview geometry the path falls back to the step anchors.
    pub fn into_route(self) -> Result<Route, RouteError> {
        let steps = self.flatten_steps();
        let geometry = match &self.geometry {
            Some(line) if !line.coordinates.is_empty() => line
                .coordinates
                .iter()
                .copied()
                .map(Waypoint::from_lon_lat)
                .collect(),
            _ => steps.iter().map(|s| s.anchor).collect(),
        };
        Route::new(self.distance, self.duration, geometry, steps)
    }
}

/// Decode a response body.
pub fn parse_response(body: &str) -> Result<DirectionsResponse, serde_json::Error> {
    serde_json::from_str(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_LEG_RESPONSE: &str = r#"{
        "code": "Ok",
        "uuid": "ignored",
        "routes": [{
            "distance": 412.5,
            "duration": 297.0,
            "weight": 297.0,
            "geometry": {
                "type": "LineString",
                "coordinates": [[-75.0, 40.0], [-75.0, 40.002], [-74.998, 40.002]]
            },
            "legs": [
                {"steps": [
                    {"distance": 222.4, "duration": 160.0,
                     "maneuver": {"instruction": "Head north", "location": [-75.0, 40.0],
                                  "bearing_before": 0, "bearing_after": 0, "type": "depart"}},
                    {"distance": 0.0, "duration": 0.0,
                     "maneuver": {"instruction": "You have arrived at your 1st destination",
                                  "location": [-75.0, 40.002], "bearing_before": 0, "bearing_after": 0}}
                ]},
                {"steps": [
                    {"distance": 190.1, "duration": 137.0,
                     "maneuver": {"instruction": "Head east", "location": [-75.0, 40.002],
                                  "bearing_after": 90}},
                    {"distance": 0.0, "duration": 0.0,
                     "maneuver": {"instruction": "You have arrived", "location": [-74.998, 40.002]}}
                ]}
            ]
        }]
    }"#;

    #[test]
    fn parses_and_flattens_legs() {
        let response = parse_response(TWO_LEG_RESPONSE).unwrap();
        assert_eq!(response.code.as_deref(), Some("Ok"));
        assert_eq!(response.routes.len(), 1);

        let steps = response.routes[0].flatten_steps();
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[0].instruction, "Head north");
        assert_eq!(steps[2].anchor, Waypoint::new(40.002, -75.0));
        assert!((steps[2].bearing_after - 90.0).abs() < 1e-9);
        assert_eq!(steps[2].bearing_before, 0.0);
        assert_eq!(steps[3].bearing_after, 0.0);
        assert!((steps[0].distance_m - 222.4).abs() < 1e-9);
        assert!((steps[0].duration_s - 160.0).abs() < 1e-9);
    }

    #[test]
    fn into_route_keeps_geometry_and_totals() {
        let response = parse_response(TWO_LEG_RESPONSE).unwrap();
        let route = response.routes.into_iter().next().unwrap().into_route().unwrap();
        assert_eq!(route.geometry().len(), 3);
        assert_eq!(route.geometry()[1], Waypoint::new(40.002, -75.0));
        assert!((route.distance_m() - 412.5).abs() < 1e-9);
        assert!((route.duration_s() - 297.0).abs() < 1e-9);
    }

    #[test]
    fn missing_geometry_falls_back_to_anchors() {
        let route = DirectionsRoute {
            distance: 10.0,
            duration: 8.0,
            geometry: None,
            legs: vec![RouteLeg {
                steps: vec![RouteStep {
                    distance: 10.0,
                    duration: 8.0,
                    maneuver: Maneuver {
                        instruction: "Arrive".into(),
                        location: [-75.001, 40.001],
                        bearing_before: None,
                        bearing_after: None,
                    },
                }],
            }],
        };
        let route = route.into_route().unwrap();
        assert_eq!(route.geometry(), &[Waypoint::new(40.001, -75.001)]);
    }

    #[test]
    fn route_without_steps_is_rejected() {
        let route = DirectionsRoute {
            distance: 0.0,
            duration: 0.0,
            geometry: Some(LineGeometry::line_string(vec![[-75.0, 40.0]])),
            legs: vec![RouteLeg::default()],
        };
        assert_eq!(route.into_route(), Err(RouteError::NoSteps));
    }

    #[test]
    fn no_route_response() {
        let response = parse_response(r#"{"code":"NoRoute","message":"No route found","routes":[]}"#)
            .unwrap();
        assert!(response.routes.is_empty());
        assert_eq!(response.message.as_deref(), Some("No route found"));
    }
}
