//! Prepared Route Types
//!
//! Pure data types for a route returned by a directions provider:
//!
//! - `Step`: one maneuver with its anchor point and precomputed distance
//! - `Route`: the flattened step list plus overview geometry and totals
//! - `ArrowMarker`: per-step display marker oriented by outgoing bearing
//!
//! Decoding provider responses and building map layers happens in the
//! application crate; this module only holds the validated model.

pub mod maneuver;

use alloc::string::String;
use alloc::vec::Vec;

use crate::geo::Waypoint;

pub use maneuver::{classify_turn, Turn};

/// Errors from route construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteError {
    /// Fewer than two waypoints were supplied (count attached)
    TooFewWaypoints(usize),
    /// The provider produced a route without any maneuver steps
    NoSteps,
}

impl core::fmt::Display for RouteError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RouteError::TooFewWaypoints(n) => {
                write!(f, "at least 2 waypoints required, got {n}")
            }
            RouteError::NoSteps => write!(f, "route contains no steps"),
        }
    }
}

/// Validate caller-supplied routing input
///
/// Routing needs an origin and a destination at minimum.
pub fn validate_waypoints(waypoints: &[Waypoint]) -> Result<(), RouteError> {
    if waypoints.len() < 2 {
        return Err(RouteError::TooFewWaypoints(waypoints.len()));
    }
    Ok(())
}

/// One maneuver in a route
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    /// Human-readable maneuver instruction
    pub instruction: String,
    /// Where the maneuver happens
    pub anchor: Waypoint,
    /// Distance from this maneuver to the next one (meters)
    pub distance_m: f64,
    /// Estimated travel time for this step (seconds)
    pub duration_s: f64,
    /// Heading when approaching the maneuver (degrees)
    pub bearing_before: f64,
    /// Heading when leaving the maneuver (degrees)
    pub bearing_after: f64,
}

impl Step {
    /// Create a step with zero duration and bearings
    pub fn new(instruction: impl Into<String>, anchor: Waypoint, distance_m: f64) -> Self {
        Self {
            instruction: instruction.into(),
            anchor,
            distance_m,
            duration_s: 0.0,
            bearing_before: 0.0,
            bearing_after: 0.0,
        }
    }

    /// Set the duration estimate
    pub fn with_duration(mut self, duration_s: f64) -> Self {
        self.duration_s = duration_s;
        self
    }

    /// Set incoming and outgoing bearings
    pub fn with_bearings(mut self, bearing_before: f64, bearing_after: f64) -> Self {
        self.bearing_before = bearing_before;
        self.bearing_after = bearing_after;
        self
    }
}

/// Display marker for one step anchor
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowMarker<'a> {
    /// Marker position (the step anchor)
    pub position: Waypoint,
    /// Arrow rotation in degrees (the step's outgoing bearing)
    pub bearing: f64,
    /// Instruction shown with the marker
    pub instruction: &'a str,
}

/// Route prepared for turn-by-turn tracking
///
/// Always holds at least one step.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    distance_m: f64,
    duration_s: f64,
    geometry: Vec<Waypoint>,
    steps: Vec<Step>,
}

impl Route {
    /// Create a route, rejecting an empty step list
    pub fn new(
        distance_m: f64,
        duration_s: f64,
        geometry: Vec<Waypoint>,
        steps: Vec<Step>,
    ) -> Result<Self, RouteError> {
        if steps.is_empty() {
            return Err(RouteError::NoSteps);
        }
        Ok(Self {
            distance_m,
            duration_s,
            geometry,
            steps,
        })
    }

    /// Total route distance in meters
    pub fn distance_m(&self) -> f64 {
        self.distance_m
    }

    /// Total route duration estimate in seconds
    pub fn duration_s(&self) -> f64 {
        self.duration_s
    }

    /// Full path geometry, in travel order
    pub fn geometry(&self) -> &[Waypoint] {
        &self.geometry
    }

    /// Maneuver steps, in travel order
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps (never zero)
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// One arrow marker per step anchor
    pub fn arrow_markers(&self) -> impl Iterator<Item = ArrowMarker<'_>> {
        self.steps.iter().map(|step| ArrowMarker {
            position: step.anchor,
            bearing: step.bearing_after,
            instruction: step.instruction.as_str(),
        })
    }

    /// Maneuver category for the step at `index`
    ///
    /// The last step is always `Arrive` and the first `Depart`; everything in
    /// between is classified from its bearing change.
    pub fn turn_at(&self, index: usize) -> Option<Turn> {
        let step = self.steps.get(index)?;
        if index == self.steps.len() - 1 {
            Some(Turn::Arrive)
        } else if index == 0 {
            Some(Turn::Depart)
        } else {
            Some(classify_turn(step.bearing_before, step.bearing_after))
        }
    }

    /// Consume the route, returning its steps
    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}
