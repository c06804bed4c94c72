//! Turn-by-turn Progress Tracker
//!
//! Platform-agnostic state machine that turns a stream of device position
//! fixes into step progress for a prepared route:
//!
//! - Remaining distance to the active step anchor (Haversine, recomputed)
//! - Step advancement inside the arrival radius
//! - Route completion on the final step
//!
//! The tracker does not know about HTTP, GPS hardware or the map camera.
//! Camera follow behaviour lives in [`crate::camera`] and only reads the
//! [`TrackerState`] snapshot.

mod filter;

use alloc::vec::Vec;

use crate::geo::{haversine_distance, normalize_heading, Waypoint};
use crate::route::{RouteError, Step};

pub use filter::FixFilter;

/// Maximum tracker events emitted per fix.
pub const MAX_TRACKER_EVENTS: usize = 2;

/// Default arrival radius around a step anchor (meters)
pub const DEFAULT_ARRIVAL_RADIUS_M: f64 = 10.0;

/// One reported device position sample
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fix {
    /// Reported position
    pub position: Waypoint,
    /// Reported heading in degrees (None when the device cannot tell)
    pub heading: Option<f64>,
    /// Provider timestamp in milliseconds
    pub timestamp_ms: u64,
}

impl Fix {
    /// Create a fix
    pub fn new(position: Waypoint, heading: Option<f64>, timestamp_ms: u64) -> Self {
        Self {
            position,
            heading,
            timestamp_ms,
        }
    }

    /// Create a heading-less fix at time 0
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self::new(Waypoint::new(latitude, longitude), None, 0)
    }

    /// Heading to record for this fix
    ///
    /// Missing, negative or non-finite headings collapse to 0 (north).
    pub fn effective_heading(&self) -> f64 {
        match self.heading {
            Some(h) if h.is_finite() && h >= 0.0 => normalize_heading(h),
            _ => 0.0,
        }
    }
}

/// Tracking session status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TrackingStatus {
    /// Consuming fixes
    #[default]
    Active,
    /// Final step reached
    Completed,
    /// Stopped by the caller or by an error
    Ended,
}

/// Events emitted by the tracker while consuming fixes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackerEvent {
    /// The active step moved forward (from index, to index)
    StepAdvanced { from: usize, to: usize },
    /// The walker is within the arrival radius of the final step
    RouteCompleted,
}

/// Tracker state snapshot
///
/// The step index only ever moves forward and always stays a valid index
/// into the step list it was created from.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackerState {
    current_step: usize,
    remaining_distance_m: f64,
    last_position: Option<Waypoint>,
    last_heading: f64,
    centered: bool,
    status: TrackingStatus,
}

impl TrackerState {
    /// Create the initial state for a step list
    ///
    /// Remaining distance starts at the first step's precomputed distance.
    pub fn new(steps: &[Step]) -> Result<Self, RouteError> {
        let first = steps.first().ok_or(RouteError::NoSteps)?;
        Ok(Self {
            current_step: 0,
            remaining_distance_m: first.distance_m.max(0.0),
            last_position: None,
            last_heading: 0.0,
            centered: true,
            status: TrackingStatus::Active,
        })
    }

    /// Index of the active step
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// Distance to the active step anchor in meters
    pub fn remaining_distance_m(&self) -> f64 {
        self.remaining_distance_m
    }

    /// Last recorded device position
    pub fn last_position(&self) -> Option<Waypoint> {
        self.last_position
    }

    /// Last recorded device heading in degrees
    pub fn last_heading(&self) -> f64 {
        self.last_heading
    }

    /// Whether the camera should follow the device
    pub fn is_centered(&self) -> bool {
        self.centered
    }

    /// Set or clear camera follow mode
    pub fn set_centered(&mut self, centered: bool) {
        self.centered = centered;
    }

    /// Current session status
    pub fn status(&self) -> TrackingStatus {
        self.status
    }

    /// Check if fixes are still being consumed
    pub fn is_active(&self) -> bool {
        self.status == TrackingStatus::Active
    }
}

/// Result of applying one fix
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// State after the fix
    pub state: TrackerState,
    /// Events emitted by the fix, in order
    pub events: heapless::Vec<TrackerEvent, MAX_TRACKER_EVENTS>,
}

/// Apply one position fix to a tracker state.
///
/// Pure transition: `state` is left untouched and the new state is
/// returned alongside the emitted events. A state that is no longer
/// active comes back unchanged with no events.
///
/// On advancement the remaining distance is taken from the next step's
/// precomputed distance rather than the live fix; the next fix replaces it
/// with a measured value.
pub fn apply_fix(
    state: &TrackerState,
    steps: &[Step],
    fix: &Fix,
    arrival_radius_m: f64,
) -> Transition {
    let mut next = state.clone();
    let mut events = heapless::Vec::new();

    if !state.is_active() {
        return Transition {
            state: next,
            events,
        };
    }

    let Some(step) = steps.get(state.current_step) else {
        return Transition {
            state: next,
            events,
        };
    };

    // Non-finite or out-of-range coordinates would poison the distance.
    if !fix.position.is_valid() {
        return Transition {
            state: next,
            events,
        };
    }

    next.last_position = Some(fix.position);
    next.last_heading = fix.effective_heading();

    let distance = haversine_distance(&fix.position, &step.anchor);
    next.remaining_distance_m = distance;

    if distance < arrival_radius_m {
        if state.current_step >= steps.len() - 1 {
            next.status = TrackingStatus::Completed;
            let _ = events.push(TrackerEvent::RouteCompleted);
        } else {
            let from = state.current_step;
            let to = from + 1;
            next.current_step = to;
            next.remaining_distance_m = steps[to].distance_m.max(0.0);
            let _ = events.push(TrackerEvent::StepAdvanced { from, to });
        }
    }

    Transition {
        state: next,
        events,
    }
}

/// Progress tracker for one navigation session.
///
/// Owns the step list and the [`TrackerState`]; each session creates its
/// own instance.
#[derive(Clone, Debug)]
pub struct ProgressTracker {
    steps: Vec<Step>,
    state: TrackerState,
    arrival_radius_m: f64,
}

impl ProgressTracker {
    /// Create a tracker with the default 10 m arrival radius.
    pub fn new(steps: Vec<Step>) -> Result<Self, RouteError> {
        Self::with_arrival_radius(steps, DEFAULT_ARRIVAL_RADIUS_M)
    }

    /// Create a tracker with a custom arrival radius.
    pub fn with_arrival_radius(steps: Vec<Step>, arrival_radius_m: f64) -> Result<Self, RouteError> {
        let state = TrackerState::new(&steps)?;
        Ok(Self {
            steps,
            state,
            arrival_radius_m,
        })
    }

    /// Current state snapshot.
    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    /// Mutable state access for camera follow toggling.
    pub fn state_mut(&mut self) -> &mut TrackerState {
        &mut self.state
    }

    /// All steps of the route.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Arrival radius in meters.
    pub fn arrival_radius_m(&self) -> f64 {
        self.arrival_radius_m
    }

    /// The active step.
    pub fn current_step(&self) -> &Step {
        &self.steps[self.state.current_step]
    }

    /// The step after the active one, for the "then" preview.
    pub fn upcoming_step(&self) -> Option<&Step> {
        self.steps.get(self.state.current_step + 1)
    }

    /// Consume one fix, returning the events it produced.
    pub fn apply_fix(&mut self, fix: &Fix) -> heapless::Vec<TrackerEvent, MAX_TRACKER_EVENTS> {
        let transition = apply_fix(&self.state, &self.steps, fix, self.arrival_radius_m);
        self.state = transition.state;
        transition.events
    }

    /// Stop consuming fixes.
    ///
    /// Has no effect once the route is completed.
    pub fn end(&mut self) {
        if self.state.status == TrackingStatus::Active {
            self.state.status = TrackingStatus::Ended;
        }
    }

    /// Check if fixes are still being consumed.
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }
}
