//! Navigation session
//!
//! Binds one prepared route to a location subscription and a viewport.
//! Fixes are handled one at a time, in delivery order, by the synchronous
//! [`NavigationSession::handle_fix`]; [`NavigationSession::run_until`] is a
//! thin async driver around it. Each session owns its tracker, so sessions
//! can be created and dropped back to back.

use std::future::Future;

use trailnav_core::camera::{self, CameraConfig};
use trailnav_core::format::format_step_distance;
use trailnav_core::parameters::NavigationParams;
use trailnav_core::route::Turn;
use trailnav_core::tracker::FixFilter;
use trailnav_core::{ProgressTracker, TrackerEvent, TrackerState, Waypoint};

use crate::directions::{prepare_route, DirectionsProvider, PreparedRoute, RouteSummary};
use crate::error::NavigationError;
use crate::location::{FixSubscription, FixUpdate, LocationProvider, PermissionStatus, WatchOptions};
use crate::viewport::ViewportController;

/// How a session ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// Final step reached.
    Completed,
    /// Ended by the caller.
    Cancelled,
    /// Could not start or could not continue.
    Error(NavigationError),
}

/// Banner contents for the active step.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    pub step_index: usize,
    pub step_count: usize,
    pub instruction: String,
    pub turn: Option<Turn>,
    /// Distance to the active maneuver, e.g. `"80 m"`
    pub distance: String,
    /// Instruction of the following step.
    pub then: Option<String>,
}

/// A single turn-by-turn navigation run.
pub struct NavigationSession<V> {
    prepared: PreparedRoute,
    tracker: ProgressTracker,
    filter: Option<FixFilter>,
    camera: CameraConfig,
    viewport: V,
    subscription: Option<FixSubscription>,
    outcome: Option<SessionOutcome>,
}

impl<V: ViewportController> NavigationSession<V> {
    /// Create a session for an already prepared route, without a fix stream.
    pub fn new(
        prepared: PreparedRoute,
        params: &NavigationParams,
        viewport: V,
    ) -> Result<Self, NavigationError> {
        let tracker = ProgressTracker::with_arrival_radius(
            prepared.route.steps().to_vec(),
            params.arrival_radius_m,
        )?;
        Ok(Self {
            prepared,
            tracker,
            filter: None,
            camera: params.to_camera_config(),
            viewport,
            subscription: None,
            outcome: None,
        })
    }

    /// Drop fixes that arrive sooner or closer than `filter` allows.
    ///
    /// Rate limiting normally happens in the location provider through
    /// [`WatchOptions`]; use this only for providers that ignore it.
    pub fn with_fix_filter(mut self, filter: FixFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Prepare the route, obtain location permission and subscribe to fixes.
    ///
    /// Any failure is returned before a session exists.
    pub async fn start<D, L>(
        directions: &D,
        location: &L,
        waypoints: &[Waypoint],
        params: &NavigationParams,
        viewport: V,
    ) -> Result<Self, NavigationError>
    where
        D: DirectionsProvider + ?Sized,
        L: LocationProvider + ?Sized,
    {
        let prepared = prepare_route(directions, waypoints).await?;

        if location.request_permission().await == PermissionStatus::Denied {
            crate::log_warn!("Location permission denied");
            return Err(NavigationError::LocationPermissionDenied);
        }

        let mut session = Self::new(prepared, params, viewport)?;
        let subscription = location.watch_position(WatchOptions::from(params)).await;
        session.attach(subscription);

        crate::log_info!(
            "Navigation started: {} steps, first: {}",
            session.tracker.steps().len(),
            session.tracker.current_step().instruction
        );
        Ok(session)
    }

    /// Attach a fix stream. Ignored once the session has ended.
    pub fn attach(&mut self, subscription: FixSubscription) {
        if self.outcome.is_none() {
            self.subscription = Some(subscription);
        }
    }

    /// Process one update from the fix stream.
    ///
    /// Returns the outcome once the session is over. Updates handed in after
    /// that are ignored.
    pub fn handle_fix(&mut self, update: FixUpdate) -> Option<SessionOutcome> {
        if self.outcome.is_some() {
            return self.outcome.clone();
        }

        let fix = match update {
            Ok(fix) => fix,
            Err(e) => {
                crate::log_warn!("{}", NavigationError::TransientFixError(e.to_string()));
                return None;
            }
        };

        if !fix.position.is_valid() {
            crate::log_warn!(
                "{}",
                NavigationError::TransientFixError(format!(
                    "invalid position ({}, {})",
                    fix.position.latitude, fix.position.longitude
                ))
            );
            return None;
        }

        if let Some(filter) = self.filter.as_mut() {
            if !filter.accept(&fix) {
                crate::log_trace!("Fix at {} ms filtered", fix.timestamp_ms);
                return None;
            }
        }

        let events = self.tracker.apply_fix(&fix);

        if let Some(command) = camera::follow_command(self.tracker.state(), &self.camera) {
            self.viewport.set_camera(&command);
        }

        for event in events.iter() {
            match *event {
                TrackerEvent::StepAdvanced { from, to } => {
                    crate::log_info!(
                        "Step {} -> {}: {}",
                        from,
                        to,
                        self.tracker.steps()[to].instruction
                    );
                }
                TrackerEvent::RouteCompleted => {
                    crate::log_info!("Route completed");
                    self.finish(SessionOutcome::Completed);
                }
            }
        }

        self.outcome.clone()
    }

    /// Resume camera follow and jump to the last known position.
    ///
    /// Returns whether a camera command was issued.
    pub fn recenter(&mut self) -> bool {
        if self.outcome.is_some() {
            return false;
        }
        match camera::recenter(self.tracker.state_mut(), &self.camera) {
            Some(command) => {
                self.viewport.set_camera(&command);
                true
            }
            None => false,
        }
    }

    /// Stop camera follow after the user moved the map.
    pub fn decenter(&mut self) {
        if self.outcome.is_none() {
            camera::decenter(self.tracker.state_mut());
        }
    }

    /// Cancel the session.
    ///
    /// The fix subscription is closed before this returns, so nothing
    /// delivered afterwards reaches the tracker. Ending a finished session
    /// keeps the outcome it finished with.
    pub fn end(&mut self) -> SessionOutcome {
        if let Some(outcome) = &self.outcome {
            return outcome.clone();
        }
        crate::log_info!(
            "Navigation cancelled at step {}",
            self.tracker.state().current_step()
        );
        self.finish(SessionOutcome::Cancelled);
        SessionOutcome::Cancelled
    }

    /// Drive the session from its fix stream until it completes, the stream
    /// stops, or `cancel` resolves.
    pub async fn run_until<F>(&mut self, cancel: F) -> SessionOutcome
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(cancel);

        loop {
            if let Some(outcome) = &self.outcome {
                return outcome.clone();
            }

            let Some(subscription) = self.subscription.as_mut() else {
                return self.fail(NavigationError::FixStreamClosed);
            };

            let next = tokio::select! {
                biased;
                _ = &mut cancel => None,
                update = subscription.recv() => Some(update),
            };

            match next {
                None => return self.end(),
                Some(Some(update)) => {
                    if let Some(outcome) = self.handle_fix(update) {
                        return outcome;
                    }
                }
                Some(None) => return self.fail(NavigationError::FixStreamClosed),
            }
        }
    }

    fn fail(&mut self, error: NavigationError) -> SessionOutcome {
        crate::log_error!("Navigation stopped: {}", error);
        self.finish(SessionOutcome::Error(error.clone()));
        SessionOutcome::Error(error)
    }

    fn finish(&mut self, outcome: SessionOutcome) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.close();
        }
        self.tracker.end();
        self.outcome = Some(outcome);
    }

    /// Outcome, once the session is over.
    pub fn outcome(&self) -> Option<&SessionOutcome> {
        self.outcome.as_ref()
    }

    /// Whether a fix stream is still attached.
    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn state(&self) -> &TrackerState {
        self.tracker.state()
    }

    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    pub fn prepared_route(&self) -> &PreparedRoute {
        &self.prepared
    }

    pub fn summary(&self) -> RouteSummary {
        self.prepared.summary()
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    /// Banner contents for the active step.
    pub fn progress(&self) -> ProgressView {
        let state = self.tracker.state();
        let index = state.current_step();
        ProgressView {
            step_index: index,
            step_count: self.tracker.steps().len(),
            instruction: self.tracker.current_step().instruction.clone(),
            turn: self.prepared.route.turn_at(index),
            distance: format_step_distance(state.remaining_distance_m()),
            then: self.tracker.upcoming_step().map(|s| s.instruction.clone()),
        }
    }
}

/// Start a session and run it to the end.
///
/// Start-up failures are reported as [`SessionOutcome::Error`].
pub async fn navigate<D, L, V, F>(
    directions: &D,
    location: &L,
    waypoints: &[Waypoint],
    params: &NavigationParams,
    viewport: V,
    cancel: F,
) -> SessionOutcome
where
    D: DirectionsProvider + ?Sized,
    L: LocationProvider + ?Sized,
    V: ViewportController,
    F: Future<Output = ()>,
{
    match NavigationSession::start(directions, location, waypoints, params, viewport).await {
        Ok(mut session) => session.run_until(cancel).await,
        Err(e) => {
            crate::log_error!("Navigation could not start: {}", e);
            SessionOutcome::Error(e)
        }
    }
}
