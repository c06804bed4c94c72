//! Providers for host runs and tests.
//!
//! - [`StaticDirections`]: canned or straight-line directions, no network
//! - [`ScriptedLocationProvider`]: replays a fixed list of fix results
//! - [`SimulatedLocationProvider`]: feeds [`RouteWalker`] fixes from a task

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use trailnav::directions::{
    DirectionsResponse, DirectionsRoute, LineGeometry, Maneuver, RouteLeg, RouteStep,
};
use trailnav::location::{FixUpdate, FIX_CHANNEL_CAPACITY};
use trailnav::{
    DirectionsProvider, FixSubscription, LocationProvider, NavigationError, PermissionStatus,
    WatchOptions,
};
use trailnav_core::geo::{haversine_distance, initial_bearing};
use trailnav_core::Waypoint;

use crate::error::SimulatorError;
use crate::walker::{RouteWalker, WalkerConfig, DEFAULT_WALKING_SPEED_MPS};

const COMPASS_POINTS: [&str; 8] = [
    "north",
    "northeast",
    "east",
    "southeast",
    "south",
    "southwest",
    "west",
    "northwest",
];

/// Eight-point compass name for a bearing.
pub fn compass_point(bearing: f64) -> &'static str {
    let index = ((bearing.rem_euclid(360.0) + 22.5) / 45.0) as usize % 8;
    COMPASS_POINTS[index]
}

enum DirectionsMode {
    Canned(DirectionsResponse),
    StraightLine { speed_mps: f64 },
}

/// Directions provider that never leaves the process.
pub struct StaticDirections {
    mode: DirectionsMode,
}

impl StaticDirections {
    /// Always answer with `response`.
    pub fn canned(response: DirectionsResponse) -> Self {
        Self {
            mode: DirectionsMode::Canned(response),
        }
    }

    /// Connect the waypoints with straight legs at walking pace.
    pub fn straight_line() -> Self {
        Self::straight_line_at(DEFAULT_WALKING_SPEED_MPS)
    }

    pub fn straight_line_at(speed_mps: f64) -> Self {
        Self {
            mode: DirectionsMode::StraightLine { speed_mps },
        }
    }
}

/// Build a response with one step per waypoint and straight legs between them.
pub fn straight_line_response(waypoints: &[Waypoint], speed_mps: f64) -> DirectionsResponse {
    let mut steps = Vec::with_capacity(waypoints.len());
    let mut bearing_before = 0.0;

    for (i, pair) in waypoints.windows(2).enumerate() {
        let distance = haversine_distance(&pair[0], &pair[1]);
        let bearing = initial_bearing(&pair[0], &pair[1]);
        let instruction = if i == 0 {
            format!("Head {}", compass_point(bearing))
        } else {
            format!("Continue {}", compass_point(bearing))
        };
        steps.push(RouteStep {
            distance,
            duration: distance / speed_mps,
            maneuver: Maneuver {
                instruction,
                location: pair[0].to_lon_lat(),
                bearing_before: Some(bearing_before),
                bearing_after: Some(bearing),
            },
        });
        bearing_before = bearing;
    }

    if let Some(last) = waypoints.last() {
        steps.push(RouteStep {
            distance: 0.0,
            duration: 0.0,
            maneuver: Maneuver {
                instruction: "You have arrived at your destination".to_string(),
                location: last.to_lon_lat(),
                bearing_before: Some(bearing_before),
                bearing_after: Some(0.0),
            },
        });
    }

    let distance: f64 = steps.iter().map(|s| s.distance).sum();
    DirectionsResponse {
        code: Some("Ok".to_string()),
        message: None,
        routes: vec![DirectionsRoute {
            distance,
            duration: distance / speed_mps,
            geometry: Some(LineGeometry::line_string(
                waypoints.iter().map(Waypoint::to_lon_lat).collect(),
            )),
            legs: vec![RouteLeg { steps }],
        }],
    }
}

#[async_trait]
impl DirectionsProvider for StaticDirections {
    fn provider_name(&self) -> &str {
        match self.mode {
            DirectionsMode::Canned(_) => "canned",
            DirectionsMode::StraightLine { .. } => "straight-line",
        }
    }

    async fn route(&self, waypoints: &[Waypoint]) -> Result<DirectionsResponse, NavigationError> {
        match &self.mode {
            DirectionsMode::Canned(response) => Ok(response.clone()),
            DirectionsMode::StraightLine { speed_mps } => {
                Ok(straight_line_response(waypoints, *speed_mps))
            }
        }
    }
}

/// Location provider that replays a fixed script.
pub struct ScriptedLocationProvider {
    permission: PermissionStatus,
    script: Vec<FixUpdate>,
    hold_open: bool,
    open_senders: Mutex<Vec<mpsc::Sender<FixUpdate>>>,
}

impl ScriptedLocationProvider {
    /// The stream ends after the last scripted update.
    pub fn new(script: Vec<FixUpdate>) -> Self {
        Self {
            permission: PermissionStatus::Granted,
            script,
            hold_open: false,
            open_senders: Mutex::new(Vec::new()),
        }
    }

    /// Keep the stream open after the script, like a device standing still.
    pub fn held_open(mut self) -> Self {
        self.hold_open = true;
        self
    }

    pub fn with_permission(mut self, permission: PermissionStatus) -> Self {
        self.permission = permission;
        self
    }

    /// Whether every held-open subscription has been closed by its session.
    pub fn all_closed(&self) -> bool {
        match self.open_senders.lock() {
            Ok(senders) => senders.iter().all(|tx| tx.is_closed()),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl LocationProvider for ScriptedLocationProvider {
    async fn request_permission(&self) -> PermissionStatus {
        self.permission
    }

    async fn watch_position(&self, _options: WatchOptions) -> FixSubscription {
        let (tx, subscription) = FixSubscription::channel(self.script.len().max(1));
        for update in &self.script {
            // Capacity covers the whole script.
            let _ = tx.try_send(update.clone());
        }
        if self.hold_open {
            if let Ok(mut senders) = self.open_senders.lock() {
                senders.push(tx);
            }
        }
        subscription
    }
}

/// Location provider that walks a path in a background task.
pub struct SimulatedLocationProvider {
    path: Vec<Waypoint>,
    config: WalkerConfig,
    time_scale: Option<f64>,
}

impl SimulatedLocationProvider {
    /// Fixes are pushed as fast as the session consumes them.
    pub fn new(path: Vec<Waypoint>, config: WalkerConfig) -> Result<Self, SimulatorError> {
        if path.is_empty() {
            return Err(SimulatorError::EmptyPath);
        }
        config.validate()?;
        Ok(Self {
            path,
            config,
            time_scale: None,
        })
    }

    /// Pace fixes in wall-clock time, `scale` times faster than real time.
    pub fn with_time_scale(mut self, scale: f64) -> Result<Self, SimulatorError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(SimulatorError::InvalidConfig(format!(
                "time scale must be positive, got {scale}"
            )));
        }
        self.time_scale = Some(scale);
        Ok(self)
    }
}

#[async_trait]
impl LocationProvider for SimulatedLocationProvider {
    async fn request_permission(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn watch_position(&self, options: WatchOptions) -> FixSubscription {
        let (tx, subscription) = FixSubscription::channel(FIX_CHANNEL_CAPACITY);

        let walker = match RouteWalker::new(self.path.clone(), self.config.clone()) {
            Ok(walker) => walker,
            Err(e) => {
                trailnav::log_error!("Simulated walk could not start: {}", e);
                return subscription;
            }
        };
        let delay = self.time_scale.map(|scale| {
            Duration::from_secs_f64(self.config.fix_interval_ms as f64 / 1000.0 / scale)
        });

        trailnav::log_debug!(
            "Simulated walk: {:.0} m at {:.1} m/s, watch interval {} ms",
            walker.path_length_m(),
            self.config.speed_mps,
            options.min_interval_ms
        );

        tokio::spawn(async move {
            for fix in walker {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                if tx.send(Ok(fix)).await.is_err() {
                    trailnav::log_debug!("Subscriber gone, stopping simulated walk");
                    return;
                }
            }
            // Stay at the destination until the session lets go.
            tx.closed().await;
        });

        subscription
    }
}
