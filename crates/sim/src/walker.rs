//! Simulated pedestrian.
//!
//! Walks an ordered polyline at constant speed and reports a fix every
//! `fix_interval_ms`, the way a phone GPS would during a walk. Optional
//! position noise is drawn from a seedable RNG so runs can be replayed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use trailnav_core::geo::{destination_point, haversine_distance, initial_bearing};
use trailnav_core::{Fix, Route, Waypoint};

use crate::error::SimulatorError;

/// Walking pace used by the directions provider for pedestrians (m/s).
pub const DEFAULT_WALKING_SPEED_MPS: f64 = 1.4;
/// Fix period matching the default watch request (ms).
pub const DEFAULT_FIX_INTERVAL_MS: u64 = 2000;

/// Configuration for the route walker.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Walking speed in m/s.
    pub speed_mps: f64,
    /// Time between fixes in milliseconds.
    pub fix_interval_ms: u64,
    /// GPS position noise standard deviation in meters.
    pub gps_noise_m: f64,
    /// RNG seed for deterministic mode. None = random.
    pub seed: Option<u64>,
    /// Timestamp of the first fix (ms).
    pub start_time_ms: u64,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            speed_mps: DEFAULT_WALKING_SPEED_MPS,
            fix_interval_ms: DEFAULT_FIX_INTERVAL_MS,
            gps_noise_m: 0.0,
            seed: None,
            start_time_ms: 0,
        }
    }
}

impl WalkerConfig {
    /// Check that the walker will make progress.
    pub fn validate(&self) -> Result<(), SimulatorError> {
        if !self.speed_mps.is_finite() || self.speed_mps <= 0.0 {
            return Err(SimulatorError::InvalidConfig(format!(
                "speed must be positive, got {}",
                self.speed_mps
            )));
        }
        if self.fix_interval_ms == 0 {
            return Err(SimulatorError::InvalidConfig(
                "fix interval must be non-zero".to_string(),
            ));
        }
        if !self.gps_noise_m.is_finite() || self.gps_noise_m < 0.0 {
            return Err(SimulatorError::InvalidConfig(format!(
                "noise must be non-negative, got {}",
                self.gps_noise_m
            )));
        }
        Ok(())
    }

    /// Distance covered between two fixes (m).
    pub fn step_length_m(&self) -> f64 {
        self.speed_mps * self.fix_interval_ms as f64 / 1000.0
    }
}

/// Iterator of fixes along a polyline.
///
/// The first fix is at the first vertex and the last one exactly at the
/// final vertex; nothing is yielded after that.
pub struct RouteWalker {
    path: Vec<Waypoint>,
    config: WalkerConfig,
    rng: StdRng,
    segment: usize,
    offset_m: f64,
    heading: f64,
    time_ms: u64,
    finished: bool,
}

impl RouteWalker {
    /// Create a walker over `path`.
    pub fn new(path: Vec<Waypoint>, config: WalkerConfig) -> Result<Self, SimulatorError> {
        if path.is_empty() {
            return Err(SimulatorError::EmptyPath);
        }
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let time_ms = config.start_time_ms;
        Ok(Self {
            path,
            config,
            rng,
            segment: 0,
            offset_m: 0.0,
            heading: 0.0,
            time_ms,
            finished: false,
        })
    }

    /// Walk the route geometry, or the step anchors when it has none.
    pub fn along_route(route: &Route, config: WalkerConfig) -> Result<Self, SimulatorError> {
        let path = if route.geometry().is_empty() {
            route.steps().iter().map(|s| s.anchor).collect()
        } else {
            route.geometry().to_vec()
        };
        Self::new(path, config)
    }

    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Total polyline length (m).
    pub fn path_length_m(&self) -> f64 {
        self.path
            .windows(2)
            .map(|pair| haversine_distance(&pair[0], &pair[1]))
            .sum()
    }

    /// Whether the final vertex has been reported.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn at_end(&self) -> bool {
        self.segment + 1 >= self.path.len()
    }

    /// True position and heading.
    fn position(&mut self) -> Waypoint {
        if self.at_end() {
            return self.path[self.path.len() - 1];
        }
        let from = self.path[self.segment];
        let to = self.path[self.segment + 1];
        if haversine_distance(&from, &to) > 0.0 {
            self.heading = initial_bearing(&from, &to);
        }
        if self.offset_m == 0.0 {
            return from;
        }
        destination_point(&from, self.heading, self.offset_m)
    }

    fn advance(&mut self, mut distance_m: f64) {
        while !self.at_end() {
            let length = haversine_distance(&self.path[self.segment], &self.path[self.segment + 1]);
            let left = length - self.offset_m;
            if distance_m < left {
                self.offset_m += distance_m;
                return;
            }
            distance_m -= left;
            self.segment += 1;
            self.offset_m = 0.0;
        }
    }

    fn jitter(&mut self, position: Waypoint) -> Waypoint {
        let north = self.gaussian_noise(self.config.gps_noise_m);
        let east = self.gaussian_noise(self.config.gps_noise_m);
        let offset = north.hypot(east);
        if offset == 0.0 {
            return position;
        }
        destination_point(&position, east.atan2(north).to_degrees(), offset)
    }

    /// Generate Gaussian noise using Box-Muller transform.
    fn gaussian_noise(&mut self, stddev: f64) -> f64 {
        if stddev == 0.0 {
            return 0.0;
        }
        let u1: f64 = self.rng.gen::<f64>().max(f64::EPSILON);
        let u2: f64 = self.rng.gen();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        z * stddev
    }
}

impl Iterator for RouteWalker {
    type Item = Fix;

    fn next(&mut self) -> Option<Fix> {
        if self.finished {
            return None;
        }

        let at_end = self.at_end();
        let truth = self.position();
        let reported = self.jitter(truth);
        let fix = Fix::new(reported, Some(self.heading), self.time_ms);

        if at_end {
            self.finished = true;
        } else {
            self.advance(self.config.step_length_m());
            self.time_ms += self.config.fix_interval_ms;
        }
        Some(fix)
    }
}

impl std::fmt::Debug for RouteWalker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteWalker")
            .field("points", &self.path.len())
            .field("segment", &self.segment)
            .field("offset_m", &self.offset_m)
            .field("time_ms", &self.time_ms)
            .field("finished", &self.finished)
            .finish()
    }
}
