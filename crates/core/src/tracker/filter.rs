//! Fix rate limiting
//!
//! Suppresses fixes that arrive too soon after, or too close to, the last
//! accepted fix. Mirrors the interval/distance options handed to the device
//! location provider so the same policy can be enforced and tested on host.

use crate::geo::haversine_distance;

use super::Fix;

/// Minimum-interval / minimum-distance fix filter
#[derive(Clone, Debug)]
pub struct FixFilter {
    min_interval_ms: u64,
    min_distance_m: f64,
    last_accepted: Option<Fix>,
}

impl FixFilter {
    /// Create a filter; the first fix is always accepted
    pub fn new(min_interval_ms: u64, min_distance_m: f64) -> Self {
        Self {
            min_interval_ms,
            min_distance_m,
            last_accepted: None,
        }
    }

    /// Minimum time between accepted fixes (ms)
    pub fn min_interval_ms(&self) -> u64 {
        self.min_interval_ms
    }

    /// Minimum distance between accepted fixes (m)
    pub fn min_distance_m(&self) -> f64 {
        self.min_distance_m
    }

    /// Decide whether `fix` should reach the tracker
    ///
    /// Accepted fixes become the new reference point.
    pub fn accept(&mut self, fix: &Fix) -> bool {
        if let Some(last) = &self.last_accepted {
            let elapsed = fix.timestamp_ms.saturating_sub(last.timestamp_ms);
            if elapsed < self.min_interval_ms {
                return false;
            }
            if haversine_distance(&last.position, &fix.position) < self.min_distance_m {
                return false;
            }
        }
        self.last_accepted = Some(*fix);
        true
    }

    /// Forget the reference fix
    pub fn reset(&mut self) {
        self.last_accepted = None;
    }
}

impl Default for FixFilter {
    fn default() -> Self {
        Self::new(2000, 1.0)
    }
}
