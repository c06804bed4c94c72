//! Device location interface
//!
//! A [`LocationProvider`] hands out a [`FixSubscription`]: a bounded channel
//! of fixes (or per-fix errors) that stays open until the subscription is
//! closed or dropped. Providers notice the closed receiver and stop pushing.

use async_trait::async_trait;
use tokio::sync::mpsc;
use trailnav_core::parameters::NavigationParams;
use trailnav_core::Fix;

/// Default subscription channel depth.
pub const FIX_CHANNEL_CAPACITY: usize = 32;

/// Requested fix accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Accuracy {
    Low,
    Balanced,
    #[default]
    High,
}

/// Watch request passed to the provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatchOptions {
    pub accuracy: Accuracy,
    /// Minimum time between fixes (ms)
    pub min_interval_ms: u64,
    /// Minimum distance between fixes (m)
    pub min_distance_m: f64,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            accuracy: Accuracy::High,
            min_interval_ms: 2000,
            min_distance_m: 1.0,
        }
    }
}

impl From<&NavigationParams> for WatchOptions {
    fn from(params: &NavigationParams) -> Self {
        Self {
            accuracy: Accuracy::High,
            min_interval_ms: params.fix_min_interval_ms,
            min_distance_m: params.fix_min_distance_m,
        }
    }
}

/// Result of a permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// A single failed fix. Never fatal to a session.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FixError {
    #[error("location unavailable: {0}")]
    Unavailable(String),

    #[error("location request timed out")]
    Timeout,
}

/// Item delivered on a fix subscription.
pub type FixUpdate = Result<Fix, FixError>;

/// Receiving side of a position watch.
///
/// Dropping or closing it unsubscribes.
#[derive(Debug)]
pub struct FixSubscription {
    receiver: mpsc::Receiver<FixUpdate>,
}

impl FixSubscription {
    pub fn new(receiver: mpsc::Receiver<FixUpdate>) -> Self {
        Self { receiver }
    }

    /// Create a connected sender/subscription pair.
    pub fn channel(capacity: usize) -> (mpsc::Sender<FixUpdate>, Self) {
        let (tx, rx) = mpsc::channel(capacity);
        (tx, Self::new(rx))
    }

    /// Wait for the next update. `None` once the provider stopped.
    pub async fn recv(&mut self) -> Option<FixUpdate> {
        self.receiver.recv().await
    }

    /// Non-blocking poll for an already queued update.
    pub fn try_recv(&mut self) -> Option<FixUpdate> {
        self.receiver.try_recv().ok()
    }

    /// Stop the watch. Queued updates are discarded by the caller.
    pub fn close(&mut self) {
        self.receiver.close();
    }
}

/// Device location source.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Ask for foreground location access.
    async fn request_permission(&self) -> PermissionStatus;

    /// Start a position watch.
    async fn watch_position(&self, options: WatchOptions) -> FixSubscription;
}
