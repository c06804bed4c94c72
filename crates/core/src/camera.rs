//! Camera follow policy
//!
//! Decides when the map camera should be moved to the device. Only reads
//! and toggles the `centered` flag of a [`TrackerState`]; step progress is
//! never affected by anything in here.

use crate::geo::Waypoint;
use crate::tracker::TrackerState;

/// Default camera tilt for the 3D walking view (degrees)
pub const DEFAULT_PITCH_DEG: f64 = 45.0;
/// Default camera zoom level
pub const DEFAULT_ZOOM: f64 = 16.0;
/// Default camera animation time (ms)
pub const DEFAULT_ANIMATION_MS: u32 = 1000;

/// Viewport command handed to the camera controller
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraCommand {
    /// Map center
    pub center: Waypoint,
    /// Map rotation in degrees
    pub heading: f64,
    /// Tilt in degrees
    pub pitch: f64,
    /// Zoom level
    pub zoom: f64,
    /// Animation duration in milliseconds
    pub animation_duration_ms: u32,
}

/// Static camera settings
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraConfig {
    /// Tilt in degrees
    pub pitch_deg: f64,
    /// Zoom level
    pub zoom: f64,
    /// Animation duration in milliseconds
    pub animation_duration_ms: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            pitch_deg: DEFAULT_PITCH_DEG,
            zoom: DEFAULT_ZOOM,
            animation_duration_ms: DEFAULT_ANIMATION_MS,
        }
    }
}

impl CameraConfig {
    /// Build a command centered on `center` and rotated to `heading`
    pub fn command(&self, center: Waypoint, heading: f64) -> CameraCommand {
        CameraCommand {
            center,
            heading,
            pitch: self.pitch_deg,
            zoom: self.zoom,
            animation_duration_ms: self.animation_duration_ms,
        }
    }
}

/// Command to issue after a fix has been recorded
///
/// `None` when follow mode is off or no position is known yet.
pub fn follow_command(state: &TrackerState, config: &CameraConfig) -> Option<CameraCommand> {
    if !state.is_centered() {
        return None;
    }
    let center = state.last_position()?;
    Some(config.command(center, state.last_heading()))
}

/// Turn follow mode on and return the immediate recenter command
///
/// Without a known position there is nothing to center on, so follow mode
/// is left as it was and `None` is returned.
pub fn recenter(state: &mut TrackerState, config: &CameraConfig) -> Option<CameraCommand> {
    state.last_position()?;
    state.set_centered(true);
    follow_command(state, config)
}

/// Turn follow mode off after a manual viewport interaction
pub fn decenter(state: &mut TrackerState) {
    state.set_centered(false);
}
