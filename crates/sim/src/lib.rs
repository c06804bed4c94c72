//! trailnav_sim - Simulated walks for trailnav
//!
//! Replaces the device GPS and, optionally, the directions service so that
//! full navigation sessions can run on a development machine or in CI.

pub mod error;
pub mod provider;
pub mod walker;

pub use error::SimulatorError;
pub use provider::{
    compass_point, straight_line_response, ScriptedLocationProvider, SimulatedLocationProvider,
    StaticDirections,
};
pub use walker::{RouteWalker, WalkerConfig};
