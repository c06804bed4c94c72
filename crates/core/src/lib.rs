//! trailnav_core - Pure no_std navigation logic for trailnav
//!
//! This crate contains platform-agnostic algorithms and types for walking
//! turn-by-turn navigation that can be tested on host without any HTTP
//! client, GPS device or map SDK.
//!
//! # Design Principles
//!
//! - **Pure no_std**: Only `core` and `alloc`
//! - **Explicit transitions**: Tracker updates are plain functions from
//!   state + fix to new state + events
//! - **Providers stay outside**: Directions, location and camera are
//!   driven by the application crate
//!
//! # Modules
//!
//! - [`geo`]: Haversine distance, bearings and the `Waypoint` coordinate
//! - [`route`]: Prepared route, steps and maneuver classification
//! - [`tracker`]: Step progress state machine and fix filtering
//! - [`camera`]: Camera follow policy (recenter / decenter)
//! - [`format`]: Duration and distance formatting for display
//! - [`parameters`]: Parameter store and navigation tunables

#![no_std]

extern crate alloc;

pub mod camera;
pub mod format;
pub mod geo;
pub mod parameters;
pub mod route;
pub mod tracker;

pub use geo::Waypoint;
pub use route::{Route, RouteError, Step};
pub use tracker::{Fix, ProgressTracker, TrackerEvent, TrackerState, TrackingStatus};
