//! Navigation Parameter Definitions
//!
//! Defines the tunables of a navigation session and maps them to
//! parameter store entries.
//!
//! # Parameters
//!
//! - `NAV_ARRIVE_RAD` - Step arrival radius in meters
//! - `FIX_MIN_INTVL` - Minimum time between accepted fixes (ms)
//! - `FIX_MIN_DIST` - Minimum distance between accepted fixes (m)
//! - `CAM_PITCH` - Camera tilt in degrees
//! - `CAM_ZOOM` - Camera zoom level
//! - `CAM_ANIM_MS` - Camera animation duration (ms)
//! - `NAV_PROFILE` - Routing profile (read-only, `walking`)

use alloc::string::String;

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use crate::camera::CameraConfig;
use crate::tracker::FixFilter;

// --- Defaults ---

const DEFAULT_ARRIVAL_RADIUS: f32 = 10.0;
const DEFAULT_FIX_MIN_INTERVAL_MS: i32 = 2000;
const DEFAULT_FIX_MIN_DISTANCE: f32 = 1.0;
const DEFAULT_CAMERA_PITCH: f32 = 45.0;
const DEFAULT_CAMERA_ZOOM: f32 = 16.0;
const DEFAULT_CAMERA_ANIMATION_MS: i32 = 1000;
const DEFAULT_PROFILE: &str = "walking";

// --- Ranges ---

const MIN_ARRIVAL_RADIUS: f32 = 1.0;
const MAX_ARRIVAL_RADIUS: f32 = 100.0;

const MIN_FIX_INTERVAL_MS: i32 = 0;
const MAX_FIX_INTERVAL_MS: i32 = 60_000;

const MIN_FIX_DISTANCE: f32 = 0.0;
const MAX_FIX_DISTANCE: f32 = 50.0;

const MIN_CAMERA_PITCH: f32 = 0.0;
const MAX_CAMERA_PITCH: f32 = 85.0;

const MIN_CAMERA_ZOOM: f32 = 1.0;
const MAX_CAMERA_ZOOM: f32 = 22.0;

const MIN_CAMERA_ANIMATION_MS: i32 = 0;
const MAX_CAMERA_ANIMATION_MS: i32 = 10_000;

/// Navigation parameters loaded from parameter store
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationParams {
    /// Distance to a step anchor that counts as reached (meters)
    pub arrival_radius_m: f64,
    /// Minimum time between fixes requested from the provider (ms)
    pub fix_min_interval_ms: u64,
    /// Minimum distance between fixes requested from the provider (m)
    pub fix_min_distance_m: f64,
    /// Camera tilt (degrees)
    pub camera_pitch_deg: f64,
    /// Camera zoom level
    pub camera_zoom: f64,
    /// Camera animation duration (ms)
    pub camera_animation_ms: u32,
    /// Routing profile sent to the directions provider
    pub profile: String,
}

impl Default for NavigationParams {
    fn default() -> Self {
        Self {
            arrival_radius_m: DEFAULT_ARRIVAL_RADIUS as f64,
            fix_min_interval_ms: DEFAULT_FIX_MIN_INTERVAL_MS as u64,
            fix_min_distance_m: DEFAULT_FIX_MIN_DISTANCE as f64,
            camera_pitch_deg: DEFAULT_CAMERA_PITCH as f64,
            camera_zoom: DEFAULT_CAMERA_ZOOM as f64,
            camera_animation_ms: DEFAULT_CAMERA_ANIMATION_MS as u32,
            profile: String::from(DEFAULT_PROFILE),
        }
    }
}

impl NavigationParams {
    /// Register navigation parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register(
            "NAV_ARRIVE_RAD",
            ParamValue::Float(DEFAULT_ARRIVAL_RADIUS),
            ParamFlags::empty(),
        )?;
        store.register(
            "FIX_MIN_INTVL",
            ParamValue::Int(DEFAULT_FIX_MIN_INTERVAL_MS),
            ParamFlags::empty(),
        )?;
        store.register(
            "FIX_MIN_DIST",
            ParamValue::Float(DEFAULT_FIX_MIN_DISTANCE),
            ParamFlags::empty(),
        )?;
        store.register(
            "CAM_PITCH",
            ParamValue::Float(DEFAULT_CAMERA_PITCH),
            ParamFlags::empty(),
        )?;
        store.register(
            "CAM_ZOOM",
            ParamValue::Float(DEFAULT_CAMERA_ZOOM),
            ParamFlags::empty(),
        )?;
        store.register(
            "CAM_ANIM_MS",
            ParamValue::Int(DEFAULT_CAMERA_ANIMATION_MS),
            ParamFlags::empty(),
        )?;
        let profile =
            ParamValue::string(DEFAULT_PROFILE).ok_or(ParameterError::StoreFull)?;
        store.register("NAV_PROFILE", profile, ParamFlags::READ_ONLY)?;

        Ok(())
    }

    /// Load navigation parameters from parameter store
    pub fn from_store(store: &ParameterStore) -> Self {
        Self {
            arrival_radius_m: load_float(
                store,
                "NAV_ARRIVE_RAD",
                DEFAULT_ARRIVAL_RADIUS,
                MIN_ARRIVAL_RADIUS,
                MAX_ARRIVAL_RADIUS,
            ) as f64,
            fix_min_interval_ms: load_int(
                store,
                "FIX_MIN_INTVL",
                DEFAULT_FIX_MIN_INTERVAL_MS,
                MIN_FIX_INTERVAL_MS,
                MAX_FIX_INTERVAL_MS,
            ) as u64,
            fix_min_distance_m: load_float(
                store,
                "FIX_MIN_DIST",
                DEFAULT_FIX_MIN_DISTANCE,
                MIN_FIX_DISTANCE,
                MAX_FIX_DISTANCE,
            ) as f64,
            camera_pitch_deg: load_float(
                store,
                "CAM_PITCH",
                DEFAULT_CAMERA_PITCH,
                MIN_CAMERA_PITCH,
                MAX_CAMERA_PITCH,
            ) as f64,
            camera_zoom: load_float(
                store,
                "CAM_ZOOM",
                DEFAULT_CAMERA_ZOOM,
                MIN_CAMERA_ZOOM,
                MAX_CAMERA_ZOOM,
            ) as f64,
            camera_animation_ms: load_int(
                store,
                "CAM_ANIM_MS",
                DEFAULT_CAMERA_ANIMATION_MS,
                MIN_CAMERA_ANIMATION_MS,
                MAX_CAMERA_ANIMATION_MS,
            ) as u32,
            profile: match store.get("NAV_PROFILE") {
                Some(ParamValue::String(s)) => String::from(s.as_str()),
                _ => String::from(DEFAULT_PROFILE),
            },
        }
    }

    /// Camera settings for the follow policy
    pub fn to_camera_config(&self) -> CameraConfig {
        CameraConfig {
            pitch_deg: self.camera_pitch_deg,
            zoom: self.camera_zoom,
            animation_duration_ms: self.camera_animation_ms,
        }
    }

    /// Fresh fix filter with the configured interval and distance
    pub fn to_fix_filter(&self) -> FixFilter {
        FixFilter::new(self.fix_min_interval_ms, self.fix_min_distance_m)
    }

    /// Validate navigation parameters
    pub fn is_valid(&self) -> bool {
        let radius = self.arrival_radius_m as f32;
        if !(MIN_ARRIVAL_RADIUS..=MAX_ARRIVAL_RADIUS).contains(&radius) {
            return false;
        }
        if self.fix_min_interval_ms > MAX_FIX_INTERVAL_MS as u64 {
            return false;
        }
        let distance = self.fix_min_distance_m as f32;
        if !(MIN_FIX_DISTANCE..=MAX_FIX_DISTANCE).contains(&distance) {
            return false;
        }
        let pitch = self.camera_pitch_deg as f32;
        if !(MIN_CAMERA_PITCH..=MAX_CAMERA_PITCH).contains(&pitch) {
            return false;
        }
        let zoom = self.camera_zoom as f32;
        if !(MIN_CAMERA_ZOOM..=MAX_CAMERA_ZOOM).contains(&zoom) {
            return false;
        }
        if self.camera_animation_ms > MAX_CAMERA_ANIMATION_MS as u32 {
            return false;
        }

        !self.profile.is_empty()
    }
}

/// Load a float parameter from store with clamping
fn load_float(store: &ParameterStore, name: &str, default: f32, min: f32, max: f32) -> f32 {
    match store.get(name) {
        Some(ParamValue::Float(v)) if v.is_finite() => v.clamp(min, max),
        Some(ParamValue::Int(v)) => (*v as f32).clamp(min, max),
        _ => default,
    }
}

/// Load an integer parameter from store with clamping
fn load_int(store: &ParameterStore, name: &str, default: i32, min: i32, max: i32) -> i32 {
    match store.get(name) {
        Some(ParamValue::Int(v)) => (*v).clamp(min, max),
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_params_defaults() {
        let params = NavigationParams::default();

        assert!((params.arrival_radius_m - 10.0).abs() < 0.001);
        assert_eq!(params.fix_min_interval_ms, 2000);
        assert!((params.fix_min_distance_m - 1.0).abs() < 0.001);
        assert!((params.camera_pitch_deg - 45.0).abs() < 0.001);
        assert!((params.camera_zoom - 16.0).abs() < 0.001);
        assert_eq!(params.camera_animation_ms, 1000);
        assert_eq!(params.profile, "walking");
        assert!(params.is_valid());
    }

    #[test]
    fn test_register_defaults_populates_all() {
        let mut store = ParameterStore::new();
        NavigationParams::register_defaults(&mut store).unwrap();

        for name in [
            "NAV_ARRIVE_RAD",
            "FIX_MIN_INTVL",
            "FIX_MIN_DIST",
            "CAM_PITCH",
            "CAM_ZOOM",
            "CAM_ANIM_MS",
            "NAV_PROFILE",
        ] {
            assert!(store.get(name).is_some(), "{name} missing");
        }
        assert_eq!(store.count(), 7);
    }

    #[test]
    fn test_from_store_reads_defaults() {
        let mut store = ParameterStore::new();
        NavigationParams::register_defaults(&mut store).unwrap();
        assert_eq!(NavigationParams::from_store(&store), NavigationParams::default());
    }

    #[test]
    fn test_from_store_reads_custom_values() {
        let mut store = ParameterStore::new();
        NavigationParams::register_defaults(&mut store).unwrap();

        store.set("NAV_ARRIVE_RAD", ParamValue::Float(15.0)).unwrap();
        store.set("FIX_MIN_INTVL", ParamValue::Int(500)).unwrap();
        store.set("CAM_ZOOM", ParamValue::Float(18.0)).unwrap();

        let params = NavigationParams::from_store(&store);
        assert!((params.arrival_radius_m - 15.0).abs() < 0.001);
        assert_eq!(params.fix_min_interval_ms, 500);
        assert!((params.camera_zoom - 18.0).abs() < 0.001);
    }

    #[test]
    fn test_from_store_clamps_out_of_range() {
        let mut store = ParameterStore::new();
        NavigationParams::register_defaults(&mut store).unwrap();

        store.set("NAV_ARRIVE_RAD", ParamValue::Float(0.1)).unwrap();
        store.set("CAM_PITCH", ParamValue::Float(120.0)).unwrap();
        store.set("FIX_MIN_INTVL", ParamValue::Int(-5)).unwrap();

        let params = NavigationParams::from_store(&store);
        assert!((params.arrival_radius_m - 1.0).abs() < 0.001);
        assert!((params.camera_pitch_deg - 85.0).abs() < 0.001);
        assert_eq!(params.fix_min_interval_ms, 0);
        assert!(params.is_valid());
    }

    #[test]
    fn test_from_empty_store_uses_defaults() {
        let store = ParameterStore::new();
        assert_eq!(NavigationParams::from_store(&store), NavigationParams::default());
    }

    #[test]
    fn test_profile_is_read_only() {
        let mut store = ParameterStore::new();
        NavigationParams::register_defaults(&mut store).unwrap();
        assert_eq!(
            store.set("NAV_PROFILE", ParamValue::string("driving").unwrap()),
            Err(ParameterError::ReadOnly)
        );
    }

    #[test]
    fn test_conversions() {
        let params = NavigationParams::default();
        let camera = params.to_camera_config();
        assert_eq!(camera, CameraConfig::default());

        let filter = params.to_fix_filter();
        assert_eq!(filter.min_interval_ms(), 2000);
        assert!((filter.min_distance_m() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_invalid_params() {
        let params = NavigationParams {
            arrival_radius_m: 0.0,
            ..NavigationParams::default()
        };
        assert!(!params.is_valid());

        let params = NavigationParams {
            profile: String::new(),
            ..NavigationParams::default()
        };
        assert!(!params.is_valid());
    }
}
