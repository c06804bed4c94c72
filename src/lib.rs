//! trailnav - Walking turn-by-turn navigation
//!
//! Host-side half of the navigation stack. Pure algorithms (distance,
//! step tracking, camera policy, formatting, parameters) live in
//! [`trailnav_core`]; this crate connects them to the outside world:
//!
//! - [`directions`]: directions providers (Mapbox) and route preparation
//! - [`location`]: device position stream interface
//! - [`viewport`]: map camera interface
//! - [`session`]: one navigation run from route fetch to completion
//! - [`config`]: provider configuration from the environment
//! - [`logging`]: logging macros over `tracing`

pub mod config;
pub mod directions;
pub mod error;
pub mod location;
pub mod logging;
pub mod session;
pub mod viewport;

#[doc(hidden)]
pub use tracing as __tracing;

pub use config::DirectionsConfig;
pub use directions::{prepare_route, DirectionsProvider, MapboxDirections, PreparedRoute};
pub use error::NavigationError;
pub use location::{FixError, FixSubscription, LocationProvider, PermissionStatus, WatchOptions};
pub use session::{navigate, NavigationSession, ProgressView, SessionOutcome};
pub use viewport::ViewportController;
