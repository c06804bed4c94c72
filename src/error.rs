//! Session error type
//!
//! Every failure a navigation session can report, plus conversions from the
//! route model, the HTTP client and the JSON decoder.

use trailnav_core::RouteError;

/// Errors that can occur during a navigation session.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NavigationError {
    #[error("At least 2 waypoints required, got {0}")]
    InvalidWaypoints(usize),

    #[error("No route found for the selected waypoints")]
    NoRouteFound,

    #[error("Failed to fetch route: {0}")]
    RouteFetchFailed(String),

    #[error("Location permission denied")]
    LocationPermissionDenied,

    #[error("Transient location fix error: {0}")]
    TransientFixError(String),

    #[error("Location updates stopped before the route was completed")]
    FixStreamClosed,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl NavigationError {
    /// Whether the error ends the session
    ///
    /// Only per-fix errors are survivable; everything else is surfaced
    /// immediately and never retried.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, NavigationError::TransientFixError(_))
    }
}

impl From<RouteError> for NavigationError {
    fn from(err: RouteError) -> Self {
        match err {
            RouteError::TooFewWaypoints(n) => NavigationError::InvalidWaypoints(n),
            RouteError::NoSteps => NavigationError::NoRouteFound,
        }
    }
}

impl From<reqwest::Error> for NavigationError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the access token in its query string.
        NavigationError::RouteFetchFailed(err.without_url().to_string())
    }
}

impl From<serde_json::Error> for NavigationError {
    fn from(err: serde_json::Error) -> Self {
        NavigationError::RouteFetchFailed(format!("invalid directions response: {err}"))
    }
}
