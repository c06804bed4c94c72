use trailnav::NavigationError;

/// Errors that can occur while setting up or running a simulated walk.
#[derive(Debug, thiserror::Error)]
pub enum SimulatorError {
    #[error("Invalid walker configuration: {0}")]
    InvalidConfig(String),

    #[error("Path has no points")]
    EmptyPath,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Navigation(#[from] NavigationError),
}
