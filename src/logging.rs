//! Logging abstraction
//!
//! Provides unified logging macros for the navigation stack. All macros
//! forward to `tracing`, so any subscriber the host installs receives them;
//! [`init_logging`] installs a formatted stderr subscriber for binaries and
//! examples.
//!
//! ```ignore
//! trailnav::log_info!("step {} reached", index);
//! ```

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Install the global fmt subscriber
///
/// Respects `RUST_LOG`; falls back to [`DEFAULT_LOG_FILTER`]. Calling this
/// more than once is harmless, later calls are ignored.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Log error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        $crate::__tracing::error!($($arg)*);
    }};
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        $crate::__tracing::warn!($($arg)*);
    }};
}

/// Log info message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        $crate::__tracing::info!($($arg)*);
    }};
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        $crate::__tracing::debug!($($arg)*);
    }};
}

/// Log trace message
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {{
        $crate::__tracing::trace!($($arg)*);
    }};
}
