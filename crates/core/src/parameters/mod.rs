//! Parameter management types and utilities
//!
//! This module provides the named parameter store used for runtime
//! configuration of the tracker, the fix filter and the camera.

pub mod error;
pub mod navigation;
pub mod storage;

pub use error::ParameterError;
pub use navigation::NavigationParams;
pub use storage::{ParamFlags, ParamMetadata, ParamValue, ParameterStore};
pub use storage::{MAX_PARAMS, MAX_STRING_LEN, PARAM_NAME_LEN};
