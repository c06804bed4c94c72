//! Parameter error types
//!
//! Provides error types for parameter store operations.

/// Errors from parameter store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterError {
    /// Unknown parameter, or a name longer than `PARAM_NAME_LEN`
    UnknownParameter,
    /// Value variant differs from the registered default
    TypeMismatch,
    /// Store is full
    StoreFull,
    /// Read-only parameter cannot be modified
    ReadOnly,
    /// Text does not parse as the registered value type
    InvalidValue,
}

impl core::fmt::Display for ParameterError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParameterError::UnknownParameter => write!(f, "unknown parameter"),
            ParameterError::TypeMismatch => write!(f, "parameter type mismatch"),
            ParameterError::StoreFull => write!(f, "parameter store full"),
            ParameterError::ReadOnly => write!(f, "parameter is read-only"),
            ParameterError::InvalidValue => write!(f, "invalid parameter value"),
        }
    }
}
