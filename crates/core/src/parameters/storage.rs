//! Parameter Storage Types
//!
//! Provides core parameter types and the `ParameterStore`, a fixed-capacity
//! name/value map with per-parameter flags.

use super::error::ParameterError;
use bitflags::bitflags;
use heapless::index_map::FnvIndexMap;
use heapless::String;

/// Maximum parameter name length
pub const PARAM_NAME_LEN: usize = 16;

/// Maximum number of parameters
pub const MAX_PARAMS: usize = 32;

/// Maximum string parameter length
pub const MAX_STRING_LEN: usize = 63;

bitflags! {
    /// Parameter flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParamFlags: u8 {
        /// Parameter is hidden from listings
        const HIDDEN = 0b00000001;
        /// Parameter is read-only (cannot be modified after registration)
        const READ_ONLY = 0b00000010;
    }
}

/// Parameter value types
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// String parameter (max 63 chars)
    String(String<MAX_STRING_LEN>),
    /// Boolean parameter
    Bool(bool),
    /// 32-bit signed integer
    Int(i32),
    /// 32-bit floating point
    Float(f32),
}

impl ParamValue {
    /// Build a string value (`None` if longer than `MAX_STRING_LEN`)
    pub fn string(value: &str) -> Option<Self> {
        String::try_from(value).ok().map(ParamValue::String)
    }

    /// Check that two values are the same variant
    pub fn same_kind(&self, other: &ParamValue) -> bool {
        core::mem::discriminant(self) == core::mem::discriminant(other)
    }

    /// Parse `text` as a value of the same variant as `self`
    ///
    /// Booleans accept `true`/`false`/`1`/`0`; floats must be finite.
    pub fn parse_like(&self, text: &str) -> Result<ParamValue, ParameterError> {
        let text = text.trim();
        match self {
            ParamValue::String(_) => ParamValue::string(text).ok_or(ParameterError::InvalidValue),
            ParamValue::Bool(_) => match text {
                "true" | "1" => Ok(ParamValue::Bool(true)),
                "false" | "0" => Ok(ParamValue::Bool(false)),
                _ => Err(ParameterError::InvalidValue),
            },
            ParamValue::Int(_) => text
                .parse::<i32>()
                .map(ParamValue::Int)
                .map_err(|_| ParameterError::InvalidValue),
            ParamValue::Float(_) => match text.parse::<f32>() {
                Ok(value) if value.is_finite() => Ok(ParamValue::Float(value)),
                _ => Err(ParameterError::InvalidValue),
            },
        }
    }
}

/// Parameter metadata
#[derive(Debug, Clone)]
pub struct ParamMetadata {
    /// Parameter flags
    pub flags: ParamFlags,
}

/// Parameter store for configuration management
///
/// Stores parameters as key-value pairs with metadata (flags). Values keep
/// the variant they were registered with; numeric parameters are clamped
/// to their valid range by the typed loaders, not here.
pub struct ParameterStore {
    /// Parameter values
    parameters: FnvIndexMap<String<PARAM_NAME_LEN>, ParamValue, MAX_PARAMS>,
    /// Parameter metadata
    metadata: FnvIndexMap<String<PARAM_NAME_LEN>, ParamMetadata, MAX_PARAMS>,
    /// Modified since the last `clear_dirty`
    dirty: bool,
}

fn key(name: &str) -> Result<String<PARAM_NAME_LEN>, ParameterError> {
    String::try_from(name).map_err(|_| ParameterError::UnknownParameter)
}

impl ParameterStore {
    /// Create a new empty parameter store
    pub fn new() -> Self {
        Self {
            parameters: FnvIndexMap::new(),
            metadata: FnvIndexMap::new(),
            dirty: false,
        }
    }

    /// Get parameter value
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.parameters.get(&key(name).ok()?)
    }

    /// Set parameter value
    ///
    /// The new value must be the same variant as the registered one.
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParameterError> {
        let key = key(name)?;

        let current = self
            .parameters
            .get(&key)
            .ok_or(ParameterError::UnknownParameter)?;
        if !current.same_kind(&value) {
            return Err(ParameterError::TypeMismatch);
        }

        if let Some(meta) = self.metadata.get(&key) {
            if meta.flags.contains(ParamFlags::READ_ONLY) {
                return Err(ParameterError::ReadOnly);
            }
        }

        self.parameters
            .insert(key, value)
            .map_err(|_| ParameterError::StoreFull)?;
        self.dirty = true;
        Ok(())
    }

    /// Set a parameter from its text form
    ///
    /// The text is parsed as the registered variant, then stored as by
    /// [`ParameterStore::set`].
    pub fn set_from_str(&mut self, name: &str, text: &str) -> Result<(), ParameterError> {
        let value = self
            .get(name)
            .ok_or(ParameterError::UnknownParameter)?
            .parse_like(text)?;
        self.set(name, value)
    }

    /// Register a new parameter with default value and flags
    ///
    /// If the parameter already exists, this is a no-op (idempotent).
    pub fn register(
        &mut self,
        name: &str,
        default_value: ParamValue,
        flags: ParamFlags,
    ) -> Result<(), ParameterError> {
        let key = key(name)?;

        if self.parameters.contains_key(&key) {
            // Already exists, don't overwrite
            return Ok(());
        }

        self.parameters
            .insert(key.clone(), default_value)
            .map_err(|_| ParameterError::StoreFull)?;
        self.metadata
            .insert(key, ParamMetadata { flags })
            .map_err(|_| ParameterError::StoreFull)?;
        self.dirty = true;
        Ok(())
    }

    /// Check if parameter is hidden
    pub fn is_hidden(&self, name: &str) -> bool {
        self.get_metadata(name)
            .map(|meta| meta.flags.contains(ParamFlags::HIDDEN))
            .unwrap_or(false)
    }

    /// Get all parameter names (excluding hidden parameters)
    pub fn iter_names(&self) -> impl Iterator<Item = &String<PARAM_NAME_LEN>> {
        self.parameters
            .keys()
            .filter(|name| !self.is_hidden(name.as_str()))
    }

    /// Get parameter count (excluding hidden parameters)
    pub fn count(&self) -> usize {
        self.iter_names().count()
    }

    /// Check if store has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear dirty flag
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Get total parameter count (including hidden parameters)
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Get metadata for a parameter by name
    pub fn get_metadata(&self, name: &str) -> Option<&ParamMetadata> {
        self.metadata.get(&key(name).ok()?)
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}
