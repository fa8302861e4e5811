// src/error.rs
use thiserror::Error;

use crate::status::Status;

/// Error hierarchy for font construction, native handle management and
/// logical-font marshaling.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FontError {
    // Unit conversion
    #[error("Invalid GraphicsUnit: {code}")]
    InvalidUnit { code: i32 },

    // Native engine errors
    #[error("Style {style} isn't supported by font {family}.")]
    UnsupportedStyle { style: String, family: String },

    #[error("Native engine failure: {0}")]
    NativeFailure(Status),

    // Lifecycle errors
    #[error("Object has been disposed.")]
    ObjectDisposed,

    // Argument validation
    #[error("Value cannot be null: {name}")]
    NullArgument { name: &'static str, severe: bool },

    #[error("{name}: layout must be sequential")]
    InvalidLayout { name: &'static str },

    #[error("Operation not supported: {operation}")]
    NotSupported { operation: String },

    #[error("Invalid resolution: {dpi_x}x{dpi_y} dpi")]
    InvalidResolution { dpi_x: f32, dpi_y: f32 },

    // Serialized input that doesn't describe a font
    #[error("Invalid FontStyle bits: {bits}")]
    InvalidStyle { bits: i32 },
}

impl FontError {
    /// Null reference argument, recoverable by the caller.
    pub fn null_argument(name: &'static str) -> Self {
        FontError::NullArgument { name, severe: false }
    }

    /// Null output record. The legacy platform raises an access violation
    /// here rather than an argument error.
    pub fn null_record(name: &'static str) -> Self {
        FontError::NullArgument { name, severe: true }
    }

    pub fn not_supported(operation: impl Into<String>) -> Self {
        FontError::NotSupported { operation: operation.into() }
    }

    /// True for errors the legacy platform classifies as unrecoverable.
    pub fn is_severe(&self) -> bool {
        matches!(self, FontError::NullArgument { severe: true, .. })
    }
}

pub type FontResult<T> = Result<T, FontError>;
