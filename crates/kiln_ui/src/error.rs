//! # UI Error Types
//!
//! Errors surface only at the edges of the runtime: loading configuration,
//! building a display, and changing resolution. Rendering and dispatch
//! degrade silently instead of failing.

use thiserror::Error;

/// Errors that can occur while configuring or driving a display.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UiError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file could not be read.
    #[error("failed to read configuration {path}: {reason}")]
    ConfigRead {
        /// Path that was requested.
        path: String,
        /// Underlying I/O error message.
        reason: String,
    },

    /// A logical resolution with a non-positive extent was requested.
    #[error("invalid resolution {width}x{height}")]
    InvalidResolution {
        /// Requested width.
        width: f32,
        /// Requested height.
        height: f32,
    },

    /// A button name in the configuration is not a known logical button.
    #[error("unknown button name: {0}")]
    UnknownButton(String),
}

/// Result type for UI operations.
pub type UiResult<T> = Result<T, UiError>;
