//! Error types for the finite-volume kernel
//!
//! Every fallible operation in the crate returns [`FvmResult<T>`]. None of the
//! variants is retryable: a failed run is abandoned.

use thiserror::Error;

/// Unified result type
pub type FvmResult<T> = Result<T, FvmError>;

/// Kernel error type
#[derive(Error, Debug)]
pub enum FvmError {
    /// Unsupported combination of governing equation, reconstruction and
    /// numerical flux, or an invalid strategy parameter.
    #[error("Configuration error: {message}")]
    Configuration {
        /// What was rejected
        message: String,
    },

    /// Malformed face connectivity (dangling index, non-unit normal,
    /// non-positive area, ...).
    #[error("Grid integrity error: {message}")]
    GridIntegrity {
        /// What was rejected
        message: String,
    },

    /// Non-positive, NaN or infinite time step, or non-finite solution values.
    #[error("Numerical instability: {message}")]
    NumericalInstability {
        /// Diagnostic
        message: String,
    },

    /// Snapshot output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration text could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl FvmError {
    /// Build a [`FvmError::Configuration`]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Build a [`FvmError::GridIntegrity`]
    pub fn grid(message: impl Into<String>) -> Self {
        Self::GridIntegrity { message: message.into() }
    }

    /// Build a [`FvmError::NumericalInstability`]
    pub fn instability(message: impl Into<String>) -> Self {
        Self::NumericalInstability { message: message.into() }
    }

    /// `true` for errors raised by the numerics rather than by set-up
    pub fn is_numerical(&self) -> bool {
        matches!(self, Self::NumericalInstability { .. })
    }
}
