//! # Errors
//!
//! This module defines errors, returned by the library.

use thiserror::Error;

/// Errors returned by the configuration layer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServerError {
    /// ConfigError is returned when the configuration is invalid
    #[error("ConfigError: {0}")]
    ConfigError(String),
    /// Returned when an environment variable is set but its value can't be
    /// parsed into the expected type.
    #[error("Environment variable {0} is malformed: {1}")]
    EnvVarMalformed(&'static str, String),
}
