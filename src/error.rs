//! Error types and handling for the `TripSift` engine
//!
//! The scoring core itself has no fatal error conditions: it degrades
//! (invalid coordinates become absent, missing geocodes fall back to lodging
//! coordinates, then to zero anchors). Errors only arise at the
//! configuration boundary.

use thiserror::Error;

/// Main error type for the `TripSift` library
#[derive(Error, Debug)]
pub enum TripSiftError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl TripSiftError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TripSiftError::Config { .. } => {
                "Configuration error. Please check your config file and environment overrides."
                    .to_string()
            }
            TripSiftError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            TripSiftError::General { message } => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = TripSiftError::config("bad taper ratio");
        assert!(matches!(config_err, TripSiftError::Config { .. }));

        let validation_err = TripSiftError::validation("negative radius");
        assert!(matches!(validation_err, TripSiftError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = TripSiftError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let validation_err = TripSiftError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }
}
