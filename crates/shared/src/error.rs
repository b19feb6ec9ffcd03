//! Application-wide error types.

use thiserror::Error;

use crate::types::InvalidCurrencyCode;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input rejected before any state changed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced currency or resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate provider failed or returned unusable data.
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Preference storage failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Returns the process exit code for this error (sysexits.h values).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) | Self::NotFound(_) => 65,
            Self::ExternalService(_) => 69,
            Self::Storage(_) => 74,
            Self::Config(_) => 78,
        }
    }

    /// Returns the stable error code used in logs and CLI output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }
}

impl From<InvalidCurrencyCode> for AppError {
    fn from(err: InvalidCurrencyCode) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
