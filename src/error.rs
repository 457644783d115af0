//! Error types and handling.

use thiserror::Error;

use crate::account::FormError;
use crate::backend::BackendError;
use crate::booking::WizardError;
use crate::config::ConfigError;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Simulated backend operation failed
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Booking flow refused an action
    #[error("Booking error: {0}")]
    Booking(#[from] WizardError),

    /// Login or signup form rejected
    #[error("Form error: {0}")]
    Form(#[from] FormError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Excel export error
    #[error("Export error: {0}")]
    Export(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create a validation error with message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error with message
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for AppError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        Self::Export(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts() {
        let err: AppError = ConfigError::Validation("Booking fee must be greater than 0".to_string()).into();
        assert!(matches!(err, AppError::Config(_)));
        assert_eq!(
            err.to_string(),
            "Config error: Validation failed: Booking fee must be greater than 0"
        );
    }

    #[test]
    fn test_form_error_message() {
        let err: AppError = FormError::PasswordMismatch.into();
        assert_eq!(err.to_string(), "Form error: Passwords don't match");
    }

    #[test]
    fn test_io_error_converts() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, AppError::Io(_)));
    }
}
