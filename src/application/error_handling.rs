// src/application/error_handling.rs
//
// Error Handling for Commands
//
// - Maps internal errors to UI-facing responses
// - One JSON shape for every command failure
// - Internal details go to the log, not to the UI

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::error::AppError;

/// Standard error response for UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Recipe, badge or challenge session does not exist
    NotFound,

    /// Malformed input (bad UUID, bad base64)
    Validation,

    /// Domain invariant violation (blank name, duplicate id)
    DomainError,

    /// Quiz operation not allowed in the current state
    InvalidState,

    /// Database/persistence error
    Database,

    /// File system error
    FileSystem,

    /// Other/unknown error
    Internal,
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details,
        }
    }

    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NotFound => Self::new(ErrorType::NotFound, "Resource not found", None),

            AppError::Domain(DomainError::NotFound(what)) => {
                Self::new(ErrorType::NotFound, format!("{} not found", what), None)
            }

            AppError::Domain(DomainError::InvalidStateTransition(reason)) => Self::new(
                ErrorType::InvalidState,
                "Operation not allowed right now",
                Some(reason),
            ),

            AppError::Domain(domain_error) => Self::new(
                ErrorType::DomainError,
                "Domain validation failed",
                Some(domain_error.to_string()),
            ),

            AppError::Database(db_error) => {
                log::error!("Database error: {:?}", db_error);
                Self::new(
                    ErrorType::Database,
                    "Database operation failed",
                    Some("Check logs for details".to_string()),
                )
            }

            AppError::Pool(pool_error) => {
                log::error!("Connection pool error: {}", pool_error);
                Self::new(ErrorType::Database, "Database connection failed", None)
            }

            AppError::Io(io_error) => {
                log::error!("IO error: {:?}", io_error);
                Self::new(
                    ErrorType::FileSystem,
                    "File system operation failed",
                    Some(io_error.to_string()),
                )
            }

            AppError::Serialization(serde_error) => {
                log::error!("Serialization error: {:?}", serde_error);
                Self::new(ErrorType::Internal, "Data serialization failed", None)
            }

            AppError::Config(message) => {
                log::error!("Configuration error: {}", message);
                Self::new(ErrorType::Internal, "Configuration error", Some(message))
            }

            AppError::Other(message) => {
                log::error!("Other error: {}", message);
                Self::new(ErrorType::Internal, message, None)
            }
        }
    }

    /// Create validation error
    pub fn validation(message: String) -> Self {
        Self::new(ErrorType::Validation, message, None)
    }

    /// Create not found error
    pub fn not_found(resource: &str) -> Self {
        Self::new(ErrorType::NotFound, format!("{} not found", resource), None)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "Internal error".to_string())
    }
}

/// Helper trait to convert Results to the command error string
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, String>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, String> {
        self.map_err(|e| ErrorResponse::from_app_error(e).to_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_not_found_error() {
        let error = ErrorResponse::from_app_error(AppError::NotFound);
        assert_eq!(error.error_type, ErrorType::NotFound);
        assert_eq!(error.message, "Resource not found");
        assert!(!error.success);
    }

    #[test]
    fn test_validation_error() {
        let error = ErrorResponse::validation("Invalid input".to_string());
        assert_eq!(error.error_type, ErrorType::Validation);
        assert_eq!(error.message, "Invalid input");
    }

    #[test]
    fn test_invalid_state_is_distinct_from_domain_error() {
        let invalid = ErrorResponse::from_app_error(AppError::Domain(
            DomainError::InvalidStateTransition("Cannot advance from Complete".to_string()),
        ));
        assert_eq!(invalid.error_type, ErrorType::InvalidState);
        assert_eq!(invalid.details.as_deref(), Some("Cannot advance from Complete"));

        let duplicate =
            ErrorResponse::from_app_error(AppError::Domain(DomainError::DuplicateId(Uuid::nil())));
        assert_eq!(duplicate.error_type, ErrorType::DomainError);
    }

    #[test]
    fn test_io_maps_to_file_system() {
        let error = ErrorResponse::from_app_error(AppError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        )));
        assert_eq!(error.error_type, ErrorType::FileSystem);
    }

    #[test]
    fn test_serialization() {
        let error = ErrorResponse::not_found("Recipe");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("not_found"));
        assert!(json.contains("Recipe not found"));
    }

    #[test]
    fn test_to_error_response_produces_json() {
        let result: Result<(), AppError> = Err(AppError::NotFound);
        let message = result.to_error_response().unwrap_err();
        let parsed: ErrorResponse = serde_json::from_str(&message).unwrap();
        assert_eq!(parsed.error_type, ErrorType::NotFound);
    }
}
