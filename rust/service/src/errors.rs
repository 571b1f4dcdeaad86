/// Error handling for holdem_service
///
/// This module provides:
/// - The service error type wrapping engine errors
/// - A serializable error response for transport collaborators
/// - Severity-based error logging
use holdem_engine::errors::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::settings::SettingsError;

/// Standard error response format handed to transports
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g., "table_not_found")
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (structured data)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// Error classification for logging levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Rejected request - expected, normal operation
    Client,
    /// Unexpected failure that needs investigation
    Server,
    /// Table state can no longer be trusted
    Critical,
}

/// Conversion of service errors into [`ErrorResponse`]s with logging
pub trait IntoErrorResponse {
    /// Machine-readable error code
    fn error_code(&self) -> &'static str;

    /// Human-readable error message
    fn error_message(&self) -> String;

    fn error_details(&self) -> Option<serde_json::Value> {
        None
    }

    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Client
    }

    fn to_error_response(&self) -> ErrorResponse {
        if let Some(details) = self.error_details() {
            ErrorResponse::with_details(self.error_code(), self.error_message(), details)
        } else {
            ErrorResponse::new(self.error_code(), self.error_message())
        }
    }

    /// Logs at the level matching [`severity`](Self::severity) and returns
    /// the response.
    fn log_and_respond(&self) -> ErrorResponse {
        let response = self.to_error_response();
        match self.severity() {
            ErrorSeverity::Client => {
                tracing::info!(error = %response.error, message = %response.message, "Client error");
            }
            ErrorSeverity::Server => {
                tracing::error!(error = %response.error, message = %response.message, "Server error");
            }
            ErrorSeverity::Critical => {
                tracing::error!(
                    error = %response.error,
                    message = %response.message,
                    critical = true,
                    "Critical error"
                );
            }
        }
        response
    }
}

/// Errors reported by the table service
#[derive(Debug, Error)]
pub enum TableError {
    #[error("table not found: {0}")]
    NotFound(String),
    #[error("player {0} is not registered")]
    UnknownAccount(String),
    #[error("player {name} cannot cover the buy-in of {buy_in}")]
    InsufficientBalance { name: String, buy_in: u32 },
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("table store error: {0}")]
    Store(String),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("table storage poisoned")]
    StoragePoisoned,
}

impl IntoErrorResponse for TableError {
    fn error_code(&self) -> &'static str {
        match self {
            TableError::NotFound(_) => "table_not_found",
            TableError::UnknownAccount(_) => "unknown_account",
            TableError::InsufficientBalance { .. } => "insufficient_balance",
            TableError::Game(err) => err.code(),
            TableError::Store(_) => "store_error",
            TableError::Settings(_) => "invalid_settings",
            TableError::StoragePoisoned => "storage_poisoned",
        }
    }

    fn error_message(&self) -> String {
        self.to_string()
    }

    fn error_details(&self) -> Option<serde_json::Value> {
        match self {
            TableError::NotFound(id) => Some(serde_json::json!({ "table_id": id })),
            TableError::InsufficientBalance { name, buy_in } => {
                Some(serde_json::json!({ "player": name, "buy_in": buy_in }))
            }
            TableError::Game(GameError::NotPlayersTurn { expected, actual }) => {
                Some(serde_json::json!({ "expected": expected, "actual": actual }))
            }
            TableError::Game(GameError::InvalidBetAmount { amount, minimum }) => {
                Some(serde_json::json!({ "amount": amount, "minimum": minimum }))
            }
            TableError::Game(GameError::CannotCheck { to_call }) => {
                Some(serde_json::json!({ "to_call": to_call }))
            }
            _ => None,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            TableError::StoragePoisoned => ErrorSeverity::Critical,
            TableError::Store(_) => ErrorSeverity::Server,
            TableError::Game(GameError::EmptyDeck) => ErrorSeverity::Server,
            _ => ErrorSeverity::Client,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_response_serialization() {
        let error = ErrorResponse::new("test_error", "Test error message");
        let json = serde_json::to_value(&error).expect("serialize");

        assert_eq!(json["error"], "test_error");
        assert_eq!(json["message"], "Test error message");
        assert!(json["details"].is_null());
    }

    #[test]
    fn error_response_with_details() {
        let details = json!({ "player": "ann", "buy_in": 10 });
        let error = ErrorResponse::with_details("insufficient_balance", "Too poor", details);
        let json = serde_json::to_value(&error).expect("serialize");

        assert_eq!(json["error"], "insufficient_balance");
        assert_eq!(json["details"]["player"], "ann");
    }

    #[test]
    fn error_response_display() {
        let error = ErrorResponse::new("table_not_found", "table not found: t1");
        assert_eq!(format!("{}", error), "table_not_found: table not found: t1");
    }

    #[test]
    fn game_errors_keep_engine_codes() {
        let err = TableError::from(GameError::NotPlayersTurn {
            expected: "ann".into(),
            actual: "bob".into(),
        });
        let response = err.to_error_response();
        assert_eq!(response.error, "not_players_turn");
        assert_eq!(response.details, Some(json!({ "expected": "ann", "actual": "bob" })));
        assert_eq!(err.severity(), ErrorSeverity::Client);
    }

    #[test]
    fn poisoned_storage_is_critical() {
        assert_eq!(TableError::StoragePoisoned.severity(), ErrorSeverity::Critical);
        assert_eq!(TableError::Store("disk".into()).severity(), ErrorSeverity::Server);
        assert_eq!(
            TableError::NotFound("t".into()).to_error_response().details,
            Some(json!({ "table_id": "t" }))
        );
    }
}
