use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("External service error: {0}")]
    ExternalService(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Configuration error".to_string())
            }
            AppError::ExternalService(msg) => {
                tracing::error!("External service error: {}", msg);
                (StatusCode::BAD_GATEWAY, msg.clone())
            }
        };

        let body = Json(json!({
            "success": false,
            "error": message
        }));

        (status, body).into_response()
    }
}

/// Type alias for Results with AppError
pub type AppResult<T> = std::result::Result<T, AppError>;

/// Which domain limit a roll request broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeErrorKind {
    TooFewSides,
    TooFewDice,
    TooManyDice,
    TooManySides,
}

impl RangeErrorKind {
    pub fn message(self) -> &'static str {
        match self {
            Self::TooFewSides => "die must have at least 2 sides",
            Self::TooFewDice => "must roll at least one die",
            Self::TooManyDice => "exceeds maximum dice count",
            Self::TooManySides => "exceeds maximum side count",
        }
    }
}

impl std::fmt::Display for RangeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Errors raised while turning command text into a roll.
///
/// These never reach the HTTP layer as failures: the command handler turns
/// every variant into an ephemeral chat message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RollError {
    #[error("`{0}` is not valid dice notation")]
    Syntax(String),

    #[error("{0}")]
    Range(RangeErrorKind),
}

impl RollError {
    pub fn range_kind(&self) -> Option<RangeErrorKind> {
        match self {
            Self::Range(kind) => Some(*kind),
            Self::Syntax(_) => None,
        }
    }
}

impl From<RangeErrorKind> for RollError {
    fn from(kind: RangeErrorKind) -> Self {
        Self::Range(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_includes_message() {
        let err = AppError::Validation("code is required".to_string());
        assert!(err.to_string().contains("code is required"));
    }

    #[test]
    fn test_configuration_includes_detail() {
        let err = AppError::Configuration("missing client id".to_string());
        assert!(err.to_string().contains("missing client id"));
    }

    #[test]
    fn test_external_service_includes_detail() {
        let err = AppError::ExternalService("timeout".to_string());
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn test_validation_maps_to_400() {
        let response = AppError::Validation("missing code".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_external_service_maps_to_502() {
        let response = AppError::ExternalService("slack down".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_range_error_messages_are_distinct() {
        let kinds = [
            RangeErrorKind::TooFewSides,
            RangeErrorKind::TooFewDice,
            RangeErrorKind::TooManyDice,
            RangeErrorKind::TooManySides,
        ];
        let mut messages: Vec<&str> = kinds.iter().map(|k| k.message()).collect();
        messages.sort_unstable();
        messages.dedup();
        assert_eq!(messages.len(), kinds.len());
    }

    #[test]
    fn test_roll_error_range_displays_kind_message() {
        let err = RollError::from(RangeErrorKind::TooManyDice);
        assert_eq!(err.to_string(), "exceeds maximum dice count");
        assert_eq!(err.range_kind(), Some(RangeErrorKind::TooManyDice));
    }

    #[test]
    fn test_roll_error_syntax_quotes_input() {
        let err = RollError::Syntax("bad string".to_string());
        assert!(err.to_string().contains("bad string"));
        assert!(err.range_kind().is_none());
    }
}
