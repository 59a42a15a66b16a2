//! Error types and handling.

use reqwest::StatusCode;
use thiserror::Error;

/// Text shown when a request fails without a server-provided message.
pub const FALLBACK_MESSAGE: &str = "Erreur de connexion";

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP transport failed (no structured response)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Server error ({status}): {}", .message.as_deref().unwrap_or(FALLBACK_MESSAGE))]
    Server {
        status: StatusCode,
        message: Option<String>,
    },

    /// Client-side validation failed before any request was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Excel export error
    #[error("Export error: {0}")]
    Export(String),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create a config error with message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error with message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an export error with message
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Message to show the user for this error.
    ///
    /// Server messages and validation text are shown verbatim; anything else
    /// becomes `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Server {
                message: Some(message), ..
            } => message.clone(),
            Self::Validation(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// Whether the server rejected the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Server { status, .. } if *status == StatusCode::UNAUTHORIZED)
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
    fn test_server_message_is_verbatim() {
        let err = AppError::Server {
            status: StatusCode::BAD_REQUEST,
            message: Some("Téléphone déjà utilisé".to_string()),
        };
        assert_eq!(err.user_message("Erreur"), "Téléphone déjà utilisé");
    }

    #[test]
    fn test_server_without_message_uses_fallback() {
        let err = AppError::Server {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        };
        assert_eq!(err.user_message("Erreur import"), "Erreur import");
        assert!(err.to_string().contains(FALLBACK_MESSAGE));
    }

    #[test]
    fn test_validation_message_is_verbatim() {
        let err = AppError::validation("Les mots de passe ne correspondent pas");
        assert_eq!(err.user_message("Erreur"), "Les mots de passe ne correspondent pas");
    }

    #[test]
    fn test_io_uses_fallback() {
        let err = AppError::from(std::io::Error::other("disk full"));
        assert_eq!(err.user_message("Erreur export"), "Erreur export");
    }

    #[test]
    fn test_unauthorized() {
        let err = AppError::Server {
            status: StatusCode::UNAUTHORIZED,
            message: Some("Token invalide".to_string()),
        };
        assert!(err.is_unauthorized());
        assert!(!AppError::validation("x").is_unauthorized());
    }
}
