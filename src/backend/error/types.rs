/*!
 * Backend Error Types
 *
 * This module defines the error type returned by HTTP handlers and
 * middleware. Every variant maps to one HTTP status code.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Malformed request bodies, logins or passwords that break the format
 * rules, duplicate registrations.
 *
 * ## Authentication Errors
 *
 * Missing or malformed `Authorization` headers and rejected tokens. The
 * message never carries the reason a token was rejected.
 *
 * ## Routing Errors
 *
 * Requests that match no registered pattern.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::sessions::TokenError;
use crate::backend::auth::users::StoreError;

/// Backend-specific error types
///
/// Each variant can be converted to an HTTP response, see
/// [`conversion`](super::conversion).
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (bad input, conflicts, failed background work)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// The caller is not authenticated
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Human-readable error message
        message: String,
    },

    /// No route matched the request
    #[error("Not found")]
    NotFound,

    /// Token issuance or validation failed
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Credential store failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl BackendError {
    /// Create a new handler error with a status code
    ///
    /// # Example
    ///
    /// ```rust
    /// use adboard::backend::error::BackendError;
    /// use axum::http::StatusCode;
    ///
    /// let err = BackendError::handler(StatusCode::BAD_REQUEST, "incorrect request");
    /// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    /// ```
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Create a new unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `Unauthorized` - 401 Unauthorized
    /// - `NotFound` - 404 Not Found
    /// - `Token` - 500 when the signing secret is missing, 401 otherwise
    /// - `Store` - 409 for duplicate logins, 500 otherwise
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Token(err) => match err {
                TokenError::Configuration | TokenError::Encoding => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                TokenError::InvalidToken | TokenError::MissingClaim(_) => StatusCode::UNAUTHORIZED,
            },
            Self::Store(err) => match err {
                StoreError::AlreadyExists(_) => StatusCode::CONFLICT,
                StoreError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Get the message that is safe to send to the client
    ///
    /// Internal failures collapse to a generic message; token failures
    /// collapse to `invalid token` or `token generation error`.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::Unauthorized { message } => message.clone(),
            Self::NotFound => "not found".to_string(),
            Self::Token(TokenError::Configuration | TokenError::Encoding) => {
                "token generation error".to_string()
            }
            Self::Token(_) => "invalid token".to_string(),
            Self::Store(StoreError::AlreadyExists(_)) => {
                "user with this login already exists".to_string()
            }
            Self::Store(StoreError::Unavailable(_)) => "user creation error".to_string(),
        }
    }
}
