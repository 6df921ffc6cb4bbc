/**
 * Authentication Handler Types
 *
 * Request and response bodies shared by the signup and signin handlers.
 */

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::backend::auth::validation::{is_valid_login, is_valid_password};
use crate::backend::error::BackendError;

/// Signup and signin request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct AuthRequest {
    /// Login, 3-20 characters from `[A-Za-z0-9_-]`
    pub login: String,
    /// Password, checked against the format rules before use
    pub password: String,
}

impl AuthRequest {
    /// Check the login and password format rules
    ///
    /// The password is checked first.
    pub fn validate(&self) -> Result<(), BackendError> {
        if !is_valid_password(&self.password) {
            tracing::warn!("Rejected request: incorrect password format");
            return Err(BackendError::handler(
                StatusCode::BAD_REQUEST,
                "incorrect password format",
            ));
        }

        if !is_valid_login(&self.login) {
            tracing::warn!(login = %self.login, "Rejected request: incorrect login format");
            return Err(BackendError::handler(
                StatusCode::BAD_REQUEST,
                "incorrect login format",
            ));
        }

        Ok(())
    }
}

impl<S> FromRequest<S> for AuthRequest
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let incorrect = |reason: String| {
            tracing::warn!("Rejected request body: {}", reason);
            BackendError::handler(StatusCode::BAD_REQUEST, "incorrect request")
        };

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| incorrect(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| incorrect(e.to_string()))
    }
}

/// Signup and signin response
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    /// Identity id (UUID v4)
    pub id: String,
    /// Login
    pub login: String,
    /// Bearer token valid for 24 hours
    pub token: String,
}
