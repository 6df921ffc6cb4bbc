/**
 * Authentication Middleware
 *
 * This module provides the gate protecting routes that require an
 * authenticated caller. It extracts the bearer token from the
 * `Authorization` header, validates it with the [`TokenService`], and
 * passes a new request carrying the caller's [`Identity`] to the wrapped
 * handler.
 *
 * Rejected requests never reach the wrapped handler; they are answered
 * with `401 Unauthorized` and a message that does not reveal why a token
 * was rejected.
 */

use std::sync::Arc;

use axum::extract::Request;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use serde::Serialize;
use thiserror::Error;

use crate::backend::auth::sessions::{
    extract_login, extract_subject_id, TokenError, TokenService, VerifiedClaims,
};
use crate::backend::error::BackendError;
use crate::backend::routes::chain::{from_fn, Middleware};

const BEARER: &str = "bearer";

/// Authentication failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No `Authorization` header
    #[error("missing Authorization header")]
    MissingHeader,

    /// The header is not `Bearer <token>`
    #[error("invalid Authorization header format")]
    MalformedHeader,

    /// The token failed validation
    #[error("invalid token")]
    InvalidToken,
}

impl From<AuthError> for BackendError {
    fn from(err: AuthError) -> Self {
        BackendError::unauthorized(err.to_string())
    }
}

/// Authenticated caller, attached to requests that passed the gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    /// Identity id from the token's `id` claim
    #[serde(rename = "id")]
    pub subject_id: String,
    /// Login from the token's `login` claim
    pub login: String,
}

impl Identity {
    fn from_claims(claims: &VerifiedClaims) -> Result<Self, TokenError> {
        Ok(Self {
            subject_id: extract_subject_id(claims)?.to_string(),
            login: extract_login(claims)?.to_string(),
        })
    }
}

/// Middleware admitting only requests with a valid bearer token
#[derive(Debug, Clone)]
pub struct AuthGate {
    tokens: Arc<TokenService>,
}

impl AuthGate {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    /// Resolve the caller's identity from request headers
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Identity, AuthError> {
        let token = bearer_token(headers)?;

        let claims = self.tokens.validate(token).map_err(|e| {
            tracing::debug!(reason = %e, "Token rejected");
            AuthError::InvalidToken
        })?;

        Identity::from_claims(&claims).map_err(|e| {
            tracing::debug!(reason = %e, "Token claims rejected");
            AuthError::InvalidToken
        })
    }

    /// Turn the gate into router middleware
    pub fn layer(self) -> Middleware {
        let gate = Arc::new(self);
        from_fn(move |req: Request, next| {
            let gate = Arc::clone(&gate);
            async move {
                match gate.authenticate(req.headers()) {
                    Ok(identity) => next(with_identity(req, identity)).await,
                    Err(err) => {
                        tracing::warn!(path = %req.uri().path(), "Unauthorized request: {}", err);
                        BackendError::from(err).into_response()
                    }
                }
            }
        })
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
///
/// The scheme is matched case-insensitively.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader)?;

    match value.split(' ').collect::<Vec<_>>().as_slice() {
        [scheme, token] if scheme.eq_ignore_ascii_case(BEARER) && !token.is_empty() => Ok(*token),
        _ => Err(AuthError::MalformedHeader),
    }
}

/// Rebuild `req` with `identity` attached
pub fn with_identity(req: Request, identity: Identity) -> Request {
    let (mut parts, body) = req.into_parts();
    parts.extensions.insert(identity);
    Request::from_parts(parts, body)
}

/// Extract the caller identity attached by [`AuthGate`]
///
/// Handlers registered behind the gate always find one; anywhere else this
/// yields `401 Unauthorized`.
pub fn extract_identity(request: &Request) -> Result<Identity, BackendError> {
    request
        .extensions()
        .get::<Identity>()
        .cloned()
        .ok_or_else(|| {
            tracing::warn!("Identity not found in request extensions");
            BackendError::unauthorized(AuthError::MissingHeader.to_string())
        })
}
