/**
 * Signin Handler
 *
 * This module implements the user authentication handler for `POST /api/signin`.
 *
 * # Authentication Process
 *
 * 1. Parse the body and check the password and login formats
 * 2. Look the credential up by login
 * 3. Verify the password against the stored Argon2id hash on a blocking worker
 * 4. Issue a 24 hour token
 *
 * An unknown login and a wrong password produce the same response, and
 * both run one full key derivation.
 */

use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::Json;

use crate::backend::auth::handlers::types::{AuthRequest, AuthResponse};
use crate::backend::auth::password::HASH_LEN;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

const DECOY_HASH: [u8; HASH_LEN] = [0; HASH_LEN];

fn wrong_credentials() -> BackendError {
    BackendError::unauthorized("wrong login or password")
}

/// Sign in handler
///
/// # Errors
///
/// * `400 Bad Request` - Unparseable body, or login/password breaking the format rules
/// * `401 Unauthorized` - Unknown login or wrong password
/// * `500 Internal Server Error` - Storage, verification or token issuance failed
pub async fn signin(state: AppState, req: Request) -> Result<Json<AuthResponse>, BackendError> {
    let request = AuthRequest::from_request(req, &()).await?;
    request.validate()?;
    tracing::info!(login = %request.login, "Signin request");

    let credential = state.users.find_by_login(&request.login).map_err(|e| {
        tracing::error!("Failed to look up user: {}", e);
        BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "unknown error")
    })?;

    // Unknown logins are verified against a decoy so both failures cost one derivation
    let stored = credential
        .as_ref()
        .map_or_else(|| DECOY_HASH.to_vec(), |c| c.password_hash.clone());
    let hasher = state.hasher.clone();
    let password = request.password;
    let matches = tokio::task::spawn_blocking(move || hasher.verify(&stored, &password))
        .await
        .map_err(|e| {
            tracing::error!("Password verification task failed: {:?}", e);
            BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "unknown error")
        })?;

    let credential = match credential {
        Some(credential) if matches => credential,
        Some(credential) => {
            tracing::warn!(login = %credential.login, "Invalid password");
            return Err(wrong_credentials());
        }
        None => {
            tracing::warn!(login = %request.login, "User not found");
            return Err(wrong_credentials());
        }
    };

    let token = state.tokens.issue_for(&credential.id, &credential.login)?;

    tracing::info!(id = %credential.id, login = %credential.login, "User signed in");
    Ok(Json(AuthResponse {
        id: credential.id,
        login: credential.login,
        token,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::handlers::signup::signup;
    use crate::backend::auth::handlers::test_support::{json_request, light_state};

    async fn registered(secret: &str) -> (AppState, AuthResponse) {
        let state = light_state(secret);
        let (_, Json(response)) = signup(
            state.clone(),
            json_request("/api/signup", "bob_1", "Test2025!"),
        )
        .await
        .unwrap();
        (state, response)
    }

    #[tokio::test]
    async fn test_signin_success() {
        let (state, registered) = registered("secret").await;

        let Json(response) = signin(
            state.clone(),
            json_request("/api/signin", "bob_1", "Test2025!"),
        )
        .await
        .unwrap();

        assert_eq!(response.id, registered.id);
        assert_eq!(response.login, "bob_1");
        assert!(state.tokens.validate(&response.token).is_ok());
    }

    #[tokio::test]
    async fn test_signin_wrong_password_and_unknown_login_look_alike() {
        let (state, _) = registered("secret").await;

        let wrong_password = signin(
            state.clone(),
            json_request("/api/signin", "bob_1", "Wrong2025!"),
        )
        .await
        .unwrap_err();
        let unknown_login = signin(state, json_request("/api/signin", "alice", "Test2025!"))
            .await
            .unwrap_err();

        for err in [wrong_password, unknown_login] {
            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
            assert_eq!(err.message(), "wrong login or password");
        }
    }

    #[test]
    fn test_decoy_hash_is_fully_verified() {
        let state = light_state("secret");

        // A full-length blob reaches the derivation instead of failing closed early
        assert_eq!(DECOY_HASH.len(), HASH_LEN);
        assert!(!state.hasher.verify(&DECOY_HASH, "Test2025!"));
        assert!(!state.hasher.verify(&DECOY_HASH, ""));
    }

    #[tokio::test]
    async fn test_signin_unknown_login_on_empty_store() {
        let state = light_state("secret");

        let err = signin(state, json_request("/api/signin", "nobody", "Test2025!"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.message(), "wrong login or password");
    }

    #[tokio::test]
    async fn test_signin_invalid_format() {
        let (state, _) = registered("secret").await;

        let err = signin(state, json_request("/api/signin", "bob_1", "nope"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
