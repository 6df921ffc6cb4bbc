/**
 * Signup Handler
 *
 * This module implements the user registration handler for `POST /api/signup`.
 *
 * # Registration Process
 *
 * 1. Parse the body and check the password and login formats
 * 2. Hash the password with Argon2id on a blocking worker
 * 3. Store the credential under a fresh UUID v4 id
 * 4. Issue a 24 hour token
 * 5. Return `201 Created` with the id, login and token
 */

use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::backend::auth::handlers::types::{AuthRequest, AuthResponse};
use crate::backend::auth::users::{Credential, StoreError};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Sign up handler
///
/// # Errors
///
/// * `400 Bad Request` - Unparseable body, or login/password breaking the format rules
/// * `409 Conflict` - The login is taken
/// * `500 Internal Server Error` - Hashing, storage or token issuance failed
///
/// # Example Request
///
/// ```http
/// POST /api/signup HTTP/1.1
/// Content-Type: application/json
///
/// {"login": "bob_1", "password": "Test2025!"}
/// ```
///
/// # Example Response
///
/// ```json
/// {"id": "123e4567-e89b-42d3-a456-426614174000", "login": "bob_1", "token": "eyJhbGciOiJIUzI1NiIs..."}
/// ```
pub async fn signup(
    state: AppState,
    req: Request,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    let request = AuthRequest::from_request(req, &()).await?;
    request.validate()?;
    tracing::info!(login = %request.login, "Signup request");

    let hasher = state.hasher.clone();
    let password = request.password;
    let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password, None))
        .await
        .map_err(|e| {
            tracing::error!("Password hashing task failed: {:?}", e);
            BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "user creation error")
        })?
        .map_err(|e| {
            tracing::error!("Failed to hash password: {}", e);
            BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "user creation error")
        })?;

    let credential = Credential {
        id: Uuid::new_v4().to_string(),
        login: request.login,
        password_hash,
    };
    let (id, login) = (credential.id.clone(), credential.login.clone());

    state.users.insert(credential).map_err(|e| {
        match &e {
            StoreError::AlreadyExists(login) => tracing::warn!(%login, "Login already taken"),
            StoreError::Unavailable(reason) => tracing::error!("Failed to store user: {}", reason),
        }
        BackendError::from(e)
    })?;

    let token = state.tokens.issue_for(&id, &login)?;

    tracing::info!(%id, %login, "User created");
    Ok((StatusCode::CREATED, Json(AuthResponse { id, login, token })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::handlers::test_support::{json_request, light_state};
    use crate::backend::auth::sessions::extract_subject_id;

    #[tokio::test]
    async fn test_signup_success() {
        let state = light_state("secret");
        let (status, Json(response)) = signup(
            state.clone(),
            json_request("/api/signup", "bob_1", "Test2025!"),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(response.login, "bob_1");
        assert!(Uuid::parse_str(&response.id).is_ok());

        let claims = state.tokens.validate(&response.token).unwrap();
        assert_eq!(extract_subject_id(&claims).unwrap(), response.id);

        let stored = state.users.find_by_login("bob_1").unwrap().unwrap();
        assert_eq!(stored.id, response.id);
        assert!(state.hasher.verify(&stored.password_hash, "Test2025!"));
    }

    #[tokio::test]
    async fn test_signup_invalid_formats() {
        let state = light_state("secret");

        let err = signup(state.clone(), json_request("/api/signup", "bob_1", "weak"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "incorrect password format");

        let err = signup(state, json_request("/api/signup", "b", "Test2025!"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "incorrect login format");
    }

    #[tokio::test]
    async fn test_signup_duplicate_login() {
        let state = light_state("secret");
        let (status, _) = signup(state.clone(), json_request("/api/signup", "bob_1", "Test2025!"))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let err = signup(state, json_request("/api/signup", "bob_1", "Other2025!"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.message(), "user with this login already exists");
    }

    #[tokio::test]
    async fn test_signup_without_secret() {
        let state = light_state("");

        let err = signup(state, json_request("/api/signup", "bob_1", "Test2025!"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "token generation error");
    }
}
