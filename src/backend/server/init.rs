/**
 * Server Initialization
 *
 * This module builds the application from its configuration: the shared
 * state first, then the router over it.
 */

use axum::Router;

use crate::backend::auth::password::{HashParams, PasswordError};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;

/// Create and configure the application
///
/// Credentials live in memory and are lost on restart.
///
/// # Errors
///
/// Fails only if the default Argon2id parameters are rejected.
pub fn create_app(config: &ServerConfig) -> Result<Router, PasswordError> {
    tracing::info!("Initializing adboard backend server");

    let state = AppState::in_memory(config.jwt_secret.clone(), HashParams::default())?;
    Ok(app_with_state(&state, config))
}

/// Create the application over existing state
pub fn app_with_state(state: &AppState, config: &ServerConfig) -> Router {
    Router::new().fallback_service(create_router(state, config))
}
