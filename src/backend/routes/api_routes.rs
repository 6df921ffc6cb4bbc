/**
 * API Route Handlers
 *
 * This module binds the authentication endpoints.
 *
 * # Routes
 *
 * ## Public
 * - `POST /api/signup` - User registration
 * - `POST /api/signin` - User login
 *
 * ## Protected (bearer token required)
 * - `GET /api/me` - Current identity
 */

use crate::backend::auth::handlers::{get_me, signin, signup};
use crate::backend::middleware::auth::AuthGate;
use crate::backend::routes::chain::{handler_fn, stateful};
use crate::backend::routes::mux::Router;
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// The auth gate is registered inside its own group, so it wraps only the
/// protected routes.
pub fn configure_api_routes(router: &mut Router, state: &AppState) {
    router
        .handle("POST /api/signup", stateful(state.clone(), signup))
        .handle("POST /api/signin", stateful(state.clone(), signin));

    let gate = AuthGate::new(state.tokens.clone());
    router.group(|protected| {
        protected.use_middleware(gate.layer());
        protected.handle("GET /api/me", handler_fn(get_me));
    });
}
