/**
 * Router Configuration
 *
 * This module assembles the application router: global middleware first,
 * then the API routes.
 *
 * # Global Middleware Order
 *
 * 1. Request logging (outermost, sees the final status)
 * 2. CORS headers
 * 3. Content-Security-Policy header
 *
 * Requests matching no route get the JSON `404` response, with the global
 * middleware still applied.
 */

use crate::backend::middleware::{content_security_policy, cors, request_logging};
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::mux::{Router, RouterService};
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;

/// Create the application router
pub fn create_router(state: &AppState, config: &ServerConfig) -> RouterService {
    let mut router = Router::new();
    router
        .use_middleware(request_logging())
        .use_middleware(cors(config.cors_allowed_origin.clone()))
        .use_middleware(content_security_policy());

    configure_api_routes(&mut router, state);

    router.into_service()
}
