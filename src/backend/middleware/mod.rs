//! Middleware Module
//!
//! This module contains the HTTP middleware for the backend server. Each
//! middleware is a [`Middleware`](crate::backend::routes::chain::Middleware)
//! value registered on the router, globally or inside a group.
//!
//! - **`auth`** - Bearer token gate for protected routes
//! - **`headers`** - CORS and Content-Security-Policy headers
//! - **`logging`** - Per-request tracing span and completion log
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use adboard::backend::auth::sessions::TokenService;
//! use adboard::backend::middleware::AuthGate;
//! use adboard::backend::routes::chain::handler_fn;
//! use adboard::backend::routes::mux::Router;
//!
//! let tokens = Arc::new(TokenService::new("secret"));
//! let mut router = Router::new();
//! router.group(|g| {
//!     g.use_middleware(AuthGate::new(tokens).layer());
//!     g.handle("GET /private", handler_fn(|_req| async { "ok" }));
//! });
//! ```

pub mod auth;
pub mod headers;
pub mod logging;

pub use auth::{extract_identity, AuthError, AuthGate, Identity};
pub use headers::{content_security_policy, cors};
pub use logging::request_logging;
