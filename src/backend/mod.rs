//! Backend Module
//!
//! This module contains all server-side code for the adboard API: request
//! routing with scoped middleware, authentication and the axum server setup.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, shared state and application assembly
//! - **`routes`** - Router engine and route table
//! - **`auth`** - Password hashing, tokens, credentials and auth handlers
//! - **`middleware`** - Auth gate, CORS/CSP headers, request logging
//! - **`error`** - Backend error type and its HTTP conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary entry point
//! ├── server/         - Configuration, state, initialization
//! ├── routes/         - Router and route table
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! 1. The router resolves the `"METHOD /path"` pattern
//! 2. Global middleware wraps the resolved handler (logging, CORS, CSP)
//! 3. For protected routes, the auth gate validates the bearer token and
//!    attaches the caller's identity, or answers `401` itself
//! 4. The handler runs
//!
//! # Thread Safety
//!
//! Once serving starts the route table is read-only and shared behind an
//! `Arc`. The credential store synchronizes internally; the token service
//! and password hasher are immutable.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

pub use error::BackendError;
pub use server::create_app;
