//! Route Configuration Module
//!
//! This module holds the request router and the route table of the backend
//! server.
//!
//! # Architecture
//!
//! - **`chain`** - Handler and middleware primitives, middleware chains
//! - **`mux`** - Pattern router with scope-isolated middleware groups
//! - **`router`** - Application router assembly
//! - **`api_routes`** - Authentication endpoints
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── chain.rs        - Handler, Middleware, MiddlewareChain
//! ├── mux.rs          - Router, Group, RouterService
//! ├── router.rs       - Application router creation
//! └── api_routes.rs   - API endpoint bindings
//! ```
//!
//! # Example
//!
//! ```rust
//! use adboard::backend::routes::chain::{from_fn, handler_fn};
//! use adboard::backend::routes::mux::Router;
//!
//! let mut router = Router::new();
//! router.use_middleware(from_fn(|req, next| async move { next(req).await }));
//! router.handle("GET /health", handler_fn(|_req| async { "ok" }));
//!
//! let app: axum::Router = router.into_axum();
//! ```

/// Handler and middleware primitives
pub mod chain;

/// Pattern router
pub mod mux;

/// Application router creation
pub mod router;

/// API endpoint bindings
pub mod api_routes;

pub use chain::{from_fn, handler_fn, stateful, Handler, Middleware, MiddlewareChain};
pub use mux::{Group, PatternError, RoutePattern, Router, RouterService};
pub use router::create_router;
