//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are used in HTTP handlers and middleware and can be
//! converted to HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Error Kinds
//!
//! - `HandlerError` - Malformed input and conflicts
//! - `Unauthorized` - Authentication failures (missing header, bad token)
//! - `NotFound` - No route matched
//! - `Token` / `Store` - Wrapped failures of the token service and the
//!   credential store

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::BackendError;
