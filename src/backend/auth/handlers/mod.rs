//! Authentication Handlers Module
//!
//! This module contains the HTTP handlers for the authentication endpoints.
//!
//! # Handlers
//!
//! - **`signup`** - `POST /api/signup` - Registration
//! - **`signin`** - `POST /api/signin` - Authentication
//! - **`get_me`** - `GET /api/me` - Current identity (behind the auth gate)
//!
//! Handlers take the request whole and, where they need it, the shared
//! [`AppState`](crate::backend::server::state::AppState); see
//! [`stateful`](crate::backend::routes::chain::stateful).

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Signin handler
pub mod signin;

/// Current identity handler
pub mod me;

pub use types::{AuthRequest, AuthResponse};

pub use me::get_me;
pub use signin::signin;
pub use signup::signup;
