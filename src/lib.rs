//! Adboard - Authentication Core
//!
//! The backend core of a small classified-ads service: a request router
//! with scope-isolated middleware groups, Argon2id password hashing,
//! HS256 identity tokens and the middleware gate that turns a bearer token
//! into a typed caller identity.
//!
//! # Module Structure
//!
//! - **`backend`** - Everything server-side
//!   - `routes` - Router, middleware chains, route table
//!   - `auth` - PasswordHasher, TokenService, credentials, handlers
//!   - `middleware` - AuthGate, CORS/CSP, request logging
//!   - `server` - Configuration, state, app assembly
//!   - `error` - `BackendError` and its JSON response form
//!
//! # Usage
//!
//! ```rust,no_run
//! use adboard::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config)?;
//! let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Endpoints
//!
//! - `POST /api/signup` - Register, returns `{id, login, token}`
//! - `POST /api/signin` - Sign in, returns `{id, login, token}`
//! - `GET /api/me` - Current identity, requires `Authorization: Bearer <token>`

/// Backend server-side code
pub mod backend;
