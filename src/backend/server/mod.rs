//! Server Module
//!
//! This module contains the code that configures and assembles the axum
//! application.
//!
//! # Architecture
//!
//! - **`config`** - Configuration loading from the environment
//! - **`state`** - Shared handler state
//! - **`init`** - Application assembly
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `ServerConfig::from_env`
//! 2. **State Creation**: token service, password hasher, credential store
//! 3. **Router Creation**: global middleware, public and protected routes
//!
//! # Example
//!
//! ```rust
//! use adboard::backend::server::{create_app, ServerConfig};
//!
//! let config = ServerConfig::from_lookup(|_| None).unwrap();
//! let app: axum::Router = create_app(&config).unwrap();
//! ```

/// Server configuration loading
pub mod config;

/// Shared handler state
pub mod state;

/// Application assembly
pub mod init;

pub use config::{ConfigError, ServerConfig};
pub use init::{app_with_state, create_app};
pub use state::AppState;
