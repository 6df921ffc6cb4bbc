//! Authentication Module
//!
//! This module handles registration, sign in and token management.
//!
//! # Architecture
//!
//! - **`password`** - Argon2id password hashing and verification
//! - **`sessions`** - Signed, expiring identity tokens
//! - **`users`** - Credential model and storage
//! - **`validation`** - Login and password format rules
//! - **`handlers`** - HTTP handlers for the authentication endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── password.rs     - PasswordHasher
//! ├── sessions.rs     - TokenService
//! ├── users.rs        - Credential and CredentialStore
//! ├── validation.rs   - Format rules
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Request/response types
//!     ├── signup.rs   - Registration handler
//!     ├── signin.rs   - Authentication handler
//!     └── me.rs       - Current identity handler
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup**: login and password → credential stored → token returned
//! 2. **Signin**: login and password → hash verified → token returned
//! 3. **Me**: bearer token → validated by the auth gate → identity returned
//!
//! # Security
//!
//! - Passwords are hashed with Argon2id (1 pass, 64 MiB, 4 lanes) and an 8 byte random salt
//! - Tokens are HS256-signed and expire after 24 hours
//! - Unknown logins and wrong passwords return the same 401

/// Argon2id password hashing
pub mod password;

/// Token issuance and validation
pub mod sessions;

/// Credential model and storage
pub mod users;

/// Login and password format rules
pub mod validation;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{get_me, signin, signup, AuthRequest, AuthResponse};
pub use password::{HashParams, PasswordHasher};
pub use sessions::{Claims, TokenError, TokenService};
pub use users::{Credential, CredentialStore, MemoryCredentialStore};
