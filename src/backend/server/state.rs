/**
 * Application State
 *
 * The state shared by every request handler: the token service, the
 * password hasher and the credential store. Cloning is cheap; every field
 * is reference-counted or a small value.
 *
 * # Example
 *
 * ```rust
 * use adboard::backend::auth::password::HashParams;
 * use adboard::backend::server::state::AppState;
 *
 * let state = AppState::in_memory("secret", HashParams::default()).unwrap();
 * assert!(state.tokens.is_configured());
 * ```
 */

use std::sync::Arc;

use crate::backend::auth::password::{HashParams, PasswordError, PasswordHasher};
use crate::backend::auth::sessions::TokenService;
use crate::backend::auth::users::{CredentialStore, MemoryCredentialStore};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    /// Token issuance and validation, also used by the auth gate
    pub tokens: Arc<TokenService>,

    /// Argon2id password hashing
    pub hasher: PasswordHasher,

    /// Credential persistence
    pub users: Arc<dyn CredentialStore>,
}

impl AppState {
    pub fn new(
        tokens: TokenService,
        hasher: PasswordHasher,
        users: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            tokens: Arc::new(tokens),
            hasher,
            users,
        }
    }

    /// State backed by an empty in-memory credential store
    pub fn in_memory(secret: impl Into<String>, params: HashParams) -> Result<Self, PasswordError> {
        Ok(Self::new(
            TokenService::new(secret),
            PasswordHasher::new(params)?,
            Arc::new(MemoryCredentialStore::new()),
        ))
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("tokens", &self.tokens)
            .field("hasher", &self.hasher)
            .finish_non_exhaustive()
    }
}
