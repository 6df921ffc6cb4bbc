/*!
 * Credentials and Credential Storage
 *
 * A credential binds a unique login to an identity id and a password hash.
 * Credentials are created at signup, read at signin and never modified.
 *
 * Persistence lives behind [`CredentialStore`]; the in-memory
 * implementation backs the server binary and the tests.
 */

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

/// Credential store errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A credential with this login already exists
    #[error("user with login '{0}' already exists")]
    AlreadyExists(String),

    /// The store could not serve the request
    #[error("credential store unavailable: {0}")]
    Unavailable(String),
}

/// Stored credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// Identity id (UUID v4 string)
    pub id: String,
    /// Unique login
    pub login: String,
    /// `salt ++ derived_key`, see [`password`](super::password)
    pub password_hash: Vec<u8>,
}

/// Storage for credentials
pub trait CredentialStore: Send + Sync {
    /// Insert a new credential; logins are unique
    fn insert(&self, credential: Credential) -> Result<(), StoreError>;

    /// Look a credential up by login
    fn find_by_login(&self, login: &str) -> Result<Option<Credential>, StoreError>;
}

/// In-memory credential store keyed by login
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    users: RwLock<HashMap<String, Credential>>,
}

impl MemoryCredentialStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored credentials
    pub fn len(&self) -> usize {
        self.users.read().map(|users| users.len()).unwrap_or(0)
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn insert(&self, credential: Credential) -> Result<(), StoreError> {
        let mut users = self
            .users
            .write()
            .map_err(|e| StoreError::Unavailable(format!("Lock poisoned: {}", e)))?;

        if users.contains_key(&credential.login) {
            return Err(StoreError::AlreadyExists(credential.login));
        }

        users.insert(credential.login.clone(), credential);
        Ok(())
    }

    fn find_by_login(&self, login: &str) -> Result<Option<Credential>, StoreError> {
        let users = self
            .users
            .read()
            .map_err(|e| StoreError::Unavailable(format!("Lock poisoned: {}", e)))?;

        Ok(users.get(login).cloned())
    }
}
