// ── Session token persistence ──
//
// A single opaque token lives under one fixed key in a key-value store.
// The backend is injected, so views never reach for ambient global state
// and tests can substitute an in-memory store.

mod file;
mod keyring_store;
mod memory;

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::error::StoreError;

pub use self::file::JsonFileStore;
pub use self::keyring_store::KeyringStore;
pub use self::memory::MemoryStore;

/// The key the session token is stored under.
pub const TOKEN_KEY: &str = "token";

/// Minimal persistent key-value interface (the shape of browser local storage).
pub trait KeyValueStore: Send + Sync {
    /// Read a value; `None` if never set or removed.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a value. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Token accessors over an injected [`KeyValueStore`].
///
/// Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct TokenStore {
    backend: Arc<dyn KeyValueStore>,
}

impl TokenStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// A store backed by process memory only.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::default()))
    }

    /// The stored token, or `None` if there is no session.
    ///
    /// A blank value is no session.
    pub fn get_token(&self) -> Result<Option<SecretString>, StoreError> {
        Ok(self
            .backend
            .get(TOKEN_KEY)?
            .filter(|token| !token.trim().is_empty())
            .map(SecretString::from))
    }

    /// Store `token`, overwriting any previous one.
    pub fn set_token(&self, token: &SecretString) -> Result<(), StoreError> {
        debug!("storing session token");
        self.backend.set(TOKEN_KEY, token.expose_secret())
    }

    /// Forget the token. Succeeds when there is none.
    pub fn clear_token(&self) -> Result<(), StoreError> {
        debug!("clearing session token");
        self.backend.remove(TOKEN_KEY)
    }

    /// Whether a token is currently stored.
    pub fn has_token(&self) -> Result<bool, StoreError> {
        Ok(self.get_token()?.is_some())
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore").finish_non_exhaustive()
    }
}
