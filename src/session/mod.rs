//! Session Storage
//!
//! The bearer token lives in a small key-value store, the way a browser keeps
//! it in local storage. [`Session`] binds a store to the key the token is kept
//! under and is handed explicitly to the API client and the views.
//!
//! ## Stores
//!
//! - [`FileStore`]: JSON file on disk, survives between runs
//! - [`MemoryStore`]: process-local map, used by tests and embedders

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Default storage key for the bearer token
pub const DEFAULT_TOKEN_KEY: &str = "token";

/// Persistent key-value storage for client-side state
pub trait TokenStore: Send + Sync {
    /// Read the value stored under `key`
    fn get_item(&self, key: &str) -> SessionResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> SessionResult<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove_item(&self, key: &str) -> SessionResult<()>;
}

/// Session context shared by the API client and the views
///
/// Cloning is cheap; all clones see the same underlying store.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
    key: String,
}

impl Session {
    /// Create a session over `store` using the default token key
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self::with_key(store, DEFAULT_TOKEN_KEY)
    }

    /// Create a session over `store` using a custom token key
    pub fn with_key(store: Arc<dyn TokenStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Storage key the token is kept under
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current token, if any
    ///
    /// An empty stored value counts as no token.
    pub fn token(&self) -> SessionResult<Option<String>> {
        Ok(self
            .store
            .get_item(&self.key)?
            .filter(|token| !token.is_empty()))
    }

    /// Store a freshly issued token
    pub fn set_token(&self, token: &str) -> SessionResult<()> {
        self.store.set_item(&self.key, token)?;
        tracing::debug!(key = %self.key, "Session token stored");
        Ok(())
    }

    /// Forget the token
    pub fn clear(&self) -> SessionResult<()> {
        self.store.remove_item(&self.key)?;
        tracing::debug!(key = %self.key, "Session token cleared");
        Ok(())
    }

    /// Whether a token is currently stored
    pub fn is_authenticated(&self) -> bool {
        matches!(self.token(), Ok(Some(_)))
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print the token itself
        f.debug_struct("Session")
            .field("key", &self.key)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

/// Errors raised by token stores
#[derive(Error, Debug)]
pub enum SessionError {
    /// Reading or writing the backing file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Backing file contents are not a valid key-value document
    #[error("Corrupt session file: {0}")]
    Corrupt(String),

    /// Lock acquisition failed
    #[error("Lock error: {0}")]
    Lock(String),
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Corrupt(err.to_string())
    }
}

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;
