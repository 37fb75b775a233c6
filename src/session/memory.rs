//! In-memory token store.

use super::{SessionError, SessionResult, TokenStore};
use std::collections::HashMap;
use std::sync::RwLock;

/// Process-local key-value store
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryStore {
    fn get_item(&self, key: &str) -> SessionResult<Option<String>> {
        let items = self
            .items
            .read()
            .map_err(|e| SessionError::Lock(e.to_string()))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> SessionResult<()> {
        let mut items = self
            .items
            .write()
            .map_err(|e| SessionError::Lock(e.to_string()))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> SessionResult<()> {
        let mut items = self
            .items
            .write()
            .map_err(|e| SessionError::Lock(e.to_string()))?;
        items.remove(key);
        Ok(())
    }
}
