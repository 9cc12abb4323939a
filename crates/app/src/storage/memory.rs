//! In-memory document store.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use super::{DocumentStore, StorageError, validate_key};

/// Document store held in process memory. Clones share the same documents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one document.
    pub fn with_document(key: &str, document: &str) -> Self {
        let store = Self::new();

        store
            .documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), document.to_string());

        store
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;

        Ok(self
            .documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn save(&self, key: &str, document: &str) -> Result<(), StorageError> {
        validate_key(key)?;

        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), document.to_string());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;

        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);

        Ok(())
    }
}
