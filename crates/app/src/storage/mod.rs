//! Client Storage
//!
//! Durable key/value documents backing the persisted stores. Every write
//! replaces the whole document; there are no partial updates.

use std::io;

use thiserror::Error;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage key of the persisted cart.
pub const CART_STORAGE_KEY: &str = "cart-storage";

/// Storage key of the persisted auth session.
pub const AUTH_STORAGE_KEY: &str = "auth-storage";

/// Errors raised by a [`DocumentStore`].
#[derive(Debug, Error)]
pub enum StorageError {
    /// Key contains characters that cannot be used as a document name.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// Underlying I/O failure.
    #[error("storage io error for {key}")]
    Io {
        /// Document key
        key: String,

        /// I/O failure
        #[source]
        source: io::Error,
    },

    /// Document could not be encoded or decoded.
    #[error("storage document {key} is not valid JSON")]
    Json {
        /// Document key
        key: String,

        /// Serialization failure
        #[source]
        source: serde_json::Error,
    },
}

/// Whole-document key/value store.
pub trait DocumentStore: Send + Sync {
    /// Load the document stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the document exists but cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the document stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the document cannot be written.
    fn save(&self, key: &str, document: &str) -> Result<(), StorageError>;

    /// Delete the document stored under `key`. Missing documents are not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the document exists but cannot be removed.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
