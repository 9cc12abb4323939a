//! File-backed document store.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::debug;

use super::{DocumentStore, StorageError, validate_key};

/// Stores one JSON file per key inside a directory.
///
/// Writes go to a temporary sibling file which is then renamed over the
/// document, so a reader never observes a half-written document.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();

        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            key: dir.display().to_string(),
            source,
        })?;

        Ok(Self { dir })
    }

    /// Directory holding the documents.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;

        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl DocumentStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path(key)?;

        match fs::read_to_string(&path) {
            Ok(document) => Ok(Some(document)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn save(&self, key: &str, document: &str) -> Result<(), StorageError> {
        let path = self.path(key)?;
        let temp = self.dir.join(format!(".{key}.json.tmp"));

        let io_error = |source: io::Error| StorageError::Io {
            key: key.to_string(),
            source,
        };

        fs::write(&temp, document).map_err(io_error)?;
        fs::rename(&temp, &path).map_err(io_error)?;

        debug!(key, bytes = document.len(), "saved document");

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path(key)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn missing_document_loads_as_none() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileStore::open(dir.path())?;

        assert_eq!(store.load("cart-storage")?, None);

        Ok(())
    }

    #[test]
    fn saved_document_survives_reopening() -> TestResult {
        let dir = tempfile::tempdir()?;

        FileStore::open(dir.path())?.save("cart-storage", r#"{"items":[]}"#)?;

        let reopened = FileStore::open(dir.path())?;

        assert_eq!(
            reopened.load("cart-storage")?.as_deref(),
            Some(r#"{"items":[]}"#)
        );
        assert!(!dir.path().join(".cart-storage.json.tmp").exists());

        Ok(())
    }

    #[test]
    fn save_replaces_whole_document() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileStore::open(dir.path())?;

        store.save("auth-storage", "first document")?;
        store.save("auth-storage", "second")?;

        assert_eq!(store.load("auth-storage")?.as_deref(), Some("second"));

        Ok(())
    }

    #[test]
    fn remove_is_idempotent() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileStore::open(dir.path())?;

        store.save("auth-storage", "{}")?;
        store.remove("auth-storage")?;
        store.remove("auth-storage")?;

        assert_eq!(store.load("auth-storage")?, None);

        Ok(())
    }

    #[test]
    fn open_creates_nested_directory() -> TestResult {
        let dir = tempfile::tempdir()?;
        let nested = dir.path().join("state").join("crumb");

        let store = FileStore::open(&nested)?;

        assert!(nested.is_dir());
        assert_eq!(store.dir(), nested.as_path());

        Ok(())
    }
}
