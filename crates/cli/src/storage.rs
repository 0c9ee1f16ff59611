//! File-backed key/value storage.
//!
//! Each key is one file inside the data directory. Writes go to a temporary
//! file in the same directory and are renamed over the target, so a reader
//! never sees a half-written snapshot.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use quotedesk_core::{Storage, StorageError};
use tempfile::NamedTempFile;
use tracing::debug;

/// Storage rooted at a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (creating if needed) the storage directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| backend_error(&dir.display().to_string(), &e))?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
        if !valid {
            return Err(StorageError::Backend {
                key: key.to_owned(),
                message: "key is not a valid file name".to_owned(),
            });
        }
        Ok(self.dir.join(key))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => {
                debug!(key, bytes = value.len(), "storage read");
                Ok(Some(value))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(backend_error(key, &e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let write = || -> io::Result<()> {
            let mut tmp = NamedTempFile::new_in(&self.dir)?;
            tmp.write_all(value.as_bytes())?;
            tmp.as_file().sync_all()?;
            tmp.persist(&path).map_err(|e| e.error)?;
            Ok(())
        };
        write().map_err(|e| backend_error(key, &e))?;
        debug!(key, bytes = value.len(), "storage write");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(backend_error(key, &e)),
        }
    }
}

fn backend_error(key: &str, e: &io::Error) -> StorageError {
    match e.kind() {
        io::ErrorKind::StorageFull | io::ErrorKind::QuotaExceeded => StorageError::QuotaExceeded {
            key: key.to_owned(),
        },
        _ => StorageError::Backend {
            key: key.to_owned(),
            message: e.to_string(),
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use quotedesk_core::storage::{QUOTES_KEY, THEME_KEY};

    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::open(dir.path()).unwrap();
        assert_eq!(storage.get(QUOTES_KEY).unwrap(), None);

        storage.set(QUOTES_KEY, "[]").unwrap();
        storage.set(QUOTES_KEY, "[1]").unwrap();
        assert_eq!(storage.get(QUOTES_KEY).unwrap().as_deref(), Some("[1]"));
        assert!(dir.path().join(QUOTES_KEY).is_file());

        storage.remove(QUOTES_KEY).unwrap();
        assert_eq!(storage.get(QUOTES_KEY).unwrap(), None);
        storage.remove(QUOTES_KEY).unwrap();
    }

    #[test]
    fn test_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let mut storage = FileStorage::open(&nested).unwrap();
        storage.set(THEME_KEY, "dark").unwrap();
        assert_eq!(
            fs::read_to_string(nested.join(THEME_KEY)).unwrap(),
            "dark"
        );
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::open(dir.path()).unwrap();
        assert!(storage.set("../escape", "x").is_err());
        assert!(storage.get(".hidden").is_err());
        assert!(storage.get("").is_err());
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::open(dir.path()).unwrap();
        storage.set(THEME_KEY, "light").unwrap();
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
