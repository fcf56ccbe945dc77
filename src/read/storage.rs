//! Key/value storage backends for persisted reader state.
//!
//! Mirrors browser local storage: string keys, string values, synchronous
//! access. Values are replaced atomically (write to a temporary file, then
//! rename); there is no transaction across processes and the last writer
//! wins.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors that can occur while accessing storage
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Synchronous string key/value store
pub trait Storage {
    /// Read the value for `key`, `None` if never written
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value for `key`
    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Keys are used as file names, so keep them to a safe alphabet
fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/// File-backed storage: one `<key>.json` file per key, plus a `<key>.lock`
/// file taken while writing
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create storage rooted at `dir` (created lazily on first save)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Open storage in the configured location
    pub fn open_default() -> anyhow::Result<Self> {
        Ok(Self::new(crate::config::storage_dir()?))
    }

    /// Get the storage directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Get the file backing `key`
    pub fn entry_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.entry_path(key)?;

        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.entry_path(key)?;

        fs::create_dir_all(&self.dir)?;

        // Serializes writers; released when `lock` drops
        let lock = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.dir.join(format!("{}.lock", key)))?;
        lock.lock_exclusive()?;

        // Readers see either the old value or the new one, never a partial write
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| e.error)?;

        Ok(())
    }
}

/// In-memory storage, also usable as a failing test double
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    unavailable: bool,
}

impl MemoryStorage {
    /// Create empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage pre-populated with one entry
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut storage = Self::new();
        storage.entries.insert(key.into(), value.into());
        storage
    }

    /// Make every subsequent load and save fail
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    /// Inspect a stored value without going through [`Storage`]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        if self.unavailable {
            return Err(StorageError::Unavailable("memory storage disabled".to_string()));
        }
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        if self.unavailable {
            return Err(StorageError::Unavailable("memory storage disabled".to_string()));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("readDocuments").is_ok());
        assert!(validate_key("read-documents_2").is_ok());
        assert!(matches!(validate_key(""), Err(StorageError::InvalidKey(_))));
        assert!(matches!(
            validate_key("../escape"),
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_file_storage_missing_key() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path().join("storage"));

        assert_eq!(storage.load("readDocuments").unwrap(), None);
        assert!(!storage.dir().exists());
    }

    #[test]
    fn test_file_storage_save_and_overwrite() {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::new(temp.path().join("storage"));

        storage.save("readDocuments", r#"["a","b","c"]"#).unwrap();
        storage.save("readDocuments", r#"["a"]"#).unwrap();

        assert_eq!(
            storage.load("readDocuments").unwrap().as_deref(),
            Some(r#"["a"]"#)
        );
        assert!(temp.path().join("storage/readDocuments.json").exists());
    }

    #[test]
    fn test_file_storage_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::new(temp.path());

        for n in 0..3 {
            storage.save("readDocuments", &format!("[\"{}\"]", n)).unwrap();
        }

        let mut names: Vec<String> = std::fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["readDocuments.json", "readDocuments.lock"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_reader_mid_write_sees_whole_value() {
        use std::io::{Read, Seek, SeekFrom};

        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::new(temp.path());
        storage.save("readDocuments", r#"["a","b","c"]"#).unwrap();

        // A reader that opened the file before the write keeps the old value
        let mut reader = std::fs::File::open(temp.path().join("readDocuments.json")).unwrap();
        storage.save("readDocuments", r#"["a","b","c","d"]"#).unwrap();

        let mut old = String::new();
        reader.seek(SeekFrom::Start(0)).unwrap();
        reader.read_to_string(&mut old).unwrap();
        assert_eq!(old, r#"["a","b","c"]"#);

        assert_eq!(
            storage.load("readDocuments").unwrap().as_deref(),
            Some(r#"["a","b","c","d"]"#)
        );
    }

    #[test]
    fn test_file_storage_unwritable_dir() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let mut storage = FileStorage::new(blocker.join("storage"));
        assert!(matches!(
            storage.save("readDocuments", "[]"),
            Err(StorageError::Io(_))
        ));
    }

    #[test]
    fn test_memory_storage_unavailable() {
        let mut storage = MemoryStorage::with_entry("readDocuments", "[]");
        storage.set_unavailable(true);

        assert!(matches!(
            storage.load("readDocuments"),
            Err(StorageError::Unavailable(_))
        ));
        assert!(storage.save("readDocuments", "[\"x\"]").is_err());
        assert_eq!(storage.get("readDocuments"), Some("[]"));
    }
}
