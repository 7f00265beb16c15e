//! Token persistence backends
//!
//! The interceptor never talks to a concrete storage mechanism; it holds a
//! `TokenStore` chosen by the composition root. The two reference storage
//! flavors (generic key-value storage and cookies) collapse into this one
//! abstraction with interchangeable backends.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;

use super::token::Token;

/// Errors that can occur during token storage operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing document could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Keyring operation failed
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    /// A previous panic poisoned the in-memory store lock
    #[error("Token store lock poisoned")]
    Poisoned,
}

/// Persistence backend for the single bearer token.
///
/// Implementations must store the token whole or not at all; a reader never
/// observes a partially written value. `get` returning `Ok(None)` and a
/// stored empty string are the same thing: no token.
pub trait TokenStore: Send + Sync {
    /// Returns the stored token, if any.
    fn get(&self) -> Result<Option<Token>, StoreError>;

    /// Stores a token, replacing any previous one.
    fn set(&self, token: &Token) -> Result<(), StoreError>;

    /// Removes the stored token.
    ///
    /// Returns `Ok(true)` if a token was removed, `Ok(false)` if none was
    /// stored.
    fn clear(&self) -> Result<bool, StoreError>;
}

/// In-memory token store.
///
/// Useful for tests and for hosts whose token should not outlive the
/// process.
#[derive(Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<Token>>,
}

impl MemoryTokenStore {
    /// Creates an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Result<Option<Token>, StoreError> {
        let slot = self.slot.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(slot.clone())
    }

    fn set(&self, token: &Token) -> Result<(), StoreError> {
        let mut slot = self.slot.lock().map_err(|_| StoreError::Poisoned)?;
        *slot = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<bool, StoreError> {
        let mut slot = self.slot.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(slot.take().is_some())
    }
}

/// File-backed token store.
///
/// Keeps a single JSON document at a caller-supplied path, keyed by the
/// configured storage key:
///
/// ```json
/// { "jwt": "<token>" }
/// ```
///
/// The document is rewritten whole on every change, which is sufficient for
/// the single-writer host model. A missing file reads as "no token".
pub struct FileTokenStore {
    path: PathBuf,
    key: String,
}

impl FileTokenStore {
    /// Creates a store backed by the given file, using `key` as the JSON
    /// field name for the token.
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    /// Returns the path of the backing file
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn load_document(&self) -> Result<HashMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save_document(&self, document: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(document)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Result<Option<Token>, StoreError> {
        let document = self.load_document()?;
        Ok(document.get(&self.key).cloned().and_then(Token::new))
    }

    fn set(&self, token: &Token) -> Result<(), StoreError> {
        let mut document = self.load_document()?;
        document.insert(self.key.clone(), token.as_str().to_string());
        self.save_document(&document)
    }

    fn clear(&self) -> Result<bool, StoreError> {
        let mut document = self.load_document()?;
        let removed = document.remove(&self.key).is_some();
        if removed {
            self.save_document(&document)?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(value: &str) -> Token {
        Token::new(value).unwrap()
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryTokenStore::new();
        assert!(store.get().unwrap().is_none());

        store.set(&token("jwt-1")).unwrap();
        assert_eq!(store.get().unwrap().unwrap(), "jwt-1");
    }

    #[test]
    fn test_memory_store_overwrite() {
        let store = MemoryTokenStore::new();
        store.set(&token("first")).unwrap();
        store.set(&token("second")).unwrap();
        assert_eq!(store.get().unwrap().unwrap(), "second");
    }

    #[test]
    fn test_memory_store_clear() {
        let store = MemoryTokenStore::new();
        assert!(!store.clear().unwrap());

        store.set(&token("jwt")).unwrap();
        assert!(store.clear().unwrap());
        assert!(store.get().unwrap().is_none());
    }

    #[test]
    fn test_file_store_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("identity.json"), "jwt");
        assert!(store.get().unwrap().is_none());
        assert!(!store.clear().unwrap());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("identity.json");

        let store = FileTokenStore::new(&path, "jwt");
        store.set(&token("jwt-file")).unwrap();
        assert_eq!(store.get().unwrap().unwrap(), "jwt-file");

        // A fresh instance over the same file sees the token
        let reopened = FileTokenStore::new(&path, "jwt");
        assert_eq!(reopened.get().unwrap().unwrap(), "jwt-file");
    }

    #[test]
    fn test_file_store_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("identity.json"), "jwt");

        store.set(&token("jwt")).unwrap();
        assert!(store.clear().unwrap());
        assert!(store.get().unwrap().is_none());
        assert!(!store.clear().unwrap());
    }

    #[test]
    fn test_file_store_keys_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("identity.json");

        let jwt = FileTokenStore::new(&path, "jwt");
        let other = FileTokenStore::new(&path, "other");

        jwt.set(&token("a")).unwrap();
        other.set(&token("b")).unwrap();

        assert_eq!(jwt.get().unwrap().unwrap(), "a");
        assert_eq!(other.get().unwrap().unwrap(), "b");

        jwt.clear().unwrap();
        assert!(jwt.get().unwrap().is_none());
        assert_eq!(other.get().unwrap().unwrap(), "b");
    }

    #[test]
    fn test_file_store_empty_value_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("identity.json");
        std::fs::write(&path, r#"{ "jwt": "" }"#).unwrap();

        let store = FileTokenStore::new(&path, "jwt");
        assert!(store.get().unwrap().is_none());
    }

    #[test]
    fn test_file_store_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("identity.json");

        let store = FileTokenStore::new(&path, "jwt");
        store.set(&token("jwt")).unwrap();
        assert!(path.exists());
    }
}
