//! Key-value session stores
//!
//! Both stores expose the same string key-value surface as browser local
//! storage. [`FileStore`] persists it as a flat JSON object.

use super::error::{SessionError, SessionResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Persisted string key-value storage
pub trait SessionStore: Send + Sync {
    /// Read the value stored under `key`
    fn get_item(&self, key: &str) -> SessionResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> SessionResult<()>;

    /// Remove `key`; removing an absent key is not an error
    fn remove_item(&self, key: &str) -> SessionResult<()>;
}

fn lock_error<T>(err: std::sync::PoisonError<T>) -> SessionError {
    SessionError::Lock(err.to_string())
}

/// In-process store, lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get_item(&self, key: &str) -> SessionResult<Option<String>> {
        let items = self.items.read().map_err(lock_error)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> SessionResult<()> {
        let mut items = self.items.write().map_err(lock_error)?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> SessionResult<()> {
        let mut items = self.items.write().map_err(lock_error)?;
        items.remove(key);
        Ok(())
    }
}

/// Store backed by a JSON file
///
/// The whole map is cached in memory and rewritten on every mutation. Writes
/// go to a sibling temp file first and are renamed into place so a crash never
/// leaves a half-written session behind. The cache only changes once the file
/// write succeeds.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    items: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> SessionResult<Self> {
        let path = path.as_ref().to_path_buf();

        let items = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(path = ?path, entries = items.len(), "Opened session file");

        Ok(Self {
            path,
            items: RwLock::new(items),
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, items: &BTreeMap<String, String>) -> SessionResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(items)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn get_item(&self, key: &str) -> SessionResult<Option<String>> {
        let items = self.items.read().map_err(lock_error)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> SessionResult<()> {
        let mut items = self.items.write().map_err(lock_error)?;
        let mut next = items.clone();
        next.insert(key.to_string(), value.to_string());
        self.persist(&next)?;
        *items = next;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> SessionResult<()> {
        let mut items = self.items.write().map_err(lock_error)?;
        if !items.contains_key(key) {
            return Ok(());
        }

        let mut next = items.clone();
        next.remove(key);
        self.persist(&next)?;
        *items = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert_eq!(store.get_item("token").unwrap(), None);

        store.set_item("token", "abc").unwrap();
        assert_eq!(store.get_item("token").unwrap().as_deref(), Some("abc"));

        store.set_item("token", "def").unwrap();
        assert_eq!(store.get_item("token").unwrap().as_deref(), Some("def"));

        store.remove_item("token").unwrap();
        store.remove_item("token").unwrap();
        assert_eq!(store.get_item("token").unwrap(), None);
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path().join("session.json")).unwrap();

        assert_eq!(store.get_item("token").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_store_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        {
            let store = FileStore::open(&path).unwrap();
            store.set_item("token", "abc").unwrap();
            store.set_item("user", r#"{"id":1}"#).unwrap();
        }

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get_item("token").unwrap().as_deref(), Some("abc"));
        assert_eq!(store.get_item("user").unwrap().as_deref(), Some(r#"{"id":1}"#));

        store.remove_item("token").unwrap();
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get_item("token").unwrap(), None);
        assert!(reopened.get_item("user").unwrap().is_some());
    }

    #[test]
    fn test_file_store_failed_write_leaves_value_unset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileStore::open(&path).unwrap();

        // A directory in the temp file's place makes every write fail
        std::fs::create_dir(path.with_extension("json.tmp")).unwrap();

        assert!(store.set_item("token", "abc").is_err());
        assert_eq!(store.get_item("token").unwrap(), None);
        assert!(!path.exists());
    }

    #[test]
    fn test_file_store_failed_remove_keeps_value() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileStore::open(&path).unwrap();
        store.set_item("token", "abc").unwrap();

        std::fs::create_dir(path.with_extension("json.tmp")).unwrap();

        assert!(store.remove_item("token").is_err());
        assert_eq!(store.get_item("token").unwrap().as_deref(), Some("abc"));

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get_item("token").unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FileStore::open(&path).unwrap_err();
        assert!(matches!(err, SessionError::Serialization(_)));
    }
}
