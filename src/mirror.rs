//! Persistent mirror of the cart state.
//!
//! The mirror is a synchronous string-keyed store, the equivalent of browser
//! local storage: `get` returns the previously stored value for a key (if
//! any) and `set` overwrites it wholesale. The cart store treats the mirror
//! as exclusively its own; no other writer is assumed.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

/// Errors that can occur when reading or writing the mirror.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data is not valid JSON.
    #[error("mirror file is corrupt: {0}")]
    Parse(#[from] serde_json::Error),

    /// A previous holder of the in-memory lock panicked.
    #[error("mirror lock poisoned")]
    Poisoned,
}

/// Synchronous string-keyed persistent storage.
pub trait CartMirror {
    /// Read the stored value for `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, MirrorError>;

    /// Overwrite the stored value for `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), MirrorError>;
}

/// In-memory mirror for tests and ephemeral sessions.
///
/// Clones share the same underlying map, so a test can hold a handle to the
/// storage a cart store owns and observe what was persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryMirror {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryMirror {
    /// Create an empty in-memory mirror.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartMirror for MemoryMirror {
    fn get(&self, key: &str) -> Result<Option<String>, MirrorError> {
        let map = self.inner.lock().map_err(|_| MirrorError::Poisoned)?;
        Ok(map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), MirrorError> {
        let mut map = self.inner.lock().map_err(|_| MirrorError::Poisoned)?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON-file-backed mirror.
///
/// The file holds a single JSON object mapping keys to stored strings. Reads
/// and writes load and rewrite the whole file; this matches the small,
/// single-key usage of the cart store.
#[derive(Debug, Clone)]
pub struct FileMirror {
    path: PathBuf,
}

impl FileMirror {
    /// Create a mirror backed by the file at `path`.
    ///
    /// The file is created on first `set`; a missing file reads as empty.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<HashMap<String, String>, MirrorError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartMirror for FileMirror {
    fn get(&self, key: &str) -> Result<Option<String>, MirrorError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), MirrorError> {
        let mut map = self.load()?;
        map.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string(&map)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_mirror_clones_share_storage() {
        let mut mirror = MemoryMirror::new();
        let handle = mirror.clone();

        mirror.set("cart", "[]").unwrap();
        assert_eq!(handle.get("cart").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn file_mirror_reads_missing_file_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mirror = FileMirror::new(dir.path().join("cart.json"));
        assert!(mirror.get("cart").unwrap().is_none());
    }

    #[test]
    fn file_mirror_round_trips_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");

        let mut mirror = FileMirror::new(&path);
        mirror.set("cart", r#"[{"id":1}]"#).unwrap();
        mirror.set("other", "x").unwrap();

        // A fresh mirror over the same file sees both keys
        let reopened = FileMirror::new(&path);
        assert_eq!(
            reopened.get("cart").unwrap().as_deref(),
            Some(r#"[{"id":1}]"#)
        );
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("x"));
        assert!(reopened.get("absent").unwrap().is_none());
    }

    #[test]
    fn file_mirror_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("cart.json");

        let mut mirror = FileMirror::new(&path);
        mirror.set("cart", "[]").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn file_mirror_surfaces_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        std::fs::write(&path, "not json").unwrap();

        let mirror = FileMirror::new(&path);
        assert!(matches!(mirror.get("cart"), Err(MirrorError::Parse(_))));
    }
}
