use super::StorageBackend;
use crate::error::{Result, TodozError};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File-based storage: each key maps to `<root>/<key>.json`.
///
/// Keys are sanitized to a filesystem-safe name so a slot key like
/// `todoz.todos` cannot escape the root directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: Arc<PathBuf>,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Arc::new(root.into()),
        }
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{}.json", safe))
    }

    fn ensure_root(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(self.root.as_path()).map_err(TodozError::Io)?;
        }
        Ok(())
    }

    pub fn root(&self) -> &Path {
        self.root.as_path()
    }
}

impl StorageBackend for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let payload = fs::read_to_string(path).map_err(TodozError::Io)?;
        Ok(Some(payload))
    }

    fn write(&self, key: &str, payload: &str) -> Result<()> {
        self.ensure_root()?;
        fs::write(self.slot_path(key), payload).map_err(TodozError::Io)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.slot_path(key);
        if path.exists() {
            fs::remove_file(path).map_err(TodozError::Io)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_read_delete_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert_eq!(store.read("todoz.todos").unwrap(), None);
        store.write("todoz.todos", "[]").unwrap();
        assert_eq!(store.read("todoz.todos").unwrap().as_deref(), Some("[]"));
        store.delete("todoz.todos").unwrap();
        assert_eq!(store.read("todoz.todos").unwrap(), None);
    }

    #[test]
    fn delete_absent_slot_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.delete("nothing-here").unwrap();
    }

    #[test]
    fn keys_are_sanitized_to_safe_filenames() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.write("../escape", "x").unwrap();
        assert!(dir.path().join("___escape.json").exists());
    }

    #[test]
    fn clones_share_the_same_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let clone = store.clone();
        store.write("k", "1").unwrap();
        assert_eq!(clone.read("k").unwrap().as_deref(), Some("1"));
    }
}
