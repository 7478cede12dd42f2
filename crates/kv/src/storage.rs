//! Storage trait and implementations

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::{KvError, Result};

pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn put(&mut self, key: &str, value: &str) -> Result<()>;
    fn delete(&mut self, key: &str) -> Result<()>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).put(key, value)
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        (**self).delete(key)
    }
}

fn poisoned<T>(_: T) -> KvError {
    KvError::Storage("lock poisoned".to_string())
}

/// In-memory storage (for testing and demos)
#[derive(Clone)]
pub struct InMemoryStorage {
    data: Arc<RwLock<BTreeMap<String, String>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for InMemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let data = self.data.read().map_err(poisoned)?;
        Ok(data.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        let mut data = self.data.write().map_err(poisoned)?;
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        let mut data = self.data.write().map_err(poisoned)?;
        data.remove(key);
        Ok(())
    }
}

/// Single JSON file holding every key. The file is rewritten on each write
/// through a sibling temp file and a rename.
pub struct FileBackedStorage {
    path: PathBuf,
    data: BTreeMap<String, String>,
}

impl FileBackedStorage {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw).map_err(|e| KvError::Serialization(e.to_string()))?
            }
        } else {
            BTreeMap::new()
        };
        debug!(path = %path.display(), keys = data.len(), "kv: opened file storage");
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(&self.data)
            .map_err(|e| KvError::Serialization(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Storage for FileBackedStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        let prev = self.data.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush() {
            // keep memory in step with disk
            match prev {
                Some(v) => self.data.insert(key.to_string(), v),
                None => self.data.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        if let Some(prev) = self.data.remove(key) {
            if let Err(e) = self.flush() {
                self.data.insert(key.to_string(), prev);
                return Err(e);
            }
        }
        Ok(())
    }
}
