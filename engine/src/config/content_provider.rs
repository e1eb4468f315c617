use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Small durable records addressed by a fixed key.
pub trait ContentProvider: Send + Sync {
    /// `Ok(None)` when nothing has been stored under `key` yet.
    fn read(&self, key: &str) -> Result<Option<String>, String>;
    fn write(&self, key: &str, content: &str) -> Result<(), String>;
}

pub struct FileContentProvider {
    dir: PathBuf,
}

impl FileContentProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.yaml", key))
    }
}

impl ContentProvider for FileContentProvider {
    fn read(&self, key: &str) -> Result<Option<String>, String> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(format!("Failed to read {}: {}", path.display(), err)),
        }
    }

    fn write(&self, key: &str, content: &str) -> Result<(), String> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| format!("Failed to create {}: {}", self.dir.display(), e))?;
        let path = self.path_for(key);
        std::fs::write(&path, content).map_err(|e| format!("Failed to write {}: {}", path.display(), e))
    }
}

/// Keeps records in memory. Clones share the same records.
#[derive(Clone, Default)]
pub struct MemoryContentProvider {
    records: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryContentProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContentProvider for MemoryContentProvider {
    fn read(&self, key: &str) -> Result<Option<String>, String> {
        let records = self.records.lock().map_err(|_| "Record store lock poisoned".to_string())?;
        Ok(records.get(key).cloned())
    }

    fn write(&self, key: &str, content: &str) -> Result<(), String> {
        let mut records = self.records.lock().map_err(|_| "Record store lock poisoned".to_string())?;
        records.insert(key.to_string(), content.to_string());
        Ok(())
    }
}
