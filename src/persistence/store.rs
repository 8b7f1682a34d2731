use super::files::atomic_write;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::warn;

/// Blob key for the auth container snapshot
pub const AUTH_KEY: &str = "auth";
/// Blob key for the tasks container snapshot
pub const TASKS_KEY: &str = "tasks";
/// Blob key for the theme container snapshot
pub const THEME_KEY: &str = "theme";

/// Key-value store holding one serialized snapshot per container.
///
/// Reads never fail: a missing or unreadable blob is reported as `None` and
/// the caller falls back to defaults. Writes and removes are best-effort;
/// failures are logged and swallowed so they cannot abort a state mutation.
pub trait StateStore: Send + Sync {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Deserialize a container snapshot, falling back to the default state when
/// the blob is absent or corrupt. Corruption is logged, never surfaced.
pub fn load_or_default<T: DeserializeOwned + Default>(store: &dyn StateStore, key: &str) -> T {
    let Some(blob) = store.read(key) else {
        return T::default();
    };
    match serde_json::from_str(&blob) {
        Ok(state) => state,
        Err(e) => {
            warn!(key, error = %e, "discarding corrupt state blob");
            T::default()
        }
    }
}

/// Serialize a container snapshot and write it under `key`.
pub fn save_snapshot<T: Serialize>(store: &dyn StateStore, key: &str, state: &T) {
    match serde_json::to_string_pretty(state) {
        Ok(json) => store.write(key, &json),
        Err(e) => warn!(key, error = %e, "failed to serialize state snapshot"),
    }
}

/// File-backed store: one `<key>.json` per blob in the data directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StateStore for FileStore {
    fn read(&self, key: &str) -> Option<String> {
        let path = self.blob_path(key);
        if !path.exists() {
            return None;
        }
        match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) => {
                warn!(key, error = %e, "failed to read state blob");
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(e) = atomic_write(self.blob_path(key), value) {
            warn!(key, error = %e, "failed to write state blob");
        }
    }

    fn remove(&self, key: &str) {
        let path = self.blob_path(key);
        if !path.exists() {
            return;
        }
        if let Err(e) = fs::remove_file(&path) {
            warn!(key, error = %e, "failed to remove state blob");
        }
    }
}

/// In-memory store substituted for the filesystem in tests.
#[derive(Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.blobs.lock().unwrap().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        self.blobs
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.blobs.lock().unwrap().remove(key);
    }
}
