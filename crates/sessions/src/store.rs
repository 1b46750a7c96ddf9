//! Session log persistence.
//!
//! A store is a whole-map key-value collaborator: it loads every record at
//! once and replaces every record at once. Callers serialize
//! load-mutate-save sequences themselves (see [`crate::SessionLog`]).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use sl_domain::config::{StoreBackend, StoreConfig};
use sl_domain::error::{Error, Result};

use crate::record::SessionRecord;

/// All session logs keyed by `session_id`.
///
/// Iteration order is by id, which starts with the creation minute.
pub type SessionMap = BTreeMap<String, SessionRecord>;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Trait
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub trait SessionStore: Send + Sync {
    /// Short backend name for logs (`"file"`, `"memory"`).
    fn backend(&self) -> &'static str;

    /// Load every stored session log.
    fn load_all(&self) -> Result<SessionMap>;

    /// Replace the stored collection with `sessions`.
    ///
    /// Implementations must be all-or-nothing: on error the previous
    /// contents stay readable.
    fn save_all(&self, sessions: &SessionMap) -> Result<()>;

    fn get(&self, session_id: &str) -> Result<Option<SessionRecord>> {
        Ok(self.load_all()?.remove(session_id))
    }
}

/// Open the backend selected in config.
pub fn open_store(config: &StoreConfig) -> Result<Arc<dyn SessionStore>> {
    let store: Arc<dyn SessionStore> = match config.backend {
        StoreBackend::File => Arc::new(JsonFileStore::new(&config.path)?),
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
    };
    Ok(store)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// JSON file backend
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Store backed by a single pretty-printed JSON document.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Use the JSON file at `path`, creating its parent directory if needed.
    /// The file itself is created on first save.
    pub fn new(path: &Path) -> Result<Self> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| {
                Error::StoreUnavailable(format!("creating {}: {e}", dir.display()))
            })?;
        }

        tracing::info!(path = %path.display(), "session store ready");

        Ok(Self {
            path: path.to_path_buf(),
        })
    }
}

impl SessionStore for JsonFileStore {
    fn backend(&self) -> &'static str {
        "file"
    }

    fn load_all(&self) -> Result<SessionMap> {
        if !self.path.exists() {
            return Ok(SessionMap::new());
        }
        let raw = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::StoreUnavailable(format!("reading {}: {e}", self.path.display()))
        })?;
        if raw.trim().is_empty() {
            return Ok(SessionMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| {
            Error::StoreUnavailable(format!("parsing {}: {e}", self.path.display()))
        })
    }

    fn save_all(&self, sessions: &SessionMap) -> Result<()> {
        let json = serde_json::to_string_pretty(sessions)
            .map_err(|e| Error::StoreUnavailable(format!("serializing sessions: {e}")))?;

        let tmp = self.path.with_extension("json.tmp");
        if let Err(e) = std::fs::write(&tmp, json) {
            let _ = std::fs::remove_file(&tmp);
            return Err(Error::StoreUnavailable(format!(
                "writing {}: {e}",
                tmp.display()
            )));
        }
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp);
            Error::StoreUnavailable(format!("replacing {}: {e}", self.path.display()))
        })
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// In-memory backend
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Default)]
pub struct MemoryStore {
    sessions: RwLock<SessionMap>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    fn load_all(&self) -> Result<SessionMap> {
        Ok(self.sessions.read().clone())
    }

    fn save_all(&self, sessions: &SessionMap) -> Result<()> {
        *self.sessions.write() = sessions.clone();
        Ok(())
    }

    fn get(&self, session_id: &str) -> Result<Option<SessionRecord>> {
        Ok(self.sessions.read().get(session_id).cloned())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample(id: &str) -> SessionRecord {
        SessionRecord::new(
            id.into(),
            "Sample".into(),
            vec!["one".into(), "two".into()],
            vec!["storage".to_string()],
            vec!["fsync".to_string()],
            Utc::now(),
        )
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(&dir.path().join("nested/sessions.json")).unwrap();
        assert!(store.load_all().unwrap().is_empty());
        assert!(dir.path().join("nested").is_dir());
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.json");

        let mut map = SessionMap::new();
        map.insert("a".into(), sample("a"));
        JsonFileStore::new(&path).unwrap().save_all(&map).unwrap();

        let reopened = JsonFileStore::new(&path).unwrap();
        assert_eq!(reopened.get("a").unwrap().as_ref(), map.get("a"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn corrupt_file_is_store_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(&path).unwrap();
        let err = store.load_all().unwrap_err();
        assert_eq!(err.kind(), "store_unavailable");
    }

    #[test]
    fn memory_store_replaces_whole_map() {
        let store = MemoryStore::new();
        let mut map = SessionMap::new();
        map.insert("a".into(), sample("a"));
        map.insert("b".into(), sample("b"));
        store.save_all(&map).unwrap();

        map.remove("a");
        store.save_all(&map).unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded.keys().collect::<Vec<_>>(), vec!["b"]);
        assert!(store.get("a").unwrap().is_none());
    }

    #[test]
    fn open_store_honours_backend() {
        let cfg = StoreConfig {
            backend: StoreBackend::Memory,
            ..Default::default()
        };
        assert_eq!(open_store(&cfg).unwrap().backend(), "memory");
    }
}
