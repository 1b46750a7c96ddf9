use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Session store
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Where session logs are persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// JSON file holding every session log (file backend only).
    #[serde(default = "d_store_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::File,
            path: d_store_path(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Single JSON document, replaced atomically on every save.
    #[default]
    File,
    /// Process-local map; nothing survives a restart.
    Memory,
}

fn d_store_path() -> PathBuf {
    PathBuf::from("data/sessions.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_file_backend() {
        let cfg: StoreConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.backend, StoreBackend::File);
        assert_eq!(cfg.path, PathBuf::from("data/sessions.json"));
    }

    #[test]
    fn parses_memory_backend() {
        let cfg: StoreConfig = toml::from_str(r#"backend = "memory""#).unwrap();
        assert_eq!(cfg.backend, StoreBackend::Memory);
    }
}
