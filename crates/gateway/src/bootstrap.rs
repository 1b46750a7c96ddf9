//! AppState construction extracted from `main.rs`.

use std::sync::Arc;

use anyhow::Context;
use sha2::{Digest, Sha256};

use sl_domain::config::{Config, ConfigSeverity, ServerConfig};
use sl_domain::error::Error;
use sl_domain::tool::session_tool_manifest;
use sl_sessions::{open_store, SessionLog};

use crate::events::EventHub;
use crate::state::AppState;

/// Validate config, open the session store and return a fully-wired
/// [`AppState`].
pub fn build_app_state(config: Arc<Config>) -> anyhow::Result<AppState> {
    // ── Config validation ────────────────────────────────────────────
    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            ConfigSeverity::Warning => tracing::warn!("config: {issue}"),
            ConfigSeverity::Error => tracing::error!("config: {issue}"),
        }
    }
    let error_count = issues
        .iter()
        .filter(|i| i.severity == ConfigSeverity::Error)
        .count();
    if error_count > 0 {
        return Err(Error::Config(format!("validation failed with {error_count} error(s)")).into());
    }

    // ── Session store ────────────────────────────────────────────────
    let store = open_store(&config.store).context("opening session store")?;
    let existing = store.load_all().context("loading session store")?.len();
    let sessions = Arc::new(SessionLog::new(store));
    tracing::info!(
        backend = sessions.backend(),
        sessions = existing,
        "session log ready"
    );

    // ── Manifest + event hub ─────────────────────────────────────────
    let manifest = Arc::new(session_tool_manifest());
    tracing::info!(tools = manifest.tools.len(), "tool manifest built");

    Ok(AppState {
        api_token_hash: api_token_hash(&config.server),
        config,
        sessions,
        manifest,
        events: Arc::new(EventHub::new()),
    })
}

/// Read the shared secret once and hash it for constant-time comparison.
/// Priority: `server.api_token` in config, then the `server.api_token_env` env var.
fn api_token_hash(server: &ServerConfig) -> Option<Vec<u8>> {
    let env_var = &server.api_token_env;
    let token = server
        .api_token
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(|t| ("config".to_string(), t.to_string()))
        .or_else(|| {
            std::env::var(env_var)
                .ok()
                .filter(|t| !t.is_empty())
                .map(|t| (format!("env:{env_var}"), t))
        });

    match token {
        Some((source, t)) => {
            tracing::info!(source = %source, "bearer-token auth enabled");
            Some(Sha256::digest(t.as_bytes()).to_vec())
        }
        None => {
            tracing::warn!(
                "bearer-token auth DISABLED; set server.api_token in config.toml or the {env_var} env var"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sl_domain::config::StoreBackend;

    #[test]
    fn inline_token_is_hashed() {
        let server = ServerConfig {
            api_token: Some("secret".into()),
            api_token_env: "SL_TEST_TOKEN_UNSET_A".into(),
            ..Default::default()
        };
        let hash = api_token_hash(&server).unwrap();
        assert_eq!(hash, Sha256::digest(b"secret").to_vec());
    }

    #[test]
    fn no_token_means_dev_mode() {
        let server = ServerConfig {
            api_token_env: "SL_TEST_TOKEN_UNSET_B".into(),
            ..Default::default()
        };
        assert!(api_token_hash(&server).is_none());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = Config::default();
        config.store.backend = StoreBackend::Memory;
        config.stream.keepalive_secs = 0;
        let Err(err) = build_app_state(Arc::new(config)) else {
            panic!("expected config validation to fail");
        };
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::Config(_))));
    }

    #[test]
    fn memory_backend_boots() {
        let mut config = Config::default();
        config.store.backend = StoreBackend::Memory;
        config.server.api_token_env = "SL_TEST_TOKEN_UNSET_C".into();
        let state = build_app_state(Arc::new(config)).unwrap();
        assert_eq!(state.sessions.backend(), "memory");
        assert_eq!(state.manifest.tools.len(), 3);
        assert!(state.api_token_hash.is_none());
    }
}
