use std::sync::Arc;

use sl_domain::config::Config;
use sl_domain::tool::ToolManifest;
use sl_sessions::SessionLog;

use crate::events::EventHub;

/// Shared application state passed to all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,

    /// Session lifecycle + search over the configured store.
    pub sessions: Arc<SessionLog>,

    /// Static tool manifest, built once at startup.
    pub manifest: Arc<ToolManifest>,
    /// Fan-out for the SSE stream.
    pub events: Arc<EventHub>,

    /// SHA-256 hash of the shared secret (read once at startup).
    /// `None` = dev mode (no auth enforced).
    pub api_token_hash: Option<Vec<u8>>,
}
