pub mod auth;
pub mod error;
pub mod health;
pub mod sessions;
pub mod stream;
pub mod tools;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use sl_domain::error::Error;
use sl_sessions::SessionLog;

use crate::api::error::ApiError;
use crate::state::AppState;

/// Run a session-log call on the blocking pool. Store I/O and the write
/// lock must stay off the async worker threads.
pub(crate) async fn with_sessions<T, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&SessionLog) -> sl_domain::error::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let sessions = state.sessions.clone();
    tokio::task::spawn_blocking(move || f(sessions.as_ref()))
        .await
        .map_err(|e| ApiError(Error::StoreUnavailable(format!("session task failed: {e}"))))?
        .map_err(ApiError::from)
}

/// Build the full API router.
///
/// Routes are split into **public** (health, manifest, SSE) and
/// **protected** (gated behind the shared-secret bearer middleware).
///
/// `state` is needed to wire up the auth middleware at build time.
pub fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(health::health))
        .route("/manifest", get(health::manifest))
        .route("/sse", get(stream::event_stream));

    let protected = Router::new()
        // Agent tools
        .route("/tool/init_session_log", post(tools::init_session_log))
        .route("/tool/heartbeat", post(tools::heartbeat))
        .route("/tool/cross_session_hits", post(tools::cross_session_hits))
        // Inspection
        .route("/v1/sessions", get(sessions::list_sessions))
        .route("/v1/sessions/:id", get(sessions::get_session))
        .route_layer(middleware::from_fn_with_state(
            state,
            auth::require_api_token,
        ));

    public.merge(protected)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
