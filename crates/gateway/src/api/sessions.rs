//! Read-only session log inspection.

use axum::extract::{Path, State};
use axum::response::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use sl_domain::error::Error;
use sl_sessions::{render_canvas, SessionRecord};

use crate::api::error::ApiError;
use crate::api::with_sessions;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub agenda_items: usize,
    pub heartbeats: usize,
}

impl From<&SessionRecord> for SessionSummary {
    fn from(rec: &SessionRecord) -> Self {
        Self {
            session_id: rec.session_id.clone(),
            title: rec.title.clone(),
            created_at: rec.created_at,
            agenda_items: rec.agenda.len(),
            heartbeats: rec.heartbeats.len(),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// GET /v1/sessions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// List every session log, newest first.
pub async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let sessions: Vec<SessionSummary> = with_sessions(&state, |log| log.list())
        .await?
        .iter()
        .map(SessionSummary::from)
        .collect();
    Ok(Json(serde_json::json!({
        "count": sessions.len(),
        "sessions": sessions,
    })))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// GET /v1/sessions/:id
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let lookup = session_id.clone();
    let record = with_sessions(&state, move |log| log.get(&lookup))
        .await?
        .ok_or(Error::NotFound(session_id))?;
    Ok(Json(serde_json::json!({
        "canvas_markdown": render_canvas(&record),
        "session": record,
    })))
}
