//! Session-log tool endpoints called by agents.
//!
//! - `POST /tool/init_session_log`: create a session log, return its canvas
//! - `POST /tool/heartbeat`: append a numbered status line
//! - `POST /tool/cross_session_hits`: related sessions by shared tags

use axum::extract::State;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use sl_sessions::{render_canvas, HeartbeatReceipt, HitQuery, NewSession, SessionHit};

use crate::api::error::ApiError;
use crate::api::with_sessions;
use crate::events::SessionEvent;
use crate::state::AppState;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// POST /tool/init_session_log
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Default, Deserialize)]
pub struct InitSessionLogBody {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub agenda: Option<Vec<String>>,
    #[serde(default)]
    pub key_topics: Option<Vec<String>>,
    #[serde(default)]
    pub key_terms: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct InitSessionLogResponse {
    pub session_id: String,
    pub canvas_markdown: String,
}

pub async fn init_session_log(
    State(state): State<AppState>,
    Json(body): Json<InitSessionLogBody>,
) -> Result<Json<InitSessionLogResponse>, ApiError> {
    let req = NewSession {
        title: body.title,
        agenda: body.agenda,
        key_topics: body.key_topics,
        key_terms: body.key_terms,
    };
    let record = with_sessions(&state, move |log| log.create(req)).await?;

    state.events.publish(SessionEvent::Created {
        session_id: record.session_id.clone(),
        title: record.title.clone(),
    });

    Ok(Json(InitSessionLogResponse {
        canvas_markdown: render_canvas(&record),
        session_id: record.session_id,
    }))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// POST /tool/heartbeat
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Deserialize)]
pub struct HeartbeatBody {
    pub session_id: String,
    pub status_note: String,
}

pub async fn heartbeat(
    State(state): State<AppState>,
    Json(body): Json<HeartbeatBody>,
) -> Result<Json<HeartbeatReceipt>, ApiError> {
    let receipt = with_sessions(&state, move |log| {
        log.heartbeat(&body.session_id, &body.status_note)
    })
    .await?;

    state.events.publish(SessionEvent::Heartbeat {
        session_id: receipt.session_id.clone(),
        hb_line: receipt.hb_line.clone(),
    });

    Ok(Json(receipt))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// POST /tool/cross_session_hits
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Deserialize)]
pub struct CrossSessionHitsBody {
    pub session_id: String,
    #[serde(default)]
    pub topics: Option<Vec<String>>,
    #[serde(default)]
    pub terms: Option<Vec<String>>,
    /// Falls back to `search.default_limit`; clamped to `search.max_limit`.
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct CrossSessionHitsResponse {
    pub hits: Vec<SessionHit>,
}

pub async fn cross_session_hits(
    State(state): State<AppState>,
    Json(body): Json<CrossSessionHitsBody>,
) -> Result<Json<CrossSessionHitsResponse>, ApiError> {
    let query = HitQuery {
        session_id: body.session_id,
        topics: body.topics,
        terms: body.terms,
        limit: state.config.search.effective_limit(body.limit),
    };
    let hits = with_sessions(&state, move |log| log.find_hits(&query)).await?;
    Ok(Json(CrossSessionHitsResponse { hits }))
}
