use serde::Serialize;

/// Structured trace events emitted by the session-logger crates.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event")]
pub enum TraceEvent {
    SessionCreated {
        session_id: String,
        agenda_items: usize,
        key_topics: usize,
        key_terms: usize,
    },
    HeartbeatAppended {
        session_id: String,
        hb_index: usize,
    },
    CrossSessionSearch {
        session_id: String,
        candidates: usize,
        hits: usize,
        limit: usize,
    },
    StoreSaved {
        backend: &'static str,
        sessions: usize,
    },
}

impl TraceEvent {
    pub fn emit(&self) {
        let json = serde_json::to_string(self).unwrap_or_default();
        tracing::info!(trace_event = %json, "sl_event");
    }
}
