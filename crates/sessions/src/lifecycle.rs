//! Session log lifecycle: creation, heartbeat append, lookup and search.
//!
//! Every mutation is a whole-store load, a single-record change and a
//! whole-store save. [`SessionLog`] serializes those sequences behind one
//! mutex so concurrent callers cannot overwrite each other's updates.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;

use sl_domain::error::{Error, Result};
use sl_domain::trace::TraceEvent;

use crate::record::SessionRecord;
use crate::search::{self, HitQuery, SessionHit};
use crate::store::{SessionMap, SessionStore};

pub const DEFAULT_TITLE: &str = "Session Log";
const ID_FALLBACK_TITLE: &str = "Untitled";
const MAX_SLUG_LEN: usize = 48;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Requests / results
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Inputs for a new session log. Every field is optional.
#[derive(Debug, Clone, Default)]
pub struct NewSession {
    pub title: Option<String>,
    pub agenda: Option<Vec<String>>,
    pub key_topics: Option<Vec<String>>,
    pub key_terms: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeartbeatReceipt {
    pub session_id: String,
    pub hb_line: String,
    /// Always the full agenda; items are never marked done.
    pub remaining_agenda: Vec<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Session ids
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Build a readable id: `<YYYYMMDD-HHMM>-<title slug>-<8 hex>`.
///
/// The minute-resolution timestamp and slug are for humans; the random
/// suffix keeps same-minute, same-title ids apart.
pub fn generate_session_id(now: DateTime<Utc>, title: Option<&str>) -> String {
    let slug = slugify(title.unwrap_or_default());
    let slug = if slug.is_empty() {
        ID_FALLBACK_TITLE.to_owned()
    } else {
        slug
    };
    let token = uuid::Uuid::new_v4();
    format!(
        "{}-{slug}-{}",
        now.format("%Y%m%d-%H%M"),
        hex::encode(&token.as_bytes()[..4])
    )
}

fn slugify(title: &str) -> String {
    let words: Vec<String> = title
        .split_whitespace()
        .map(|w| {
            w.chars()
                .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
                .collect::<String>()
        })
        .filter(|w| !w.is_empty())
        .collect();
    // Cap by characters so multi-byte titles never split mid-codepoint.
    let slug: String = words.join("-").chars().take(MAX_SLUG_LEN).collect();
    slug.trim_end_matches('-').to_owned()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// SessionLog
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub struct SessionLog {
    store: Arc<dyn SessionStore>,
    /// Held for the whole load-mutate-save sequence.
    write_lock: Mutex<()>,
}

impl SessionLog {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// Create and persist a new session log.
    pub fn create(&self, req: NewSession) -> Result<SessionRecord> {
        let now = Utc::now();
        let title = req
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TITLE)
            .to_owned();

        let _guard = self.write_lock.lock();
        let mut sessions = self.store.load_all()?;

        let session_id = loop {
            let candidate = generate_session_id(now, req.title.as_deref());
            if !sessions.contains_key(&candidate) {
                break candidate;
            }
            tracing::warn!(session_id = %candidate, "session id collision, regenerating");
        };

        let record = SessionRecord::new(
            session_id.clone(),
            title,
            req.agenda.unwrap_or_default(),
            req.key_topics.unwrap_or_default(),
            req.key_terms.unwrap_or_default(),
            now,
        );
        sessions.insert(session_id.clone(), record.clone());
        self.persist(&sessions)?;

        TraceEvent::SessionCreated {
            session_id,
            agenda_items: record.agenda.len(),
            key_topics: record.key_topics.len(),
            key_terms: record.key_terms.len(),
        }
        .emit();

        Ok(record)
    }

    /// Append `HB#<n>: <status_note>` to an existing session.
    ///
    /// Unknown ids fail with [`Error::NotFound`] and leave the store untouched.
    pub fn heartbeat(&self, session_id: &str, status_note: &str) -> Result<HeartbeatReceipt> {
        let _guard = self.write_lock.lock();
        let mut sessions = self.store.load_all()?;

        let record = sessions
            .get_mut(session_id)
            .ok_or_else(|| Error::NotFound(session_id.to_owned()))?;
        let (hb_index, hb_line) = record.append_heartbeat(status_note);
        let remaining_agenda = record.agenda.clone();

        self.persist(&sessions)?;

        TraceEvent::HeartbeatAppended {
            session_id: session_id.to_owned(),
            hb_index,
        }
        .emit();

        Ok(HeartbeatReceipt {
            session_id: session_id.to_owned(),
            hb_line,
            remaining_agenda,
        })
    }

    /// Other sessions sharing tags with `query`, newest first.
    pub fn find_hits(&self, query: &HitQuery) -> Result<Vec<SessionHit>> {
        let sessions = self.store.load_all()?;
        let hits = search::find_hits(&sessions, query);

        TraceEvent::CrossSessionSearch {
            session_id: query.session_id.clone(),
            candidates: search::candidate_count(&sessions, &query.session_id),
            hits: hits.len(),
            limit: query.limit,
        }
        .emit();

        Ok(hits)
    }

    pub fn get(&self, session_id: &str) -> Result<Option<SessionRecord>> {
        self.store.get(session_id)
    }

    /// Every session log, newest first.
    pub fn list(&self) -> Result<Vec<SessionRecord>> {
        let mut records: Vec<_> = self.store.load_all()?.into_values().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    fn persist(&self, sessions: &SessionMap) -> Result<()> {
        self.store.save_all(sessions)?;
        TraceEvent::StoreSaved {
            backend: self.store.backend(),
            sessions: sessions.len(),
        }
        .emit();
        Ok(())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
