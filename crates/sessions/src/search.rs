//! Cross-session overlap search.
//!
//! Scores every other session by how many topics and terms it shares with
//! the query, drops sessions that share nothing, and returns the rest newest
//! first. Ordering is by recency, not by score.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::record::SessionRecord;
use crate::store::SessionMap;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Public types
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone)]
pub struct HitQuery {
    /// Session doing the asking; never returned as a hit.
    pub session_id: String,
    /// Overrides the session's own `key_topics` when non-empty.
    pub topics: Option<Vec<String>>,
    /// Overrides the session's own `key_terms` when non-empty.
    pub terms: Option<Vec<String>>,
    pub limit: usize,
}

/// A related session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionHit {
    pub session_id: String,
    pub score: usize,
    pub title: String,
    pub why: HitReason,
}

/// The exact shared tags behind a hit's score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HitReason {
    pub topics: Vec<String>,
    pub terms: Vec<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Search
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Rank `sessions` against `query`.
///
/// An unknown `query.session_id` is not an error: it just contributes no
/// fallback tags.
pub fn find_hits(sessions: &SessionMap, query: &HitQuery) -> Vec<SessionHit> {
    let base = sessions.get(&query.session_id);
    let topics = effective_set(query.topics.as_deref(), base.map(|r| &r.key_topics));
    let terms = effective_set(query.terms.as_deref(), base.map(|r| &r.key_terms));

    let mut scored: Vec<(&SessionRecord, SessionHit)> = sessions
        .values()
        .filter(|rec| rec.session_id != query.session_id)
        .filter_map(|rec| {
            let why = HitReason {
                topics: topics.intersection(&rec.key_topics).cloned().collect(),
                terms: terms.intersection(&rec.key_terms).cloned().collect(),
            };
            let score = why.topics.len() + why.terms.len();
            (score > 0).then(|| {
                (
                    rec,
                    SessionHit {
                        session_id: rec.session_id.clone(),
                        score,
                        title: rec.title.clone(),
                        why,
                    },
                )
            })
        })
        .collect();

    // Stable: equal timestamps keep store order.
    scored.sort_by(|(a, _), (b, _)| b.created_at.cmp(&a.created_at));
    scored.truncate(query.limit);
    scored.into_iter().map(|(_, hit)| hit).collect()
}

/// Number of sessions a search for `session_id` scores.
pub fn candidate_count(sessions: &SessionMap, session_id: &str) -> usize {
    sessions.len() - usize::from(sessions.contains_key(session_id))
}

fn effective_set(supplied: Option<&[String]>, fallback: Option<&BTreeSet<String>>) -> BTreeSet<String> {
    match supplied {
        Some(items) if !items.is_empty() => items.iter().cloned().collect(),
        _ => fallback.cloned().unwrap_or_default(),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
