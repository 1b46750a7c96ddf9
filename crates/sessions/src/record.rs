use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// First heartbeat line of every session log.
pub const HEARTBEAT_SEED: &str = "HB#0: Canvas initialized";

/// A tracked unit of work.
///
/// Only `heartbeats` changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: String,
    pub title: String,
    #[serde(default)]
    pub agenda: Vec<String>,
    /// Match keys for cross-session search; duplicates collapse.
    #[serde(default)]
    pub key_topics: BTreeSet<String>,
    #[serde(default)]
    pub key_terms: BTreeSet<String>,
    #[serde(default)]
    pub heartbeats: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn new(
        session_id: String,
        title: String,
        agenda: Vec<String>,
        key_topics: impl IntoIterator<Item = String>,
        key_terms: impl IntoIterator<Item = String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            session_id,
            title,
            agenda,
            key_topics: key_topics.into_iter().collect(),
            key_terms: key_terms.into_iter().collect(),
            heartbeats: vec![HEARTBEAT_SEED.to_owned()],
            created_at,
        }
    }

    /// Append `HB#<n>: <note>` where `n` is the pre-append length.
    /// Returns the index and the line.
    pub fn append_heartbeat(&mut self, status_note: &str) -> (usize, String) {
        let hb_index = self.heartbeats.len();
        let hb_line = format!("HB#{hb_index}: {status_note}");
        self.heartbeats.push(hb_line.clone());
        (hb_index, hb_line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SessionRecord {
        SessionRecord::new(
            "s1".into(),
            "T".into(),
            vec![],
            vec!["rust".to_string(), "rust".to_string()],
            Vec::<String>::new(),
            Utc::now(),
        )
    }

    #[test]
    fn new_record_is_seeded() {
        let rec = record();
        assert_eq!(rec.heartbeats, vec![HEARTBEAT_SEED.to_string()]);
    }

    #[test]
    fn duplicate_tags_collapse() {
        assert_eq!(record().key_topics.len(), 1);
    }

    #[test]
    fn heartbeat_index_tracks_position() {
        let mut rec = record();
        for n in 1..=4 {
            let (idx, line) = rec.append_heartbeat("HB#99: not an index");
            assert_eq!(idx, n);
            assert_eq!(line, format!("HB#{n}: HB#99: not an index"));
        }
        for (pos, line) in rec.heartbeats.iter().enumerate() {
            assert!(line.starts_with(&format!("HB#{pos}: ")));
        }
    }
}
