//! Session logs for tool-calling agents.
//!
//! A session log carries an agenda, topic/term tags and an append-only
//! heartbeat history. Logs live in a [`SessionStore`]; [`SessionLog`] owns
//! the create/heartbeat lifecycle and the cross-session overlap search.

pub mod lifecycle;
pub mod record;
pub mod render;
pub mod search;
pub mod store;

pub use lifecycle::{generate_session_id, HeartbeatReceipt, NewSession, SessionLog};
pub use record::{SessionRecord, HEARTBEAT_SEED};
pub use render::render_canvas;
pub use search::{find_hits, HitQuery, HitReason, SessionHit};
pub use store::{open_store, JsonFileStore, MemoryStore, SessionMap, SessionStore};
