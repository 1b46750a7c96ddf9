//! Static capability manifest advertised to calling agents.
//!
//! The manifest is pure data: it lists the three session-log operations,
//! what they do and the JSON shape of their input. It never depends on
//! runtime state, so it can be rebuilt at any time.

use serde::{Deserialize, Serialize};
use serde_json::json;

pub const TOOL_INIT_SESSION_LOG: &str = "init_session_log";
pub const TOOL_HEARTBEAT: &str = "heartbeat";
pub const TOOL_CROSS_SESSION_HITS: &str = "cross_session_hits";

/// A single operation exposed to agents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    /// JSON Schema for the operation's request body.
    pub input_schema: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolManifest {
    pub tools: Vec<ToolDescriptor>,
}

impl ToolManifest {
    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.name == name)
    }
}

fn string_array() -> serde_json::Value {
    json!({ "type": "array", "items": { "type": "string" } })
}

/// Build the manifest for the session-log tools.
pub fn session_tool_manifest() -> ToolManifest {
    ToolManifest {
        tools: vec![
            ToolDescriptor {
                name: TOOL_INIT_SESSION_LOG.into(),
                description: "Create a new session log and return its Canvas markdown.".into(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "agenda": string_array(),
                        "key_topics": string_array(),
                        "key_terms": string_array(),
                    }
                }),
            },
            ToolDescriptor {
                name: TOOL_HEARTBEAT.into(),
                description: "Append a numbered status line to a session log.".into(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "session_id": { "type": "string" },
                        "status_note": { "type": "string" },
                    },
                    "required": ["session_id", "status_note"]
                }),
            },
            ToolDescriptor {
                name: TOOL_CROSS_SESSION_HITS.into(),
                description: "List other sessions sharing topics or terms, most recent first.".into(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "session_id": { "type": "string" },
                        "topics": string_array(),
                        "terms": string_array(),
                        "limit": { "type": "integer", "minimum": 1 },
                    },
                    "required": ["session_id"]
                }),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_lists_three_tools_in_order() {
        let names: Vec<_> = session_tool_manifest()
            .tools
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(
            names,
            vec![TOOL_INIT_SESSION_LOG, TOOL_HEARTBEAT, TOOL_CROSS_SESSION_HITS]
        );
    }

    #[test]
    fn heartbeat_requires_session_and_note() {
        let manifest = session_tool_manifest();
        let hb = manifest.get(TOOL_HEARTBEAT).unwrap();
        assert_eq!(hb.input_schema["required"], json!(["session_id", "status_note"]));
    }

    #[test]
    fn manifest_is_deterministic() {
        assert_eq!(session_tool_manifest(), session_tool_manifest());
    }
}
