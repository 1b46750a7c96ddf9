//! Markdown "canvas" view of a session log.

use std::fmt::Write;

use crate::record::SessionRecord;

const NONE: &str = "(none)";

/// Render the canvas document for `record`.
///
/// Output depends only on the record.
pub fn render_canvas(record: &SessionRecord) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# {}", record.title);
    let _ = writeln!(out);
    let _ = writeln!(out, "**Session ID:** `{}`", record.session_id);
    let _ = writeln!(out);

    let _ = writeln!(out, "## Agenda");
    if record.agenda.is_empty() {
        let _ = writeln!(out, "{NONE}");
    } else {
        for (i, item) in record.agenda.iter().enumerate() {
            let _ = writeln!(out, "{}. {item}", i + 1);
        }
    }
    let _ = writeln!(out);

    bullet_section(&mut out, "Key Topics", record.key_topics.iter());
    bullet_section(&mut out, "Key Terms", record.key_terms.iter());

    let _ = writeln!(out, "## Heartbeats");
    for line in &record.heartbeats {
        let _ = writeln!(out, "- {line}");
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Cross-Session Hits");
    let _ = writeln!(out, "_Call `cross_session_hits` to fill this in._");
    let _ = writeln!(out);

    let _ = writeln!(out, "## Parking Lot");
    let _ = writeln!(out, "_Empty._");
    let _ = writeln!(out);

    let _ = writeln!(out, "---");
    let _ = writeln!(
        out,
        "_Append a heartbeat every 5 exchanges: `heartbeat(session_id, status_note)`._"
    );

    out
}

fn bullet_section<'a>(out: &mut String, heading: &str, items: impl Iterator<Item = &'a String>) {
    let _ = writeln!(out, "## {heading}");
    let mut any = false;
    for item in items {
        any = true;
        let _ = writeln!(out, "- {item}");
    }
    if !any {
        let _ = writeln!(out, "{NONE}");
    }
    let _ = writeln!(out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(agenda: Vec<&str>, topics: Vec<&str>, terms: Vec<&str>) -> SessionRecord {
        SessionRecord::new(
            "20261019-0930-T-0a0b0c0d".into(),
            "T".into(),
            agenda.into_iter().map(String::from).collect(),
            topics.into_iter().map(String::from),
            terms.into_iter().map(String::from),
            Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap(),
        )
    }

    #[test]
    fn empty_inputs_render_placeholders() {
        let doc = render_canvas(&record(vec![], vec![], vec![]));
        assert!(doc.starts_with("# T\n"));
        assert!(doc.contains("`20261019-0930-T-0a0b0c0d`"));
        assert_eq!(doc.matches("(none)").count(), 3);
        assert!(doc.contains("- HB#0: Canvas initialized"));
        assert!(doc.contains("## Parking Lot"));
        assert!(doc.contains("every 5 exchanges"));
    }

    #[test]
    fn agenda_is_numbered_and_tags_bulleted() {
        let doc = render_canvas(&record(
            vec!["scope", "build"],
            vec!["parsing"],
            vec!["lexer", "ast"],
        ));
        assert!(doc.contains("## Agenda\n1. scope\n2. build\n"));
        assert!(doc.contains("## Key Topics\n- parsing\n"));
        assert!(doc.contains("## Key Terms\n- ast\n- lexer\n"));
        assert!(!doc.contains("(none)"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let rec = record(vec!["a"], vec!["x", "y"], vec!["z"]);
        assert_eq!(render_canvas(&rec), render_canvas(&rec.clone()));
    }
}
