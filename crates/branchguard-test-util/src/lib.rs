//! Shared test utilities for the branchguard workspace.
//!
//! - [`StubServer`]: a loopback HTTP server answering canned Azure DevOps responses, used by
//!   the client tests and the CLI end-to-end tests (the binary runs as a subprocess, so an
//!   in-memory fake cannot reach it).
//! - [`normalize_nondeterministic`]: scrub timestamps and the tool version before comparing a
//!   JSON report with a golden file.

mod stub;

pub use stub::{RecordedRequest, StubRoute, StubServer};

use serde_json::Value;

/// Normalize non-deterministic JSON fields for golden-file comparison.
///
/// `tool.version` is replaced with `"__VERSION__"` only when the root object looks like an
/// audit report (has `schema`, `tool`, `organization` and `projects`). `started_at` and
/// `finished_at` are replaced at the root.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_report = obj.contains_key("schema")
            && obj.contains_key("tool")
            && obj.contains_key("organization")
            && obj.contains_key("projects");
        if !is_report {
            return value;
        }
        if let Some(tool_obj) = obj.get_mut("tool").and_then(Value::as_object_mut)
            && tool_obj.contains_key("version")
        {
            tool_obj.insert(
                "version".to_string(),
                Value::String("__VERSION__".to_string()),
            );
        }
        for key in ["started_at", "finished_at"] {
            if obj.contains_key(key) {
                obj.insert(key.to_string(), Value::String("__TIMESTAMP__".to_string()));
            }
        }
    }
    value
}
