use crate::explanation::types::{ExplanationView, Segment};
use serde_json;

/// JSON formatter for rendered explanations
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format segments as pretty-printed JSON
    pub fn format(segments: &[Segment]) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(segments)
    }

    /// Format segments as compact JSON (no whitespace)
    pub fn format_compact(segments: &[Segment]) -> Result<String, serde_json::Error> {
        serde_json::to_string(segments)
    }

    /// Format a whole explanation view as pretty-printed JSON
    pub fn format_view(view: &ExplanationView) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(view)
    }
}
