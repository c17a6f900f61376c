//! Section Splitter
//!
//! Splits an explanation document into titled sections keyed on heading lines
//! of the form `## **Title**`. Text before the first heading is discarded.

use crate::explanation::types::Section;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// `##`, one or more spaces, then the first bold span on the line
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^##[ \t]+\*\*(.*?)\*\*").expect("valid heading pattern"));

/// Split explanation text into ordered sections
///
/// Returns an empty vector for `None`, empty input, or input with no heading line.
pub fn split_sections(text: Option<&str>) -> Vec<Section> {
    let text = match text {
        Some(t) if !t.is_empty() => t,
        _ => return Vec::new(),
    };

    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut sections = Vec::new();
    let mut current_title: Option<String> = None;
    let mut buffer: Vec<&str> = Vec::new();

    for line in normalized.split('\n') {
        if let Some(caps) = HEADING.captures(line) {
            flush(&mut sections, current_title.take(), &mut buffer);
            current_title = Some(caps[1].to_string());
        } else if current_title.is_some() {
            buffer.push(line);
        }
    }
    flush(&mut sections, current_title, &mut buffer);

    sections
}

/// Split a JSON field value; anything but a string yields no sections
pub fn sections_from_value(value: &Value) -> Vec<Section> {
    split_sections(value.as_str())
}

fn flush(sections: &mut Vec<Section>, title: Option<String>, buffer: &mut Vec<&str>) {
    let Some(title) = title else {
        buffer.clear();
        return;
    };

    let body = buffer.join("\n");
    buffer.clear();

    let title = title.trim();
    if title.is_empty() {
        tracing::debug!("Dropping section with empty heading ({} body chars)", body.trim().len());
        return;
    }

    sections.push(Section::new(title, body.trim()));
}
