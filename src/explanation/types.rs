use serde::{Deserialize, Serialize};

/// One titled block of an explanation document.
///
/// `title` is never empty and both fields are trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub body: String,
}

impl Section {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Case-insensitive check against a set of lowercase keyword substrings
    pub fn title_matches(&self, keywords: &[&str]) -> bool {
        let title = self.title.to_lowercase();
        keywords.iter().any(|k| title.contains(k))
    }
}

/// Display unit produced by the explanation renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Segment {
    /// Content of a `**bold**` span, styled as a section subtitle
    Title(String),
    /// Plain prose with list markers replaced by glyphs
    Body(String),
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Title(t) | Segment::Body(t) => t,
        }
    }
}

/// How a section body was located
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionSource {
    Keyword,
    Position,
}

/// A selected section body plus its rendered segments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedSection {
    pub title: String,
    pub body: String,
    pub source: SelectionSource,
    pub segments: Vec<Segment>,
}

/// Explanation document broken into the parts the client surfaces
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplanationView {
    /// Why the model predicted this (falls back to the first section)
    pub explanation: Option<RenderedSection>,
    /// Ayurvedic remedies (falls back to the second section)
    pub remedies: Option<RenderedSection>,
    /// Warnings or precautions (keyword match only)
    pub warnings: Option<RenderedSection>,
    /// Every section in document order
    pub sections: Vec<Section>,
}

impl ExplanationView {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
