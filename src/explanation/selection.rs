//! Section Selection
//!
//! Backend titles are free text, so sections are located by keyword substring
//! rather than exact title. When no title matches, callers can fall back to a
//! fixed position in the document.

use crate::config::RenderConfig;
use crate::explanation::renderer::ExplanationRenderer;
use crate::explanation::sections::split_sections;
use crate::explanation::types::{ExplanationView, RenderedSection, Section, SelectionSource};

/// Body of the first section whose lowercased title contains any keyword
pub fn select_section<'a>(sections: &'a [Section], keywords: &[&str]) -> Option<&'a str> {
    find_section(sections, keywords).map(|s| s.body.as_str())
}

/// First section whose lowercased title contains any keyword
pub fn find_section<'a>(sections: &'a [Section], keywords: &[&str]) -> Option<&'a Section> {
    if keywords.is_empty() {
        return None;
    }
    sections.iter().find(|s| s.title_matches(keywords))
}

/// Keyword match, falling back to the section at `position`
pub fn select_or_position<'a>(
    sections: &'a [Section],
    keywords: &[&str],
    position: Option<usize>,
) -> Option<(&'a Section, SelectionSource)> {
    if let Some(section) = find_section(sections, keywords) {
        return Some((section, SelectionSource::Keyword));
    }

    let index = position?;
    let section = sections.get(index)?;
    tracing::debug!(
        "No title matched {:?}, using section {} ({:?})",
        keywords,
        index,
        section.title
    );
    Some((section, SelectionSource::Position))
}

/// Builds an [`ExplanationView`] from raw explanation text
pub struct ExplanationSelector<'c> {
    config: &'c RenderConfig,
    renderer: ExplanationRenderer,
}

impl<'c> ExplanationSelector<'c> {
    pub fn new(config: &'c RenderConfig) -> Self {
        Self {
            config,
            renderer: ExplanationRenderer::new(config),
        }
    }

    pub fn renderer(&self) -> &ExplanationRenderer {
        &self.renderer
    }

    /// Split, select and render in one pass
    ///
    /// Explanation falls back to the first section, remedies to the second.
    /// Warnings are only surfaced on a keyword match.
    pub fn build(&self, text: Option<&str>) -> ExplanationView {
        let sections = split_sections(text);

        let explanation = self.pick(&sections, &self.config.explanation_keywords, Some(0));
        let remedies = self.pick(&sections, &self.config.remedy_keywords, Some(1));
        let warnings = self.pick(&sections, &self.config.warning_keywords, None);

        ExplanationView {
            explanation,
            remedies,
            warnings,
            sections,
        }
    }

    fn pick(
        &self,
        sections: &[Section],
        keywords: &[String],
        position: Option<usize>,
    ) -> Option<RenderedSection> {
        let keywords: Vec<&str> = keywords.iter().map(String::as_str).collect();
        let (section, source) = select_or_position(sections, &keywords, position)?;

        Some(RenderedSection {
            title: section.title.clone(),
            body: section.body.clone(),
            source,
            segments: self.renderer.render(Some(section.body.as_str())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explanation::types::Segment;

    fn sample() -> Vec<Section> {
        vec![
            Section::new("Why the model predicted this", "Fever and cough."),
            Section::new("Ayurvedic Remedies", "* Ginger tea"),
            Section::new("Why it matters", "Second why."),
        ]
    }

    #[test]
    fn test_case_insensitive_match() {
        let sections = sample();
        assert_eq!(select_section(&sections, &["why"]), Some("Fever and cough."));
        assert_eq!(select_section(&sections, &["remedies"]), Some("* Ginger tea"));
    }

    #[test]
    fn test_first_match_wins() {
        let sections = sample();
        assert_eq!(select_section(&sections, &["matters", "why"]), Some("Fever and cough."));
    }

    #[test]
    fn test_no_match_or_empty() {
        assert_eq!(select_section(&sample(), &["diet"]), None);
        assert_eq!(select_section(&[], &["why"]), None);
        assert_eq!(select_section(&sample(), &[]), None);
    }

    #[test]
    fn test_positional_fallback() {
        let sections = vec![Section::new("Overview", "a"), Section::new("Care", "b")];
        let (section, source) = select_or_position(&sections, &["remed"], Some(1)).unwrap();
        assert_eq!(section.body, "b");
        assert_eq!(source, SelectionSource::Position);

        assert!(select_or_position(&sections, &["remed"], Some(5)).is_none());
        assert!(select_or_position(&sections, &["remed"], None).is_none());
    }

    #[test]
    fn test_view_with_drifted_titles() {
        let config = RenderConfig::default();
        let view = ExplanationSelector::new(&config)
            .build(Some("## **Overview**\nLikely flu.\n## **Home care**\n1. Rest\n2. Fluids"));

        let explanation = view.explanation.unwrap();
        assert_eq!(explanation.body, "Likely flu.");
        assert_eq!(explanation.source, SelectionSource::Position);

        let remedies = view.remedies.unwrap();
        assert_eq!(
            remedies.segments,
            vec![Segment::Body("▸ Rest\n▸ Fluids".to_string())]
        );
        assert!(view.warnings.is_none());
    }

    #[test]
    fn test_view_empty_text() {
        let config = RenderConfig::default();
        let view = ExplanationSelector::new(&config).build(None);
        assert!(view.is_empty());
        assert!(view.explanation.is_none());
        assert!(view.remedies.is_none());
    }
}
