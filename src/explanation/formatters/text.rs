use crate::explanation::types::{ExplanationView, RenderedSection, Segment};

/// Plain-text formatter for terminals and logs
pub struct TextFormatter;

impl TextFormatter {
    /// Titles on their own line, bodies below, blank line between segments
    pub fn format(segments: &[Segment]) -> String {
        let mut out = String::with_capacity(512);
        for (i, segment) in segments.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            match segment {
                Segment::Title(t) => {
                    out.push_str(&t.to_uppercase());
                    out.push('\n');
                }
                Segment::Body(b) => {
                    out.push_str(b);
                    out.push('\n');
                }
            }
        }
        out
    }

    /// Format the selected parts of a view under their section titles
    pub fn format_view(view: &ExplanationView) -> String {
        let mut out = String::with_capacity(2048);
        for section in [&view.explanation, &view.remedies, &view.warnings]
            .into_iter()
            .flatten()
        {
            Self::format_section(&mut out, section);
        }
        out
    }

    fn format_section(out: &mut String, section: &RenderedSection) {
        out.push_str(&format!("== {} ==\n\n", section.title));
        out.push_str(&Self::format(&section.segments));
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_segments() {
        let text = TextFormatter::format(&[
            Segment::Title("Diet".to_string()),
            Segment::Body("• Warm soups".to_string()),
        ]);
        assert_eq!(text, "DIET\n\n• Warm soups\n");
    }

    #[test]
    fn test_format_empty() {
        assert_eq!(TextFormatter::format(&[]), "");
        assert_eq!(TextFormatter::format_view(&ExplanationView::default()), "");
    }
}
