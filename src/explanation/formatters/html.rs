use crate::explanation::types::{ExplanationView, RenderedSection, Segment};
use askama_escape::Html;

/// HTML formatter for rendered explanations
pub struct HtmlFormatter;

impl HtmlFormatter {
    /// Format segments as an HTML fragment
    ///
    /// Titles become `h3.section-subtitle`, bodies become `p.body` with line
    /// breaks kept as `<br>`.
    pub fn format(segments: &[Segment]) -> String {
        let mut html = String::with_capacity(1024);
        for segment in segments {
            match segment {
                Segment::Title(t) => {
                    html.push_str(&format!(
                        "<h3 class=\"section-subtitle\">{}</h3>\n",
                        escape(t)
                    ));
                }
                Segment::Body(b) => {
                    let lines: Vec<String> = b.lines().map(escape).collect();
                    html.push_str(&format!("<p class=\"body\">{}</p>\n", lines.join("<br>\n")));
                }
            }
        }
        html
    }

    /// Format the selected parts of a view as standalone HTML with embedded CSS
    pub fn format_view(view: &ExplanationView) -> String {
        let mut html = String::with_capacity(4096);

        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        html.push_str("<meta charset=\"UTF-8\">\n");
        html.push_str("<title>Prediction Explanation</title>\n");
        html.push_str("<style>\n");
        html.push_str("body { font-family: system-ui, sans-serif; max-width: 800px; margin: 40px auto; padding: 20px; line-height: 1.6; }\n");
        html.push_str("h2 { color: #34495e; border-bottom: 2px solid #ecf0f1; padding-bottom: 5px; margin-top: 30px; }\n");
        html.push_str(".section-subtitle { color: #2c3e50; margin: 16px 0 4px; }\n");
        html.push_str(".explanation { background: #eef6fb; border-left: 4px solid #3498db; padding: 15px; margin: 15px 0; border-radius: 4px; }\n");
        html.push_str(".remedies { background: #d4edda; border-left: 4px solid #28a745; padding: 15px; margin: 15px 0; border-radius: 4px; }\n");
        html.push_str(".warnings { background: #fff3cd; border-left: 4px solid #ffc107; padding: 15px; margin: 15px 0; border-radius: 4px; }\n");
        html.push_str("</style>\n</head>\n<body>\n");

        if let Some(section) = &view.explanation {
            Self::format_section(&mut html, "explanation", section);
        }
        if let Some(section) = &view.remedies {
            Self::format_section(&mut html, "remedies", section);
        }
        if let Some(section) = &view.warnings {
            Self::format_section(&mut html, "warnings", section);
        }

        html.push_str("</body>\n</html>\n");
        html
    }

    fn format_section(html: &mut String, class: &str, section: &RenderedSection) {
        html.push_str(&format!("<div class=\"{}\">\n", class));
        html.push_str(&format!("<h2>{}</h2>\n", escape(&section.title)));
        html.push_str(&Self::format(&section.segments));
        html.push_str("</div>\n");
    }
}

fn escape(text: &str) -> String {
    askama_escape::escape(text, Html).to_string()
}
