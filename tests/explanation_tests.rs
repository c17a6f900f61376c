//! Explanation Pipeline Tests
//!
//! End-to-end checks from raw backend text through section splitting, keyword
//! selection and segment rendering.

use prediction_explainer::explanation::{select_or_position, SelectionSource};
use prediction_explainer::{
    render_explanation, select_section, split_sections, ExplanationSelector, PredictionReport,
    PredictionResponse, RenderConfig, Section, Segment,
};
use serde_json::json;

const AYURVEDIC_SAMPLE: &str = "## **Why the model predicted this**\nFever and cough indicate viral infection.\n## **Ayurvedic Remedies**\n* Ginger tea\n* Rest";

#[test]
fn test_text_without_heading_marker_has_no_sections() {
    let inputs = [
        "plain text",
        "# **Title**\nbody",
        "##**Tight**\nbody",
        "**Bold** only\n* list",
        "## Title without bold\ntext",
    ];
    for input in inputs {
        assert!(!input.contains("## **"));
        assert!(split_sections(Some(input)).is_empty(), "input: {:?}", input);
    }
}

#[test]
fn test_well_formed_document() {
    assert_eq!(
        split_sections(Some("## **A**\nbody1\n## **B**\nbody2")),
        vec![Section::new("A", "body1"), Section::new("B", "body2")]
    );
}

#[test]
fn test_missing_and_empty_input() {
    assert_eq!(split_sections(None), vec![]);
    assert_eq!(split_sections(Some("")), vec![]);
}

#[test]
fn test_split_is_idempotent() {
    let first = split_sections(Some(AYURVEDIC_SAMPLE));
    let second = split_sections(Some(AYURVEDIC_SAMPLE));
    assert_eq!(first, second);
}

#[test]
fn test_keyword_match_case_insensitive() {
    let sections = split_sections(Some(AYURVEDIC_SAMPLE));
    assert_eq!(
        select_section(&sections, &["why"]),
        Some("Fever and cough indicate viral infection.")
    );
}

#[test]
fn test_keyword_match_first_section_wins() {
    let sections = split_sections(Some(
        "## **Remedies for fever**\nTulsi\n## **Remedies for cough**\nHoney",
    ));
    assert_eq!(select_section(&sections, &["remedies"]), Some("Tulsi"));
}

#[test]
fn test_renderer_basic_cases() {
    assert!(render_explanation(Some("")).is_empty());
    assert!(render_explanation(None).is_empty());
    assert_eq!(
        render_explanation(Some("**Title**\ncontent")),
        vec![
            Segment::Title("Title".to_string()),
            Segment::Body("content".to_string())
        ]
    );
}

#[test]
fn test_renderer_list_glyphs() {
    let bullets = render_explanation(Some("* item one\n* item two"));
    assert_eq!(bullets.len(), 1);
    for line in bullets[0].text().lines() {
        assert!(line.starts_with("• "), "line: {:?}", line);
        assert!(!line.starts_with('*'));
    }

    let numbered = render_explanation(Some("1. step one\n2. step two"));
    assert_eq!(numbered.len(), 1);
    for line in numbered[0].text().lines() {
        assert!(line.starts_with("▸ "), "line: {:?}", line);
        assert!(!line.chars().next().unwrap().is_ascii_digit());
    }
}

#[test]
fn test_ayurvedic_scenario() {
    let sections = split_sections(Some(AYURVEDIC_SAMPLE));
    assert_eq!(sections.len(), 2);

    assert_eq!(
        select_section(&sections, &["why"]),
        Some("Fever and cough indicate viral infection.")
    );

    let remedies = select_section(&sections, &["remedies"]).unwrap();
    assert_eq!(remedies, "* Ginger tea\n* Rest");

    let segments = render_explanation(Some(remedies));
    assert_eq!(segments, vec![Segment::Body("• Ginger tea\n• Rest".to_string())]);
}

#[test]
fn test_positional_fallback_when_titles_drift() {
    let sections = split_sections(Some("## **Summary**\nA\n## **What helps**\nB"));
    let (section, source) = select_or_position(&sections, &["remed"], Some(1)).unwrap();
    assert_eq!(section.body, "B");
    assert_eq!(source, SelectionSource::Position);
}

#[test]
fn test_prediction_payload_to_report() {
    let payload = json!({
        "disease": "Viral Fever",
        "confidence": 0.82,
        "explanation": format!("Model output follows.\n{}\n## **Precautions**\nSee a doctor if fever persists.", AYURVEDIC_SAMPLE),
    });

    let response = PredictionResponse::from_value(&payload).unwrap();
    let config = RenderConfig::default();
    let report = PredictionReport::build(&response, &ExplanationSelector::new(&config));

    assert_eq!(report.disease.as_deref(), Some("Viral Fever"));
    assert_eq!(report.explanation.sections.len(), 3);

    let explanation = report.explanation.explanation.unwrap();
    assert_eq!(explanation.source, SelectionSource::Keyword);
    assert_eq!(explanation.body, "Fever and cough indicate viral infection.");

    let remedies = report.explanation.remedies.unwrap();
    assert_eq!(remedies.title, "Ayurvedic Remedies");

    let warnings = report.explanation.warnings.unwrap();
    assert_eq!(
        warnings.segments,
        vec![Segment::Body("See a doctor if fever persists.".to_string())]
    );

    assert!(report.remedies.is_empty());
    assert_eq!(report.missing_fields, vec!["remedies"]);
}
