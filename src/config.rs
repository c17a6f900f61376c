//! Render Configuration
//!
//! Glyphs for list normalization and keyword sets for locating the
//! explanation, remedy and warning sections. Loaded from JSON; every field is
//! optional and falls back to the defaults below.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Replaces `* ` list markers
    pub bullet_glyph: String,
    /// Replaces `1. ` list markers (the numeral is dropped)
    pub numbered_glyph: String,
    pub explanation_keywords: Vec<String>,
    pub remedy_keywords: Vec<String>,
    pub warning_keywords: Vec<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            bullet_glyph: "•".to_string(),
            numbered_glyph: "▸".to_string(),
            explanation_keywords: keyword_list(&["why", "reason", "explanation", "predict"]),
            remedy_keywords: keyword_list(&["remed", "treatment", "ayurved", "therapy"]),
            warning_keywords: keyword_list(&["warning", "caution", "precaution", "when to see"]),
        }
    }
}

impl RenderConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read render config: {:?}", path))?;

        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let mut config: RenderConfig = serde_json::from_str(contents)
            .with_context(|| "Failed to parse render config JSON")?;

        if config.bullet_glyph.trim().is_empty() || config.numbered_glyph.trim().is_empty() {
            anyhow::bail!("List glyphs must not be empty");
        }

        // Matching is against lowercased titles
        for keywords in [
            &mut config.explanation_keywords,
            &mut config.remedy_keywords,
            &mut config.warning_keywords,
        ] {
            for k in keywords.iter_mut() {
                *k = k.trim().to_lowercase();
            }
            keywords.retain(|k| !k.is_empty());
        }

        Ok(config)
    }

    /// Load from the path in `EXPLAIN_CONFIG`, or use defaults when unset
    pub fn from_env() -> Result<Self> {
        match std::env::var("EXPLAIN_CONFIG") {
            Ok(path) if !path.is_empty() => Self::load(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }
}

fn keyword_list(keywords: &[&str]) -> Vec<String> {
    keywords.iter().map(|k| k.to_string()).collect()
}
