//! Explanation Renderer
//!
//! Turns a section body into display segments:
//! 1. Capturing split on `**...**`: even pieces are plain text, odd pieces are bold
//! 2. Bold pieces become subtitles
//! 3. Plain pieces get list markers swapped for glyphs, then are trimmed and
//!    dropped when empty
//!
//! The two passes are independent. A list marker that ends up in its own plain
//! piece (e.g. `1. **Ginger** tea`) renders as a lone glyph.

use crate::config::RenderConfig;
use crate::explanation::types::Segment;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid bold pattern"));

static BULLET_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*\*[ \t]+").expect("valid bullet pattern"));

static NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*\d+\.[ \t]+").expect("valid numbered pattern"));

/// Renders explanation text with a fixed pair of list glyphs
#[derive(Debug, Clone)]
pub struct ExplanationRenderer {
    bullet_prefix: String,
    numbered_prefix: String,
}

impl Default for ExplanationRenderer {
    fn default() -> Self {
        Self::new(&RenderConfig::default())
    }
}

impl ExplanationRenderer {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            bullet_prefix: format!("{} ", config.bullet_glyph),
            numbered_prefix: format!("{} ", config.numbered_glyph),
        }
    }

    /// Render text into ordered title/body segments
    ///
    /// Absent or empty input renders nothing.
    pub fn render(&self, text: Option<&str>) -> Vec<Segment> {
        let text = match text {
            Some(t) if !t.is_empty() => t,
            _ => return Vec::new(),
        };

        split_bold(text)
            .into_iter()
            .enumerate()
            .filter_map(|(i, piece)| {
                if i % 2 == 1 {
                    Some(Segment::Title(piece.trim().to_string()))
                } else {
                    let body = self.normalize_lists(piece);
                    let body = body.trim();
                    (!body.is_empty()).then(|| Segment::Body(body.to_string()))
                }
            })
            .collect()
    }

    /// Swap `* item` and `1. item` line prefixes for glyphs
    pub fn normalize_lists<'a>(&self, plain: &'a str) -> Cow<'a, str> {
        let bulleted = BULLET_ITEM.replace_all(plain, self.bullet_prefix.as_str());
        if !NUMBERED_ITEM.is_match(&bulleted) {
            return bulleted;
        }
        let numbered = NUMBERED_ITEM
            .replace_all(&bulleted, self.numbered_prefix.as_str())
            .into_owned();
        Cow::Owned(numbered)
    }
}

/// Render with the default glyphs
pub fn render_explanation(text: Option<&str>) -> Vec<Segment> {
    ExplanationRenderer::default().render(text)
}

/// Capturing split: plain, bold, plain, bold, ..., plain
fn split_bold(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut last = 0;
    for caps in BOLD.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        pieces.push(&text[last..whole.start()]);
        pieces.push(inner.as_str());
        last = whole.end();
    }
    pieces.push(&text[last..]);
    pieces
}
