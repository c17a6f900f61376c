//! Render an explanation document from a file or stdin
//!
//! Usage: render_explanation [--html | --json] [PATH]
//!
//! Prints the explanation, remedies and warnings sections picked out of the
//! document. Reads stdin when no path is given.

use anyhow::{Context, Result};
use prediction_explainer::{ExplanationSelector, HtmlFormatter, JsonFormatter, RenderConfig, TextFormatter};
use std::io::Read;
use std::path::Path;

fn main() -> Result<()> {
    let mut format = "text";
    let mut path: Option<String> = None;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--html" => format = "html",
            "--json" => format = "json",
            "--text" => format = "text",
            other if other.starts_with("--") => anyhow::bail!("Unknown option: {}", other),
            other => path = Some(other.to_string()),
        }
    }

    let text = match &path {
        Some(p) => std::fs::read_to_string(Path::new(p))
            .with_context(|| format!("Failed to read explanation file: {}", p))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let config = RenderConfig::from_env()?;
    let view = ExplanationSelector::new(&config).build(Some(text.as_str()));

    if view.is_empty() {
        eprintln!("No `## **Title**` sections found");
        return Ok(());
    }

    let output = match format {
        "html" => HtmlFormatter::format_view(&view),
        "json" => JsonFormatter::format_view(&view)?,
        _ => TextFormatter::format_view(&view),
    };
    print!("{}", output);

    Ok(())
}
