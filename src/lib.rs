//! Prediction Explainer
//!
//! Structures the free-text explanations returned by the health-prediction and
//! Ayurvedic-chat backend so any client can display them.
//!
//! - `explanation/`: section splitting, keyword selection, segment rendering, formatters
//! - `response`: typed normalization of prediction and chat payloads
//! - `config`: list glyphs and section keyword sets
//! - `api_server`: REST service over the above (feature `api`)

pub mod config;
pub mod explanation;
pub mod response;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use config::RenderConfig;
pub use explanation::{
    render_explanation, select_section, split_sections, ExplanationRenderer, ExplanationSelector,
    ExplanationView, HtmlFormatter, JsonFormatter, Section, Segment, TextFormatter,
};
pub use response::{ChatReply, ChatResponse, Field, PredictionReport, PredictionResponse, ResponseError};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState, ServerConfig};
