pub mod text;
pub mod json;
pub mod html;

pub use text::TextFormatter;
pub use json::JsonFormatter;
pub use html::HtmlFormatter;
