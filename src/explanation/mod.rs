pub mod types;
pub mod sections;
pub mod selection;
pub mod renderer;
pub mod formatters;

pub use types::{ExplanationView, RenderedSection, Section, Segment, SelectionSource};

pub use sections::{sections_from_value, split_sections};
pub use selection::{find_section, select_or_position, select_section, ExplanationSelector};
pub use renderer::{render_explanation, ExplanationRenderer};

pub use formatters::{HtmlFormatter, JsonFormatter, TextFormatter};
