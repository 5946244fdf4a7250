//! Output formats for postprocessed trees
//!
//! - `json`: the tree in its array encoding
//! - `text`: a bracketed reading form with quotes dropped and brackets prettified

pub mod json;
pub mod registry;
pub mod text;

pub use json::JsonFormatter;
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use text::{render_text, TextFormatter};
