//! Bracketed reading form
//!
//! Starts from the JSON encoding, drops the quotes, turns commas into spaces
//! and prettifies the brackets:
//!
//! ```text
//! ["KOhA:mi",["G:klama"]]  ->  (KOhA:mi [G:klama])
//! ```
//!
//! With word classes shown, a label directly followed by a nested node gets
//! a colon (`[sumti,[` becomes `[sumti: [`).

use super::registry::{FormatError, Formatter};
use crate::postproc::brackets::prettify_brackets;
use crate::postproc::options::Options;
use crate::postproc::tree::ParseNode;
use once_cell::sync::Lazy;
use regex::Regex;

static LABEL_BEFORE_NODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([a-zA-Z0-9_-]+),\[").expect("label pattern is a valid regex"));

pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn serialize(&self, tree: &ParseNode, options: &Options) -> Result<String, FormatError> {
        let json =
            serde_json::to_string(tree).map_err(|e| FormatError::SerializationError(e.to_string()))?;
        Ok(render_text(&json, options.show_selmaho))
    }

    fn description(&self) -> &str {
        "Human-readable bracketed tree"
    }
}

/// Turn a JSON rendering of a tree into the bracketed reading form.
pub fn render_text(json: &str, label_colons: bool) -> String {
    let mut text = json.replace('"', "");
    if label_colons {
        text = LABEL_BEFORE_NODE.replace_all(&text, "[$1: [").into_owned();
    }
    prettify_brackets(&text.replace(',', " "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain() {
        assert_eq!(render_text(r#"["mi","klama"]"#, false), "(mi klama)");
        assert_eq!(render_text(r#""klama""#, false), "klama");
        assert_eq!(render_text("[]", false), "()");
    }

    #[test]
    fn test_render_label_colons() {
        assert_eq!(
            render_text(r#"["sumti",["KOhA","mi"]]"#, true),
            "(sumti: [KOhA mi])"
        );
        assert_eq!(
            render_text(r#"["sumti",["KOhA","mi"]]"#, false),
            "(sumti [KOhA mi])"
        );
    }
}
