//! Postprocessing entry points
//!
//! Decode the mode once, build the rewriter from it, rewrite the tree, then
//! serialize it with the selected format:
//!
//! ```rust,ignore
//! use camxes_postproc::postproc::postprocess;
//!
//! let text = postprocess(r#"["text",["sentence",["selbri",[["gismu","klama"]]]]]"#, "N")?;
//! assert_eq!(text, "(BRIDI: SELBRI:klama)");
//!
//! // Legacy numeric modes are still understood
//! let json = postprocess(parse_tree, 0)?;
//! ```

use crate::postproc::error::{PostprocError, Result};
use crate::postproc::formats::FormatRegistry;
use crate::postproc::options::{Mode, Options};
use crate::postproc::rewrite::{Rewriter, DEFAULT_MAX_DEPTH};
use crate::postproc::tree::ParseNode;
use serde_json::Value;

/// Format name that picks `json` or `text` from the `J` option
pub const AUTO_FORMAT: &str = "auto";

/// A parse tree as delivered by the parser: JSON text, a decoded JSON value
/// or an already built tree
#[derive(Debug, Clone)]
pub enum TreeInput {
    Json(String),
    Value(Value),
    Tree(ParseNode),
}

impl TreeInput {
    fn into_tree(self, max_depth: usize) -> Result<ParseNode> {
        match self {
            TreeInput::Json(text) => ParseNode::parse_json_with_limit(&text, max_depth),
            TreeInput::Value(value) => ParseNode::from_value_with_limit(value, max_depth),
            TreeInput::Tree(ParseNode::Leaf(text)) => Err(PostprocError::InvalidInput(format!(
                "expected a parse tree node, got the bare leaf {text:?}"
            ))),
            TreeInput::Tree(tree) => Ok(tree),
        }
    }
}

impl From<&str> for TreeInput {
    fn from(json: &str) -> Self {
        TreeInput::Json(json.to_string())
    }
}

impl From<String> for TreeInput {
    fn from(json: String) -> Self {
        TreeInput::Json(json)
    }
}

impl From<Value> for TreeInput {
    fn from(value: Value) -> Self {
        TreeInput::Value(value)
    }
}

impl From<ParseNode> for TreeInput {
    fn from(tree: ParseNode) -> Self {
        TreeInput::Tree(tree)
    }
}

/// A configured postprocessing run: options, depth limit and output format
pub struct Postprocessor {
    rewriter: Rewriter,
    registry: FormatRegistry,
    format: String,
    max_depth: usize,
}

impl Postprocessor {
    pub fn new(options: Options) -> Self {
        log::debug!("postprocessing with options {options:?}");
        Postprocessor {
            rewriter: Rewriter::new(options),
            registry: FormatRegistry::with_defaults(),
            format: AUTO_FORMAT.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn from_mode(mode: &Mode) -> Result<Self> {
        Ok(Self::new(mode.decode()?))
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.rewriter = self.rewriter.with_max_depth(max_depth);
        self.max_depth = max_depth;
        self
    }

    /// Select an output format by registry name, or [`AUTO_FORMAT`]
    pub fn with_format(mut self, format: impl Into<String>) -> Result<Self> {
        let format = format.into();
        if format != AUTO_FORMAT && !self.registry.has(&format) {
            return Err(PostprocError::InvalidOption(format!(
                "unknown output format '{format}' (available: {}, {AUTO_FORMAT})",
                self.registry.list_formats().join(", ")
            )));
        }
        self.format = format;
        Ok(self)
    }

    pub fn options(&self) -> &Options {
        self.rewriter.options()
    }

    /// The format that will actually be used
    pub fn format(&self) -> &str {
        match self.format.as_str() {
            AUTO_FORMAT if self.options().json_format => "json",
            AUTO_FORMAT => "text",
            name => name,
        }
    }

    /// Rewrite a tree without serializing it. `None` means nothing survived.
    pub fn rewrite(&self, input: impl Into<TreeInput>) -> Result<Option<ParseNode>> {
        let tree = input.into().into_tree(self.max_depth)?;
        self.rewriter.rewrite(tree)
    }

    /// Rewrite a tree and serialize the result
    pub fn process(&self, input: impl Into<TreeInput>) -> Result<String> {
        let tree = self.rewrite(input)?.unwrap_or_else(ParseNode::empty);
        let format = self.format();
        log::debug!("rendering postprocessed tree as {format}");
        Ok(self.registry.serialize(&tree, self.options(), format)?)
    }
}

/// Postprocess a parse tree with a mode given as letters or a legacy code.
pub fn postprocess(input: impl Into<TreeInput>, mode: impl Into<Mode>) -> Result<String> {
    Postprocessor::from_mode(&mode.into())?.process(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const KLAMA: &str = r#"["text",["sentence",["selbri",[["gismu","klama"]]]]]"#;

    #[test]
    fn test_postprocess_letters() {
        assert_eq!(postprocess(KLAMA, "").unwrap(), "klama");
        assert_eq!(postprocess(KLAMA, "N").unwrap(), "(BRIDI: SELBRI:klama)");
        assert_eq!(postprocess(KLAMA, "NJ").unwrap(), r#"["BRIDI:","SELBRI:klama"]"#);
    }

    #[test]
    fn test_postprocess_legacy_code() {
        // 0 is JSON + raw + terminators
        assert_eq!(
            postprocess(KLAMA, 0).unwrap(),
            r#"["text",["sentence",["selbri",[["gismu","klama"]]]]]"#
        );
        assert_eq!(postprocess(KLAMA, 2).unwrap(), "klama");
    }

    #[test]
    fn test_postprocess_value_input() {
        let value = json!(["text", ["UI", "ui"], ["spaces", " "]]);
        assert_eq!(postprocess(value, "C").unwrap(), "UI:ui");
    }

    #[test]
    fn test_fully_deleted_renders_empty() {
        assert_eq!(postprocess(r#"["text",["KU"]]"#, "").unwrap(), "()");
        assert_eq!(postprocess(r#"["text",["KU"]]"#, "J").unwrap(), "[]");
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(
            postprocess(r#"{"text": 1}"#, ""),
            Err(PostprocError::InvalidInput(_))
        ));
        assert!(matches!(
            postprocess("not json", ""),
            Err(PostprocError::InvalidInput(_))
        ));
        assert!(matches!(
            postprocess(ParseNode::leaf("klama"), ""),
            Err(PostprocError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_invalid_mode() {
        assert!(matches!(
            postprocess(KLAMA, "Q"),
            Err(PostprocError::InvalidOption(_))
        ));
        assert!(matches!(
            postprocess(KLAMA, 40),
            Err(PostprocError::InvalidOption(_))
        ));
    }

    #[test]
    fn test_explicit_format() {
        let processor = Postprocessor::new(Options::from_letters("N").unwrap())
            .with_format("json")
            .unwrap();
        assert_eq!(processor.format(), "json");
        assert_eq!(processor.process(KLAMA).unwrap(), r#"["BRIDI:","SELBRI:klama"]"#);

        let err = Postprocessor::new(Options::default()).with_format("yaml");
        assert!(matches!(err, Err(PostprocError::InvalidOption(_))));
    }

    #[test]
    fn test_deep_json_text_within_limit() {
        let deep = format!("{}\"x\"{}", "[\"a\",".repeat(200), "]".repeat(200));
        assert_eq!(postprocess(deep.as_str(), "RJ").unwrap(), deep);

        let processor = Postprocessor::new(Options::from_letters("R").unwrap()).with_max_depth(300);
        assert!(processor.process(deep.clone()).is_ok());

        let processor = Postprocessor::new(Options::from_letters("R").unwrap()).with_max_depth(100);
        assert_eq!(
            processor.process(deep),
            Err(PostprocError::DepthExceeded { limit: 100 })
        );
    }

    #[test]
    fn test_depth_limit_is_reported() {
        let processor = Postprocessor::new(Options::default()).with_max_depth(1);
        assert_eq!(
            processor.process(KLAMA),
            Err(PostprocError::DepthExceeded { limit: 1 })
        );
    }
}
