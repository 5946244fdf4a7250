//! Parse tree model
//!
//! The parser hands us a loosely typed nesting of JSON arrays and strings:
//!
//! ```text
//! ["text", ["sentence", ["selbri", [["gismu", "klama"]]]]]
//! ```
//!
//! An array whose first slot is a string is a labeled node, an array whose
//! first slot is another array is an unlabeled sequence, and strings anywhere
//! else are terminal token values. [`ParseNode`] makes that shape explicit so the
//! rewriter can match on it instead of sniffing array slots.

use crate::postproc::error::{PostprocError, Result};
use crate::postproc::rewrite::DEFAULT_MAX_DEPTH;
use serde::ser::{Serialize, SerializeSeq, Serializer};
use serde::Deserialize;
use serde_json::Value;

/// A node of a camxes parse tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseNode {
    /// A terminal token value
    Leaf(String),
    /// A named non-terminal; children may be empty
    Labeled(String, Vec<ParseNode>),
    /// A bare sequence produced by a rule without a name
    Unlabeled(Vec<ParseNode>),
}

impl ParseNode {
    pub fn leaf(text: impl Into<String>) -> Self {
        ParseNode::Leaf(text.into())
    }

    pub fn labeled(name: impl Into<String>, children: Vec<ParseNode>) -> Self {
        ParseNode::Labeled(name.into(), children)
    }

    pub fn unlabeled(children: Vec<ParseNode>) -> Self {
        ParseNode::Unlabeled(children)
    }

    /// The empty sequence `[]`, used to render a fully deleted tree
    pub fn empty() -> Self {
        ParseNode::Unlabeled(Vec::new())
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            ParseNode::Labeled(name, _) => Some(name),
            _ => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, ParseNode::Leaf(_))
    }

    pub fn children(&self) -> &[ParseNode] {
        match self {
            ParseNode::Leaf(_) => &[],
            ParseNode::Labeled(_, children) | ParseNode::Unlabeled(children) => children,
        }
    }

    /// Number of slots the node occupies in its array encoding, name included.
    ///
    /// `["KU"]` has arity 1, as does `[["gismu", "klama"]]`.
    pub fn arity(&self) -> usize {
        match self {
            ParseNode::Leaf(_) => 1,
            ParseNode::Labeled(_, children) => children.len() + 1,
            ParseNode::Unlabeled(children) => children.len(),
        }
    }

    /// True for `[]`: no name and no children
    pub fn is_empty(&self) -> bool {
        matches!(self, ParseNode::Unlabeled(children) if children.is_empty())
    }

    /// Parse a JSON text into a tree. The top-level value must be an array.
    pub fn parse_json(input: &str) -> Result<Self> {
        Self::parse_json_with_limit(input, DEFAULT_MAX_DEPTH)
    }

    /// Parse a JSON text, failing once nesting passes `max_depth`.
    ///
    /// The nesting is measured on the raw text first, so an oversized tree is
    /// rejected before any of it is decoded.
    pub fn parse_json_with_limit(input: &str, max_depth: usize) -> Result<Self> {
        check_nesting(input, max_depth)?;
        let mut json = serde_json::Deserializer::from_str(input);
        json.disable_recursion_limit();
        let value = Value::deserialize(serde_stacker::Deserializer::new(&mut json))
            .map_err(|e| PostprocError::InvalidInput(e.to_string()))?;
        json.end()
            .map_err(|e| PostprocError::InvalidInput(e.to_string()))?;
        Self::from_value_with_limit(value, max_depth)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        Self::from_value_with_limit(value, DEFAULT_MAX_DEPTH)
    }

    /// Convert a decoded JSON value, failing once nesting passes `max_depth`.
    pub fn from_value_with_limit(value: Value, max_depth: usize) -> Result<Self> {
        match value {
            Value::Array(items) => node_from_items(items, 0, max_depth),
            other => Err(PostprocError::InvalidInput(format!(
                "expected a parse tree array or its JSON text, got {}",
                value_kind(&other)
            ))),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            ParseNode::Leaf(text) => Value::String(text.clone()),
            ParseNode::Labeled(name, children) => {
                let mut items = Vec::with_capacity(children.len() + 1);
                items.push(Value::String(name.clone()));
                items.extend(children.iter().map(ParseNode::to_value));
                Value::Array(items)
            }
            ParseNode::Unlabeled(children) => {
                Value::Array(children.iter().map(ParseNode::to_value).collect())
            }
        }
    }
}

/// Reject JSON text whose bracket nesting cannot fit in `max_depth`.
///
/// The root array sits at depth 0, so `max_depth + 1` open brackets are allowed.
/// Brackets inside string literals are skipped.
fn check_nesting(input: &str, max_depth: usize) -> Result<()> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for byte in input.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                if depth > max_depth.saturating_add(1) {
                    return Err(PostprocError::DepthExceeded { limit: max_depth });
                }
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

fn node_from_items(items: Vec<Value>, depth: usize, max_depth: usize) -> Result<ParseNode> {
    if depth > max_depth {
        return Err(PostprocError::DepthExceeded { limit: max_depth });
    }
    let mut items = items.into_iter();
    match items.next() {
        None => Ok(ParseNode::empty()),
        Some(Value::String(name)) => {
            let children = items
                .map(|item| node_from_element(item, depth, max_depth))
                .collect::<Result<Vec<_>>>()?;
            Ok(ParseNode::Labeled(name, children))
        }
        Some(first) => {
            let children = std::iter::once(first)
                .chain(items)
                .map(|item| node_from_element(item, depth, max_depth))
                .collect::<Result<Vec<_>>>()?;
            Ok(ParseNode::Unlabeled(children))
        }
    }
}

fn node_from_element(value: Value, depth: usize, max_depth: usize) -> Result<ParseNode> {
    match value {
        Value::String(text) => Ok(ParseNode::Leaf(text)),
        Value::Array(items) => node_from_items(items, depth + 1, max_depth),
        other => {
            // A single odd token must not sink the whole sentence.
            log::warn!(
                "unexpected {} in parse tree, keeping it as opaque leaf text",
                value_kind(&other)
            );
            Ok(ParseNode::Leaf(other.to_string()))
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Serialize for ParseNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ParseNode::Leaf(text) => serializer.serialize_str(text),
            ParseNode::Labeled(name, children) => {
                let mut seq = serializer.serialize_seq(Some(children.len() + 1))?;
                seq.serialize_element(name)?;
                for child in children {
                    seq.serialize_element(child)?;
                }
                seq.end()
            }
            ParseNode::Unlabeled(children) => {
                let mut seq = serializer.serialize_seq(Some(children.len()))?;
                for child in children {
                    seq.serialize_element(child)?;
                }
                seq.end()
            }
        }
    }
}

/// Concatenate every terminal value under `node`, in document order.
///
/// Node names are skipped; a leaf yields its own text. Walks with an explicit
/// stack, so arbitrarily deep subtrees cannot overflow the call stack.
pub fn concatenate_leaves(node: &ParseNode) -> String {
    if let ParseNode::Leaf(text) = node {
        return text.clone();
    }
    let mut text = String::new();
    let mut stack = vec![node.children().iter()];
    while let Some(level) = stack.last_mut() {
        match level.next() {
            Some(ParseNode::Leaf(value)) => text.push_str(value),
            Some(child) => stack.push(child.children().iter()),
            None => {
                stack.pop();
            }
        }
    }
    text
}
