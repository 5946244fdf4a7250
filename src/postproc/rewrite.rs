//! Tree rewriting
//!
//! The rewriter walks the parse tree once, asking the [`ActionResolver`] what
//! to do with each composite node, and rebuilds the tree from the answers:
//!
//! - deleted branches disappear from their parent (no parent ever keeps an
//!   absent child),
//! - trimmed nodes lose their label and unbox when a single element is left,
//! - flattened nodes become their surface text,
//! - with leaf prefixes on, `name`/`value` pairs collapse to `"name:value"`.
//!
//! Leaf children are never visited, only carried over.

use crate::postproc::actions::{Action, ActionResolver};
use crate::postproc::error::{PostprocError, Result};
use crate::postproc::options::Options;
use crate::postproc::substitution::Substitutions;
use crate::postproc::tree::{concatenate_leaves, ParseNode};

/// Nesting limit used when none is configured
pub const DEFAULT_MAX_DEPTH: usize = 512;

#[derive(Debug, Clone)]
pub struct Rewriter {
    resolver: ActionResolver,
    substitutions: Substitutions,
    prefix_leaf_labels: bool,
    max_depth: usize,
}

impl Rewriter {
    pub fn new(options: Options) -> Self {
        Rewriter {
            substitutions: Substitutions::new(&options),
            prefix_leaf_labels: options.prefix_leaf_labels(),
            resolver: ActionResolver::new(options),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn options(&self) -> &Options {
        self.resolver.options()
    }

    /// Rewrite a whole tree. `None` means everything was deleted.
    pub fn rewrite(&self, tree: ParseNode) -> Result<Option<ParseNode>> {
        self.rewrite_node(tree, 0)
    }

    fn rewrite_node(&self, node: ParseNode, depth: usize) -> Result<Option<ParseNode>> {
        if depth > self.max_depth {
            return Err(PostprocError::DepthExceeded {
                limit: self.max_depth,
            });
        }
        if node.is_empty() {
            return Ok(None);
        }
        let action = self.resolver.action_for(&node);
        log::trace!("{action:<8} {}", node.name().unwrap_or("[..]"));

        let (name, children) = match node {
            ParseNode::Leaf(_) => return Ok(Some(node)),
            _ if action == Action::Del => return Ok(None),
            ParseNode::Labeled(name, children) => (Some(name), children),
            ParseNode::Unlabeled(children) => (None, children),
        };

        let name = match name {
            Some(name) => {
                let substitute = self.substitutions.value_for(&name);
                if action == Action::Trim {
                    if let Some(value) = substitute {
                        return Ok(Some(ParseNode::leaf(value)));
                    }
                    None
                } else {
                    let name = match self.substitutions.name_for(&name) {
                        Some(display) => display.to_string(),
                        None => name,
                    };
                    if let Some(value) = substitute {
                        return Ok(Some(ParseNode::labeled(name, vec![ParseNode::leaf(value)])));
                    }
                    Some(name)
                }
            }
            None => None,
        };

        match action {
            Action::Flat => {
                let text = concatenate_leaves(&ParseNode::Unlabeled(children));
                return Ok(Some(self.flattened(name, text)));
            }
            Action::TrimFlat => {
                let text = concatenate_leaves(&ParseNode::Unlabeled(children));
                return Ok(Some(ParseNode::Leaf(text)));
            }
            _ => {}
        }

        let mut kept = Vec::with_capacity(children.len());
        for child in children {
            if child.is_leaf() {
                kept.push(child);
            } else if let Some(rewritten) = self.rewrite_node(child, depth + 1)? {
                kept.push(rewritten);
            }
        }

        let slots = kept.len() + usize::from(name.is_some());
        if slots == 0 {
            return Ok(None);
        }
        if slots == 1 && action != Action::Pass {
            // Either the bare name or the single surviving child
            return Ok(name.map(ParseNode::Leaf).or_else(|| kept.pop()));
        }
        let Some(name) = name else {
            return Ok(Some(ParseNode::Unlabeled(kept)));
        };
        if self.prefix_leaf_labels {
            if let [ParseNode::Leaf(value)] = kept.as_slice() {
                if !value.contains(':') {
                    return Ok(Some(ParseNode::Leaf(format!("{name}:{value}"))));
                }
                // "A:B:c" would read ambiguously, keep the nesting
                return Ok(Some(ParseNode::Labeled(format!("{name}:"), kept)));
            }
        }
        Ok(Some(ParseNode::Labeled(name, kept)))
    }

    fn flattened(&self, name: Option<String>, text: String) -> ParseNode {
        match name {
            Some(name) if text.is_empty() => ParseNode::Leaf(name),
            Some(name) if self.prefix_leaf_labels => ParseNode::Leaf(format!("{name}:{text}")),
            Some(name) => ParseNode::Labeled(name, vec![ParseNode::Leaf(text)]),
            None => ParseNode::Leaf(text),
        }
    }
}
