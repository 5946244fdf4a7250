//! Per-node rewrite action resolution
//!
//! Two independent axes decide what happens to a node: flattening (collapse
//! the subtree to its surface text) and trimming (drop the node's label).
//! Deletion takes precedence over both.
//!
//! | flatten | trim  | result                                   |
//! |---------|-------|------------------------------------------|
//! | yes     | yes   | [`Action::TrimFlat`]                     |
//! | yes     | no    | [`Action::Flat`]                         |
//! | no      | yes   | [`Action::Trim`]                         |
//! | no      | no    | [`Action::Unbox`] if trimming and arity 1, else [`Action::Pass`] |

use crate::postproc::classify::{
    among_names, is_selmaho_name, MAIN_NODE_LABELS, MORPHOLOGY_CATEGORIES, SPACE_NODES,
};
use crate::postproc::options::Options;
use crate::postproc::tree::ParseNode;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Remove the branch
    Del,
    /// Drop the label; a single remaining child replaces the node
    Trim,
    /// Replace the content with the concatenated leaves, keeping the label
    Flat,
    /// Replace the whole node with the concatenated leaves
    TrimFlat,
    /// Replace the node by its only element
    Unbox,
    /// Leave the node as is
    Pass,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Del => "DEL",
            Action::Trim => "TRIM",
            Action::Flat => "FLAT",
            Action::TrimFlat => "TRIMFLAT",
            Action::Unbox => "UNBOX",
            Action::Pass => "PASS",
        };
        f.pad(name)
    }
}

/// Maps nodes to actions for one fixed option set
#[derive(Debug, Clone)]
pub struct ActionResolver {
    options: Options,
    whitelist: Vec<&'static str>,
}

impl ActionResolver {
    pub fn new(options: Options) -> Self {
        let mut whitelist = Vec::new();
        if options.show_selmaho {
            whitelist.extend_from_slice(MORPHOLOGY_CATEGORIES);
        }
        if options.show_node_labels {
            whitelist.extend_from_slice(MAIN_NODE_LABELS);
        }
        ActionResolver { options, whitelist }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn action_for(&self, node: &ParseNode) -> Action {
        let name = node.name();
        let bare = node.arity() == 1;
        let selmaho = name.is_some_and(is_selmaho_name);

        if self.is_removal_target(name, selmaho, bare) {
            return Action::Del;
        }
        match (
            self.is_flattening_target(name, selmaho),
            self.is_trimming_target(name, selmaho, bare),
        ) {
            (true, true) => Action::TrimFlat,
            (true, false) => Action::Flat,
            (false, true) => Action::Trim,
            (false, false) if self.options.trim && bare => Action::Unbox,
            (false, false) => Action::Pass,
        }
    }

    fn is_removal_target(&self, name: Option<&str>, selmaho: bool, bare: bool) -> bool {
        if !self.options.show_spaces && name.is_some_and(|n| among_names(n, SPACE_NODES)) {
            return true;
        }
        // A terminator with no token under it
        !self.options.show_terminators && selmaho && bare
    }

    fn is_flattening_target(&self, name: Option<&str>, selmaho: bool) -> bool {
        if self.options.keep_morphology {
            return false;
        }
        selmaho || name.is_some_and(|n| among_names(n, MORPHOLOGY_CATEGORIES))
    }

    fn is_trimming_target(&self, name: Option<&str>, selmaho: bool, bare: bool) -> bool {
        if !self.options.trim {
            return false;
        }
        if self.options.show_terminators && selmaho && bare {
            return false;
        }
        if self.options.show_selmaho && selmaho {
            return false;
        }
        !name.is_some_and(|n| among_names(n, &self.whitelist))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(letters: &str) -> ActionResolver {
        ActionResolver::new(Options::from_letters(letters).unwrap())
    }

    fn node(json: &str) -> ParseNode {
        ParseNode::parse_json(json).unwrap()
    }

    #[test]
    fn test_spaces_deleted_unless_shown() {
        let spaces = node(r#"["spaces"," "]"#);
        assert_eq!(resolver("").action_for(&spaces), Action::Del);
        assert_eq!(resolver("R").action_for(&spaces), Action::Del);
        assert_eq!(resolver("S").action_for(&spaces), Action::Trim);
        assert_eq!(resolver("SR").action_for(&spaces), Action::Pass);
    }

    #[test]
    fn test_bare_terminators() {
        let terminator = node(r#"["KU"]"#);
        assert_eq!(resolver("").action_for(&terminator), Action::Del);
        assert_eq!(resolver("T").action_for(&terminator), Action::Flat);
        assert_eq!(resolver("TM").action_for(&terminator), Action::Unbox);
        assert_eq!(resolver("TMR").action_for(&terminator), Action::Pass);
    }

    #[test]
    fn test_morphology_nodes() {
        let gismu = node(r#"["gismu",["k","k"],["l","l"]]"#);
        assert_eq!(resolver("").action_for(&gismu), Action::TrimFlat);
        assert_eq!(resolver("C").action_for(&gismu), Action::Flat);
        assert_eq!(resolver("R").action_for(&gismu), Action::Flat);
        assert_eq!(resolver("M").action_for(&gismu), Action::Trim);
        assert_eq!(resolver("MC").action_for(&gismu), Action::Pass);
    }

    #[test]
    fn test_selmaho_with_token() {
        let koha = node(r#"["KOhA","mi"]"#);
        assert_eq!(resolver("").action_for(&koha), Action::TrimFlat);
        assert_eq!(resolver("C").action_for(&koha), Action::Flat);
        assert_eq!(resolver("T").action_for(&koha), Action::TrimFlat);
        assert_eq!(resolver("MC").action_for(&koha), Action::Pass);
    }

    #[test]
    fn test_main_labels_kept_with_n() {
        let sentence = node(r#"["sentence",["selbri","klama"]]"#);
        assert_eq!(resolver("").action_for(&sentence), Action::Trim);
        assert_eq!(resolver("N").action_for(&sentence), Action::Pass);
        assert_eq!(resolver("N").action_for(&node(r#"["sentence"]"#)), Action::Unbox);
    }

    #[test]
    fn test_unlabeled_nodes() {
        let single = node(r#"[["gismu","klama"]]"#);
        assert_eq!(resolver("").action_for(&single), Action::Trim);
        assert_eq!(resolver("N").action_for(&single), Action::Trim);
        assert_eq!(resolver("R").action_for(&single), Action::Pass);
    }

    #[test]
    fn test_action_display() {
        assert_eq!(Action::TrimFlat.to_string(), "TRIMFLAT");
        assert_eq!(Action::Del.to_string(), "DEL");
    }
}
