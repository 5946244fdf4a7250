//! Value and name substitution maps derived from the option set

use crate::postproc::classify::{NODE_DISPLAY_NAMES, SPACE_NODES, SPACE_PLACEHOLDER};
use crate::postproc::options::Options;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct Substitutions {
    /// node name -> replacement leaf text
    values: HashMap<&'static str, &'static str>,
    /// node name -> display name
    names: HashMap<&'static str, &'static str>,
}

impl Substitutions {
    pub fn new(options: &Options) -> Self {
        let values = if options.show_spaces {
            SPACE_NODES
                .iter()
                .map(|name| (*name, SPACE_PLACEHOLDER))
                .collect()
        } else {
            HashMap::new()
        };
        let names = if options.trim {
            NODE_DISPLAY_NAMES.iter().copied().collect()
        } else {
            HashMap::new()
        };
        Substitutions { values, names }
    }

    pub fn value_for(&self, name: &str) -> Option<&'static str> {
        self.values.get(name).copied()
    }

    pub fn name_for(&self, name: &str) -> Option<&'static str> {
        self.names.get(name).copied()
    }
}
