//! Parse tree postprocessing
//!
//! Turns the raw parse trees emitted by camxes into smaller, configurably
//! shaped trees or bracketed strings.
//!
//! Control flow of one call:
//!
//! 1. [`options`] decodes the mode into an [`Options`] record.
//! 2. [`actions`] builds the per-node [`ActionResolver`] from it.
//! 3. [`rewrite`] walks the [`ParseNode`] tree applying those actions.
//! 4. [`formats`] serializes the result, prettifying brackets for text output.

pub mod actions;
pub mod brackets;
pub mod classify;
pub mod config;
pub mod error;
pub mod formats;
pub mod options;
pub mod pipeline;
pub mod rewrite;
pub mod substitution;
pub mod tree;

pub use actions::{Action, ActionResolver};
pub use brackets::prettify_brackets;
pub use classify::{among_names, is_selmaho_name};
pub use error::{PostprocError, Result};
pub use options::{legacy_letters, Mode, Options};
pub use pipeline::{postprocess, Postprocessor, TreeInput};
pub use rewrite::Rewriter;
pub use tree::{concatenate_leaves, ParseNode};
