//! Error types for parse tree postprocessing

use crate::postproc::formats::FormatError;
use thiserror::Error;

/// Errors that abort a postprocessing call
///
/// Malformed individual nodes are not reported here: they are turned into
/// opaque leaves at ingest time (see [`crate::postproc::tree`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostprocError {
    /// The input is neither a parse tree array nor a JSON text encoding one
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The mode is neither a known letter string nor a legacy code in 0..=31
    #[error("invalid option: {0}")]
    InvalidOption(String),
    /// The tree nests deeper than the configured recursion limit
    #[error("parse tree exceeds the maximum depth of {limit}")]
    DepthExceeded { limit: usize },
    #[error(transparent)]
    Format(#[from] FormatError),
}

pub type Result<T> = std::result::Result<T, PostprocError>;
