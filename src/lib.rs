//! # camxes-postproc
//!
//! Postprocessing of camxes parse trees: trimming, flattening and pretty
//! printing of the raw output of the Lojban grammar parser.
//!
//! The entry point is [`postproc::postprocess`]; see the [`postproc`] module
//! for the individual stages.

pub mod postproc;
