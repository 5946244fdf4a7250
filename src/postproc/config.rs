//! Layered configuration loading
//!
//! `defaults/postproc.default.toml` is embedded into the binary so that docs
//! and runtime behavior stay in sync. Callers layer user files and overrides
//! on top of those defaults via [`Loader`] before deserializing into
//! [`PostprocConfig`].

use crate::postproc::error::Result;
use crate::postproc::options::Mode;
use crate::postproc::pipeline::Postprocessor;
use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/postproc.default.toml");

/// Per-directory configuration file picked up when present
pub const LOCAL_CONFIG_FILE: &str = "camxes-postproc.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct PostprocConfig {
    pub postprocess: PostprocessConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostprocessConfig {
    pub mode: String,
    pub max_depth: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub format: String,
}

impl PostprocConfig {
    pub fn mode(&self) -> Result<Mode> {
        self.postprocess.mode.parse()
    }

    /// Build a postprocessor honoring every configured setting
    pub fn postprocessor(&self) -> Result<Postprocessor> {
        Postprocessor::from_mode(&self.mode()?)?
            .with_max_depth(self.postprocess.max_depth)
            .with_format(self.render.format.as_str())
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> std::result::Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> std::result::Result<PostprocConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> std::result::Result<PostprocConfig, ConfigError> {
    Loader::new().build()
}
