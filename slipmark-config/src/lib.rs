//! Shared configuration loader for the slipmark toolchain.
//!
//! `defaults/slipmark.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files
//! on top of those defaults via [`Loader`] before deserializing into
//! [`SlipmarkConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use slipmark_core::formats::markdown::Target;
use slipmark_core::pattern::AutoformatOptions;
use std::collections::HashMap;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/slipmark.default.toml");

/// Top-level configuration consumed by slipmark applications.
#[derive(Debug, Clone, Deserialize)]
pub struct SlipmarkConfig {
    pub autoformat: AutoformatConfig,
    pub convert: ConvertConfig,
    pub logging: LoggingConfig,
}

/// Which shortcuts the editor recognizes.
#[derive(Debug, Clone, Deserialize)]
pub struct AutoformatConfig {
    pub block_prefixes: bool,
    pub inline_delimiters: bool,
    pub disabled: Vec<String>,
}

impl From<&AutoformatConfig> for AutoformatOptions {
    fn from(config: &AutoformatConfig) -> Self {
        AutoformatOptions {
            block_prefixes: config.block_prefixes,
            inline_delimiters: config.inline_delimiters,
            disabled: config.disabled.clone(),
        }
    }
}

/// Format-specific conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub default_format: String,
    pub markdown: MarkdownConfig,
    pub html: HtmlConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    pub target: Target,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub wrapper_class: String,
}

impl ConvertConfig {
    /// Serializer parameters the configuration implies for `format`.
    ///
    /// Explicit parameters given by the caller are layered on top of these.
    pub fn format_options(&self, format: &str) -> HashMap<String, String> {
        let mut options = HashMap::new();
        match format {
            "markdown" => {
                options.insert(
                    "target".to_string(),
                    self.markdown.target.to_string(),
                );
            }
            "html" => {
                options.insert("class".to_string(), self.html.wrapper_class.clone());
            }
            _ => {}
        }
        options
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
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
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<SlipmarkConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<SlipmarkConfig, ConfigError> {
    Loader::new().build()
}
