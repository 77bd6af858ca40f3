//! Shared configuration loader for the enamex converter.
//!
//! `defaults/enamex.default.toml` is embedded into the binary so that the documented
//! defaults and runtime behavior stay in sync. Applications layer user-specific files
//! on top of those defaults via [`Loader`] before deserializing into [`EnamexConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use enamex_parser::enamex::formats::MarkupOptions;
use enamex_parser::enamex::layout::{Layout, LayoutProfile};
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/enamex.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EnamexConfig {
    pub legacy: LegacyConfig,
    pub conll: ConllConfig,
    pub output: OutputConfig,
}

/// Knobs for the tab-separated legacy layout.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyConfig {
    pub punctuation: String,
    pub class_attribute: String,
}

/// Knobs for the four-column layout.
#[derive(Debug, Clone, Deserialize)]
pub struct ConllConfig {
    pub punctuation: String,
    pub class_attribute: String,
    pub document_marker: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub indent: String,
}

impl EnamexConfig {
    /// The layout profile for one input layout.
    pub fn profile(&self, layout: Layout) -> LayoutProfile {
        match layout {
            Layout::Legacy => LayoutProfile::legacy()
                .with_punctuation(self.legacy.punctuation.chars())
                .with_class_attribute(&self.legacy.class_attribute),
            Layout::Conll => LayoutProfile::conll()
                .with_punctuation(self.conll.punctuation.chars())
                .with_class_attribute(&self.conll.class_attribute)
                .with_document_marker(&self.conll.document_marker),
        }
    }

    /// Options for the markup formatter when converting `layout` input.
    pub fn markup_options(&self, layout: Layout) -> MarkupOptions {
        MarkupOptions::for_profile(&self.profile(layout)).with_indent(&self.output.indent)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.conll.document_marker.is_empty() {
            return Err(ConfigError::Message(
                "conll.document_marker must not be empty".to_string(),
            ));
        }
        for (key, attribute) in [
            ("legacy.class_attribute", &self.legacy.class_attribute),
            ("conll.class_attribute", &self.conll.class_attribute),
        ] {
            if !is_attribute_name(attribute) {
                return Err(ConfigError::Message(format!(
                    "{key} is not a valid attribute name: {attribute:?}"
                )));
            }
        }
        Ok(self)
    }
}

fn is_attribute_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => chars
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')),
        _ => false,
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

    /// Apply a single key/value override.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder, deserialize and validate the resulting configuration.
    pub fn build(self) -> Result<EnamexConfig, ConfigError> {
        self.builder
            .build()?
            .try_deserialize::<EnamexConfig>()?
            .validate()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<EnamexConfig, ConfigError> {
    Loader::new().build()
}
