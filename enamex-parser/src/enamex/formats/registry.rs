//! Format registry for corpus serialization
//!
//! Each format implements the `Formatter` trait and is registered by name with
//! `FormatRegistry`. The CLI resolves `--format` through it.

use std::collections::HashMap;
use thiserror::Error;

use super::tag::MarkupOptions;
use crate::enamex::ast::Corpus;

/// Error that can occur during formatting
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Trait for corpus formatters
pub trait Formatter: Send + Sync {
    /// The name of this format (e.g. "enamex", "json")
    fn name(&self) -> &str;

    fn serialize(&self, corpus: &Corpus) -> Result<String, FormatError>;

    fn description(&self) -> &str {
        ""
    }
}

/// Registry of corpus formatters
pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter
    ///
    /// If a formatter with the same name already exists, it will be replaced.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Serialize a corpus using the specified format
    pub fn serialize(&self, corpus: &Corpus, format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(corpus)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Create a registry with the built-in formatters, the markup one configured
    /// with `options`.
    pub fn with_defaults(options: MarkupOptions) -> Self {
        let mut registry = Self::new();
        registry.register(super::EnamexFormatter::new(options));
        registry.register(super::JsonFormatter);
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults(MarkupOptions::default())
    }
}
