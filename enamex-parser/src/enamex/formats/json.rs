//! JSON rendition of the corpus tree.

use super::registry::{FormatError, Formatter};
use crate::enamex::ast::Corpus;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, corpus: &Corpus) -> Result<String, FormatError> {
        let mut output = serde_json::to_string_pretty(corpus)
            .map_err(|e| FormatError::Serialization(e.to_string()))?;
        output.push('\n');
        Ok(output)
    }

    fn description(&self) -> &str {
        "Corpus tree as JSON"
    }
}
