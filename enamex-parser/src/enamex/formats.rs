//! Output formats
//!
//! Serializers over a finished [`Corpus`](crate::enamex::ast::Corpus), collected in a
//! [`FormatRegistry`]. Two formats are built in:
//!
//! - `enamex`: the ENAMEX markup corpus (see [`tag`])
//! - `json`: the tree itself, as JSON

pub mod json;
pub mod registry;
pub mod tag;

pub use json::JsonFormatter;
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use tag::{EnamexFormatter, MarkupOptions};

/// Escape markup special characters.
///
/// Only `&`, `<`, `>` and `"` are replaced. The apostrophe is left alone, so the
/// separator inference sees the same text whatever the output format.
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
