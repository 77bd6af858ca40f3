//! ENAMEX markup serialization
//!
//! ## Format
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <corpus>
//!     <subcorpus>
//!         <document name="eng.train_1">
//!             <paragraph xml:id="P0">
//!                 <sentence xml:id="P0E1"><ENAMEX type="ORGANISATION">EU</ENAMEX> rejects</sentence>
//!             </paragraph>
//!         </document>
//!     </subcorpus>
//! </corpus>
//! ```
//!
//! Each sentence is written on a single line. The separator of a token that opens a
//! span goes in front of the `<ENAMEX` opening, never inside it.

use super::escape_markup;
use super::registry::{FormatError, Formatter};
use crate::enamex::ast::{Corpus, Document, Sentence, Span};
use crate::enamex::layout::LayoutProfile;
use crate::enamex::spacing::SEPARATOR;

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupOptions {
    /// Attribute carrying the span class: `class` or `type`.
    pub class_attribute: String,
    /// One level of indentation.
    pub indent: String,
}

impl MarkupOptions {
    /// Options matching a layout profile's span attribute, with the default indent.
    pub fn for_profile(profile: &LayoutProfile) -> Self {
        Self {
            class_attribute: profile.class_attribute.clone(),
            ..Self::default()
        }
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Self {
            class_attribute: "class".to_string(),
            indent: "\t".to_string(),
        }
    }
}

struct TagSerializer<'a> {
    options: &'a MarkupOptions,
    output: String,
    indent_level: usize,
}

impl<'a> TagSerializer<'a> {
    fn new(options: &'a MarkupOptions) -> Self {
        Self {
            options,
            output: String::new(),
            indent_level: 0,
        }
    }

    fn push_indent(&mut self, s: &str) {
        for _ in 0..self.indent_level {
            self.output.push_str(&self.options.indent);
        }
        self.output.push_str(s);
    }

    fn open_line(&mut self, tag: &str) {
        self.push_indent(tag);
        self.output.push('\n');
        self.indent_level += 1;
    }

    fn close_line(&mut self, tag: &str) {
        self.indent_level -= 1;
        self.push_indent(&format!("</{tag}>\n"));
    }

    fn corpus(mut self, corpus: &Corpus) -> String {
        self.output.push_str(DECLARATION);
        self.output.push('\n');
        self.open_line("<corpus>");
        self.open_line("<subcorpus>");
        for document in &corpus.documents {
            self.document(document);
        }
        self.close_line("subcorpus");
        self.close_line("corpus");
        self.output
    }

    fn document(&mut self, document: &Document) {
        self.open_line(&format!(
            r#"<document name="{}">"#,
            escape_markup(&document.name)
        ));
        self.open_line(&format!(
            r#"<paragraph xml:id="{}">"#,
            escape_markup(&document.paragraph_id)
        ));
        for sentence in &document.sentences {
            self.sentence(sentence);
        }
        self.close_line("paragraph");
        self.close_line("document");
    }

    fn sentence(&mut self, sentence: &Sentence) {
        self.push_indent(&format!(
            r#"<sentence xml:id="{}">"#,
            escape_markup(&sentence.id)
        ));
        for (index, placed) in sentence.tokens.iter().enumerate() {
            if placed.space_before {
                self.output.push_str(SEPARATOR);
            }
            if let Some(span) = sentence.span_starting_at(index) {
                self.open_span(span);
            }
            self.output.push_str(&escape_markup(&placed.token.text));
            if sentence.spans.iter().any(|s| s.token_end == index) {
                self.output.push_str("</ENAMEX>");
            }
        }
        self.output.push_str("</sentence>\n");
    }

    fn open_span(&mut self, span: &Span) {
        self.output.push_str(&format!(
            r#"<ENAMEX {}="{}""#,
            self.options.class_attribute,
            escape_markup(span.class.as_str())
        ));
        if let Some(sense) = &span.sense {
            self.output
                .push_str(&format!(r#" sense="{}""#, escape_markup(sense)));
        }
        self.output.push('>');
    }
}

/// The `enamex` format.
#[derive(Debug, Clone, Default)]
pub struct EnamexFormatter {
    options: MarkupOptions,
}

impl EnamexFormatter {
    pub fn new(options: MarkupOptions) -> Self {
        Self { options }
    }
}

impl Formatter for EnamexFormatter {
    fn name(&self) -> &str {
        "enamex"
    }

    fn serialize(&self, corpus: &Corpus) -> Result<String, FormatError> {
        Ok(TagSerializer::new(&self.options).corpus(corpus))
    }

    fn description(&self) -> &str {
        "ENAMEX named-entity markup corpus"
    }
}
