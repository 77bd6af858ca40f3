//! Document tree
//!
//!     Corpus > Document > Sentence, with spans stored as stand-off token ranges on
//!     their sentence. A document has exactly one paragraph; the input carries no
//!     paragraph information, so the paragraph is reduced to an id on the document.
//!
//!     Invariants (established by the assembler):
//!         - spans never overlap and appear in token order;
//!         - `token_start <= token_end`, both inside the sentence's token list;
//!         - sentence ids are unique and increasing within a document.

use serde::Serialize;

use super::labels::EntityClass;
use super::spacing::SEPARATOR;
use super::token::Token;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Corpus {
    pub documents: Vec<Document>,
}

impl Corpus {
    pub fn sentence_count(&self) -> usize {
        self.documents.iter().map(|d| d.sentences.len()).sum()
    }

    pub fn span_count(&self) -> usize {
        self.documents
            .iter()
            .flat_map(|d| &d.sentences)
            .map(|s| s.spans.len())
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub name: String,
    pub paragraph_id: String,
    pub sentences: Vec<Sentence>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sentence {
    pub id: String,
    pub tokens: Vec<PlacedToken>,
    pub spans: Vec<Span>,
}

/// A token in its sentence, with the separator decision taken for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedToken {
    #[serde(flatten)]
    pub token: Token,
    pub space_before: bool,
}

/// Inclusive token range `token_start..=token_end` within one sentence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Span {
    pub class: EntityClass,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sense: Option<String>,
    pub token_start: usize,
    pub token_end: usize,
}

impl Span {
    pub fn contains(&self, index: usize) -> bool {
        (self.token_start..=self.token_end).contains(&index)
    }

    pub fn token_count(&self) -> usize {
        self.token_end - self.token_start + 1
    }
}

impl Sentence {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tokens: Vec::new(),
            spans: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The span starting at `index`, if any.
    pub fn span_starting_at(&self, index: usize) -> Option<&Span> {
        self.spans.iter().find(|s| s.token_start == index)
    }

    /// The span covering `index`, if any.
    pub fn span_covering(&self, index: usize) -> Option<&Span> {
        self.spans.iter().find(|s| s.contains(index))
    }

    /// Plain text of the sentence with the inferred separators.
    pub fn text(&self) -> String {
        render(&self.tokens)
    }

    /// Plain text of a span. The leading separator is dropped.
    pub fn span_text(&self, span: &Span) -> String {
        let tokens = &self.tokens[span.token_start..=span.token_end];
        render(tokens).trim_start_matches(SEPARATOR).to_string()
    }
}

fn render(tokens: &[PlacedToken]) -> String {
    let mut text = String::new();
    for placed in tokens {
        if placed.space_before {
            text.push_str(SEPARATOR);
        }
        text.push_str(&placed.token.text);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(text: &str, space_before: bool) -> PlacedToken {
        PlacedToken {
            token: Token::new(text, "O"),
            space_before,
        }
    }

    fn sentence() -> Sentence {
        Sentence {
            id: "P0E1".to_string(),
            tokens: vec![
                placed("In", false),
                placed("New", true),
                placed("York", true),
                placed(",", false),
            ],
            spans: vec![Span {
                class: EntityClass::Location,
                sense: None,
                token_start: 1,
                token_end: 2,
            }],
        }
    }

    #[test]
    fn test_sentence_text_uses_separators() {
        assert_eq!(sentence().text(), "In New York,");
    }

    #[test]
    fn test_span_text() {
        let sentence = sentence();
        assert_eq!(sentence.span_text(&sentence.spans[0]), "New York");
        assert_eq!(sentence.spans[0].token_count(), 2);
    }

    #[test]
    fn test_span_lookup() {
        let sentence = sentence();
        assert!(sentence.span_starting_at(1).is_some());
        assert!(sentence.span_starting_at(2).is_none());
        assert!(sentence.span_covering(2).is_some());
        assert!(sentence.span_covering(3).is_none());
    }

    #[test]
    fn test_json_shape() {
        let sentence = sentence();
        let json = serde_json::to_value(&sentence).unwrap();
        assert_eq!(json["tokens"][1]["text"], "New");
        assert_eq!(json["tokens"][1]["raw_label"], "O");
        assert_eq!(json["tokens"][1]["space_before"], true);
        assert_eq!(json["spans"][0]["class"], "LOCATION");
        assert!(json["spans"][0].get("sense").is_none());
    }
}
